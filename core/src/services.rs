use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The services wired into the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKey {
    Lspd,
    Lsdph,
    Fib,
    Mairie,
    Lsfd,
    Doj,
}

/// A terminal capability a service may or may not have access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Reports,
    Warrants,
    Penalties,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 6] = [
        ServiceKey::Lspd,
        ServiceKey::Lsdph,
        ServiceKey::Fib,
        ServiceKey::Mairie,
        ServiceKey::Lsfd,
        ServiceKey::Doj,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKey::Lspd => "lspd",
            ServiceKey::Lsdph => "lsdph",
            ServiceKey::Fib => "fib",
            ServiceKey::Mairie => "mairie",
            ServiceKey::Lsfd => "lsfd",
            ServiceKey::Doj => "doj",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKey::Lspd => "Los Santos Police Department",
            ServiceKey::Lsdph => "Los Santos Department of Public Health",
            ServiceKey::Fib => "Federal Investigation Bureau",
            ServiceKey::Mairie => "Mairie de Los Santos",
            ServiceKey::Lsfd => "Los Santos Fire Department",
            ServiceKey::Doj => "Department of Justice",
        }
    }

    /// Tags offered to this service when filling in a report.
    pub fn suggested_tags(self) -> &'static [&'static str] {
        match self {
            ServiceKey::Lspd => &[
                "LSPD",
                "LSFD",
                "LSDPH",
                "FIB",
                "DOJ",
                "Mairie",
                "Crime financiers",
                "Délit majeur",
                "Délit mineur",
                "Infractions",
            ],
            ServiceKey::Lsdph => &[
                "LSDPH",
                "LSPD",
                "LSFD",
                "Medical Emergency",
                "Patient Treatment",
                "Surgery",
                "Mental Health",
                "Drug Abuse",
                "Autopsy",
                "Medical Report",
                "Quarantine",
                "Vaccination",
            ],
            ServiceKey::Fib => &[
                "FIB",
                "LSPD",
                "DOJ",
                "Federal Crime",
                "Organized Crime",
                "Terrorism",
                "Corruption",
                "Money Laundering",
                "Cybercrime",
                "Undercover",
                "Classified",
                "High Priority",
                "Federal Warrant",
            ],
            ServiceKey::Mairie => &[
                "Mayor",
                "LSPD",
                "DOJ",
                "LSFD",
                "LSDPH",
                "FIB",
                "Administrative",
                "Public Order",
                "City Planning",
                "Budget",
                "Public Event",
                "City Council",
            ],
            ServiceKey::Lsfd => &[
                "LSFD",
                "LSPD",
                "LSDPH",
                "Fire",
                "Rescue",
                "Medical Emergency",
                "Hazmat",
                "Vehicle Accident",
                "Building Collapse",
                "Natural Disaster",
                "Fire Investigation",
            ],
            ServiceKey::Doj => &[
                "DOJ",
                "LSPD",
                "FIB",
                "Mayor",
                "Court Order",
                "Legal Procedure",
                "Warrant",
                "Sentencing",
                "Appeal",
                "Legal Opinion",
                "Constitutional Matter",
            ],
        }
    }

    pub fn has_feature(self, feature: Feature) -> bool {
        match feature {
            Feature::Reports => !matches!(self, ServiceKey::Mairie),
            Feature::Warrants => !matches!(self, ServiceKey::Lsdph),
            Feature::Penalties => {
                !matches!(self, ServiceKey::Lsdph | ServiceKey::Lsfd)
            }
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service '{0}'")]
pub struct UnknownService(pub String);

impl FromStr for ServiceKey {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lspd" => Ok(ServiceKey::Lspd),
            "lsdph" => Ok(ServiceKey::Lsdph),
            "fib" => Ok(ServiceKey::Fib),
            "mairie" => Ok(ServiceKey::Mairie),
            "lsfd" => Ok(ServiceKey::Lsfd),
            "doj" => Ok(ServiceKey::Doj),
            other => Err(UnknownService(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("LSPD".parse::<ServiceKey>().unwrap(), ServiceKey::Lspd);
        assert_eq!("doj".parse::<ServiceKey>().unwrap(), ServiceKey::Doj);
        assert!("ballas".parse::<ServiceKey>().is_err());
    }

    #[test]
    fn every_service_offers_tags() {
        for key in ServiceKey::ALL {
            assert!(!key.suggested_tags().is_empty(), "{key} has no tags");
        }
    }

    #[test]
    fn feature_matrix_matches_deployment() {
        assert!(ServiceKey::Lspd.has_feature(Feature::Reports));
        assert!(ServiceKey::Lspd.has_feature(Feature::Penalties));
        assert!(!ServiceKey::Mairie.has_feature(Feature::Reports));
        assert!(ServiceKey::Mairie.has_feature(Feature::Warrants));
        assert!(!ServiceKey::Lsdph.has_feature(Feature::Warrants));
        assert!(!ServiceKey::Lsfd.has_feature(Feature::Penalties));
        assert!(ServiceKey::Lsfd.has_feature(Feature::Warrants));
        assert!(ServiceKey::Fib.has_feature(Feature::Reports));
    }

    #[test]
    fn display_round_trips_with_from_str() {
        for key in ServiceKey::ALL {
            assert_eq!(key.to_string().parse::<ServiceKey>().unwrap(), key);
        }
    }
}
