use serde::{Deserialize, Serialize};

/// Title given to a report created without one.
pub const DEFAULT_TITLE: &str = "Nouveau Rapport";

/// Type label for reports that carry neither an explicit type nor a usable tag.
pub const UNTYPED_LABEL: &str = "Type non défini";

/// Body pre-filled into a freshly created report.
pub const DESCRIPTION_TEMPLATE: &str = "Template rapport \n\n Date d'ouverture: \n Rempli par: (Nom et matricule) \n\n Détails de l'incident: \n Preuves: \n\n Etat de l'investigation: \n\n Notes additionnelles: ";

/// A case report as stored in the cache and exchanged with the host.
///
/// The wire shape is fixed by the host side, hence the camelCase field names
/// and the legacy `listImg` / `vehiculesInvolved` spellings. Older records may
/// lack `type`, `timestamp` or any of the list fields; deserialization fills
/// those with empty values and [`Report::normalize`] derives the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default)]
    pub report_type: String,
    #[serde(rename = "listImg", default)]
    pub gallery: Vec<String>,
    #[serde(rename = "vehiculesInvolved", default)]
    pub vehicles_involved: Vec<String>,
    #[serde(default)]
    pub officers_involved: Vec<String>,
    #[serde(default)]
    pub civilians_involved: Vec<String>,
    #[serde(default)]
    pub criminals_involved: Vec<String>,
    /// Service that filed the report
    pub job: String,
    /// Creation time in epoch milliseconds. Zero for records that predate the
    /// field; those sort last in recency order.
    #[serde(default)]
    pub timestamp: i64,
}

impl Report {
    /// Fills the derivable gaps of an ingested record. The stored `type` wins;
    /// a record without one falls back to its first usable tag, then to
    /// [`UNTYPED_LABEL`]. Settled fields are never touched, so normalizing an
    /// already normalized report is a no-op.
    pub fn normalize(mut self) -> Self {
        if self.report_type.trim().is_empty() {
            self.report_type = derive_type(None, &self.tags);
        }
        self
    }
}

/// Resolves the type label for a report: explicit value first, then the first
/// non-blank tag, then [`UNTYPED_LABEL`].
pub fn derive_type(explicit: Option<&str>, tags: &[String]) -> String {
    if let Some(t) = explicit {
        if !t.trim().is_empty() {
            return t.to_string();
        }
    }
    tags.iter()
        .find(|t| !t.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| UNTYPED_LABEL.to_string())
}

/// Drops blank entries and duplicates, keeping the first occurrence of each
/// tag in its submitted position.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.trim().is_empty() {
            continue;
        }
        if seen.iter().any(|s| s == &tag) {
            continue;
        }
        seen.push(tag);
    }
    seen
}

/// The submitted state of a report form, before the repository fills defaults
/// and assigns identity.
///
/// `id` decides the write path: `None` creates, `Some` updates. The three
/// `Option` fields distinguish "left blank" from an explicit value; blank
/// falls back to the stored value on update and to the standard defaults on
/// create. List fields and `job` are taken as the full intended state.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub report_type: Option<String>,
    pub tags: Vec<String>,
    pub gallery: Vec<String>,
    pub vehicles_involved: Vec<String>,
    pub officers_involved: Vec<String>,
    pub civilians_involved: Vec<String>,
    pub criminals_involved: Vec<String>,
    pub job: String,
}

impl ReportDraft {
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            ..Self::default()
        }
    }

    /// Draft carrying the full current state of `report`, ready for selective
    /// overrides before an update.
    pub fn from_report(report: &Report) -> Self {
        Self {
            id: Some(report.id),
            title: Some(report.title.clone()),
            description: Some(report.description.clone()),
            report_type: Some(report.report_type.clone()),
            tags: report.tags.clone(),
            gallery: report.gallery.clone(),
            vehicles_involved: report.vehicles_involved.clone(),
            officers_involved: report.officers_involved.clone(),
            civilians_involved: report.civilians_involved.clone(),
            criminals_involved: report.criminals_involved.clone(),
            job: report.job.clone(),
        }
    }
}

/// A directory entry for a department member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub job: String,
    pub grade: u8,
    pub name: String,
    pub badge: Option<String>,
}

impl User {
    /// Display label used when attaching an officer to a report.
    pub fn officer_label(&self) -> String {
        format!("{} ({})", self.name, self.badge.as_deref().unwrap_or("N/A"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn sample_report() -> Report {
        Report {
            id: 3,
            title: "Vol à main armée".to_string(),
            description: "Braquage de la station-service".to_string(),
            tags: vec!["LSPD".to_string(), "Délit majeur".to_string()],
            report_type: "Délit majeur".to_string(),
            gallery: vec!["https://example.com/1.png".to_string()],
            vehicles_involved: vec!["ABC 123".to_string()],
            officers_involved: vec!["Agent Smith (12345)".to_string()],
            civilians_involved: vec![],
            criminals_involved: vec!["John Doe".to_string()],
            job: "lspd".to_string(),
            timestamp: 1_736_000_000_000,
        }
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report();
        let raw = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn report_serializes_with_wire_field_names() {
        let raw = serde_json::to_value(sample_report()).unwrap();
        let obj = raw.as_object().unwrap();
        assert!(obj.contains_key("type"));
        assert!(obj.contains_key("listImg"));
        assert!(obj.contains_key("vehiculesInvolved"));
        assert!(obj.contains_key("officersInvolved"));
        assert!(obj.contains_key("civiliansInvolved"));
        assert!(obj.contains_key("criminalsInvolved"));
        assert!(!obj.contains_key("report_type"));
    }

    #[test]
    fn legacy_record_deserializes_with_defaults() {
        let raw = r#"{"id": 7, "title": "Ancien dossier", "job": "lsfd"}"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(report.report_type, "");
        assert_eq!(report.timestamp, 0);
        assert!(report.tags.is_empty());
        assert!(report.gallery.is_empty());
    }

    #[test]
    fn normalize_derives_type_from_first_tag() {
        let raw = r#"{"id": 1, "title": "T", "job": "lspd", "tags": ["Incendie", "LSFD"]}"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.normalize().report_type, "Incendie");
    }

    #[test]
    fn normalize_keeps_existing_type() {
        let report = sample_report().normalize();
        assert_eq!(report.report_type, "Délit majeur");
    }

    #[test]
    fn normalize_falls_back_to_untyped_label() {
        let raw = r#"{"id": 1, "title": "T", "job": "lspd"}"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.normalize().report_type, UNTYPED_LABEL);
    }

    #[test]
    fn derive_type_skips_blank_values() {
        let tags = vec![" ".to_string(), "Cambriolage".to_string()];
        assert_eq!(derive_type(Some("  "), &tags), "Cambriolage");
    }

    #[test]
    fn tags_deduplicate_keeping_first_occurrence() {
        let tags = vec![
            "LSPD".to_string(),
            "".to_string(),
            "Délit majeur".to_string(),
            "LSPD".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(
            normalize_tags(tags),
            vec!["LSPD".to_string(), "Délit majeur".to_string()]
        );
    }

    #[test]
    fn draft_from_report_preserves_identity() {
        let report = sample_report();
        let draft = ReportDraft::from_report(&report);
        assert_eq!(draft.id, Some(3));
        assert_eq!(draft.job, "lspd");
        assert_eq!(draft.tags, report.tags);
    }

    #[test]
    fn officer_label_falls_back_without_badge() {
        let mut user = User {
            id: "1".to_string(),
            username: "agent.smith".to_string(),
            job: "lspd".to_string(),
            grade: 3,
            name: "Agent Smith".to_string(),
            badge: Some("12345".to_string()),
        };
        assert_eq!(user.officer_label(), "Agent Smith (12345)");
        user.badge = None;
        assert_eq!(user.officer_label(), "Agent Smith (N/A)");
    }
}
