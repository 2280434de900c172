use crate::models::Report;

const SEED_JSON: &str = include_str!("../data/seed_reports.json");

/// Sample reports shipped with the terminal. They are read-only: edits go
/// through copy-on-write into the working set, and deletion only hides them
/// behind the deleted-id set.
pub fn seed_reports() -> Vec<Report> {
    match serde_json::from_str::<Vec<Report>>(SEED_JSON) {
        Ok(reports) => reports.into_iter().map(Report::normalize).collect(),
        Err(e) => {
            tracing::error!(error = %e, "bundled seed reports failed to parse");
            Vec::new()
        }
    }
}
