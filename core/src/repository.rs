use crate::bridge::{
    self, BridgeClient, DeleteReportResponse, LoadReportsResponse, SaveReportResponse,
};
use crate::cache::{self, DELETED_IDS_KEY, WORKING_SET_KEY};
use crate::models::{derive_type, normalize_tags, Report, ReportDraft, DEFAULT_TITLE, DESCRIPTION_TEMPLATE};
use crate::policy::{visible_to, Action};
use crate::seed;
use rusqlite::Connection;
use serde_json::json;
use std::cmp::Reverse;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{action} requires grade {} or higher, actor holds grade {grade}", .action.required_grade())]
    Forbidden { action: Action, grade: u8 },
    #[error("no report with id {0}")]
    NotFound(i64),
    #[error("cache error: {0}")]
    Cache(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// The identity on whose behalf repository operations run.
#[derive(Debug, Clone)]
pub struct Actor {
    pub job: String,
    pub grade: u8,
}

impl Actor {
    pub fn new(job: impl Into<String>, grade: u8) -> Self {
        Self { job: job.into(), grade }
    }
}

/// Report store backing the terminal.
///
/// Three layers make up the visible state: the read-only seed reports bundled
/// with the build, the working set persisted in the cache, and the deleted-id
/// set that hides records from every read path. Local records shadow a seed
/// with the same id, which is how seed edits materialize without ever writing
/// to the seed data itself.
///
/// All writes round-trip through the host bridge first, but never depend on
/// it: a dead or absent host degrades every operation to its local outcome.
pub struct ReportRepository {
    conn: Connection,
    bridge: BridgeClient,
    seeds: Vec<Report>,
}

impl ReportRepository {
    /// Opens the repository over the cache database at `path`, with the
    /// bundled seed reports.
    pub fn open(path: &Path, bridge: BridgeClient) -> Result<Self> {
        let conn = cache::open_cache(path)?;
        Ok(Self { conn, bridge, seeds: seed::seed_reports() })
    }

    /// Repository over an explicit seed set.
    pub fn with_seeds(conn: Connection, bridge: BridgeClient, seeds: Vec<Report>) -> Self {
        Self {
            conn,
            bridge,
            seeds: seeds.into_iter().map(Report::normalize).collect(),
        }
    }

    /// Reports visible to `job`, filtered by a case-insensitive title search
    /// when `search` is non-blank, most recent first.
    pub fn list_visible(&self, job: &str, search: &str) -> Result<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .combined()?
            .into_iter()
            .filter(|r| visible_to(r, job))
            .collect();

        let term = search.trim().to_lowercase();
        if !term.is_empty() {
            reports.retain(|r| r.title.to_lowercase().contains(&term));
        }

        // Stable sort keeps seed-before-local order among equal timestamps.
        reports.sort_by_key(|r| Reverse(r.timestamp));
        Ok(reports)
    }

    /// Single report by id, provided it exists, is not deleted and is visible
    /// to `job`.
    pub fn get(&self, job: &str, id: i64) -> Result<Option<Report>> {
        Ok(self
            .combined()?
            .into_iter()
            .find(|r| r.id == id && visible_to(r, job)))
    }

    /// Creates or updates a report depending on whether the draft carries an
    /// id. The result is written into the cache before returning.
    pub fn save(&mut self, actor: &Actor, draft: ReportDraft) -> Result<Report> {
        match draft.id {
            Some(id) => self.update(actor, id, draft),
            None => self.create(actor, draft),
        }
    }

    fn create(&mut self, actor: &Actor, draft: ReportDraft) -> Result<Report> {
        if !Action::Create.allowed_for(actor.grade) {
            return Err(RepositoryError::Forbidden { action: Action::Create, grade: actor.grade });
        }

        let local_id = self.next_id()?;
        let tags = normalize_tags(draft.tags);
        let mut report = Report {
            id: local_id,
            title: non_blank(draft.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: draft.description.unwrap_or_else(|| DESCRIPTION_TEMPLATE.to_string()),
            report_type: derive_type(draft.report_type.as_deref(), &tags),
            tags,
            gallery: draft.gallery,
            vehicles_involved: draft.vehicles_involved,
            officers_involved: draft.officers_involved,
            civilians_involved: draft.civilians_involved,
            criminals_involved: draft.criminals_involved,
            job: draft.job,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        // Host first: a durable id assigned there supersedes the local one,
        // so the record lands in the cache under its final identity.
        let reply: SaveReportResponse = self.bridge.call_or(
            bridge::SAVE_REPORT,
            json!({ "report": report }),
            SaveReportResponse { success: true, report_id: Some(local_id) },
        );
        if reply.success {
            if let Some(remote_id) = reply.report_id {
                if remote_id != report.id {
                    tracing::debug!(local_id = report.id, remote_id, "host id supersedes local id");
                    report.id = remote_id;
                }
            }
        }

        let mut working = self.working_set()?;
        working.push(report.clone());
        self.write_working_set(&working)?;
        tracing::debug!(id = report.id, job = %report.job, "report created");
        Ok(report)
    }

    fn update(&mut self, actor: &Actor, id: i64, draft: ReportDraft) -> Result<Report> {
        if !Action::Edit.allowed_for(actor.grade) {
            return Err(RepositoryError::Forbidden { action: Action::Edit, grade: actor.grade });
        }
        if self.deleted_ids()?.contains(&id) {
            return Err(RepositoryError::NotFound(id));
        }

        let mut working = self.working_set()?;
        let slot = working.iter().position(|r| r.id == id);
        let base = match slot {
            Some(pos) => working[pos].clone(),
            // Copy-on-write: editing a seed materializes it into the working
            // set, where it shadows the bundled copy from then on.
            None => match self.seeds.iter().find(|s| s.id == id) {
                Some(seed) => seed.clone(),
                None => return Err(RepositoryError::NotFound(id)),
            },
        };

        let tags = normalize_tags(draft.tags);
        let report = Report {
            id: base.id,
            title: non_blank(draft.title).unwrap_or_else(|| base.title.clone()),
            description: draft.description.unwrap_or_else(|| base.description.clone()),
            report_type: match non_blank(draft.report_type) {
                Some(t) => t,
                None if !base.report_type.trim().is_empty() => base.report_type.clone(),
                None => derive_type(None, &tags),
            },
            tags,
            gallery: draft.gallery,
            vehicles_involved: draft.vehicles_involved,
            officers_involved: draft.officers_involved,
            civilians_involved: draft.civilians_involved,
            criminals_involved: draft.criminals_involved,
            job: if draft.job.trim().is_empty() { base.job.clone() } else { draft.job },
            // Creation time survives edits.
            timestamp: base.timestamp,
        };

        // Best effort on the host; an existing id is never superseded.
        let _reply: SaveReportResponse = self.bridge.call_or(
            bridge::SAVE_REPORT,
            json!({ "report": report }),
            SaveReportResponse { success: true, report_id: Some(report.id) },
        );

        match slot {
            Some(pos) => working[pos] = report.clone(),
            None => working.push(report.clone()),
        }
        self.write_working_set(&working)?;
        tracing::debug!(id = report.id, "report updated");
        Ok(report)
    }

    /// Soft-deletes a report. The id joins the deleted-id set, a working-set
    /// record is physically dropped, a seed stays in place but hidden. The
    /// host delete is fire-and-forget; local removal is already durable.
    pub fn delete(&mut self, actor: &Actor, id: i64) -> Result<()> {
        if !Action::Delete.allowed_for(actor.grade) {
            return Err(RepositoryError::Forbidden { action: Action::Delete, grade: actor.grade });
        }

        let mut working = self.working_set()?;
        let in_working = working.iter().any(|r| r.id == id);
        let in_seeds = self.seeds.iter().any(|s| s.id == id);
        if !in_working && !in_seeds {
            return Err(RepositoryError::NotFound(id));
        }

        if in_working {
            working.retain(|r| r.id != id);
            self.write_working_set(&working)?;
        }

        let mut deleted = self.deleted_ids()?;
        if !deleted.contains(&id) {
            deleted.push(id);
            self.write_deleted_ids(&deleted)?;
        }

        let _reply: DeleteReportResponse = self.bridge.call_or(
            bridge::DELETE_REPORT,
            json!({ "id": id }),
            DeleteReportResponse { success: true },
        );
        tracing::debug!(id, "report deleted");
        Ok(())
    }

    /// Pulls the host-persisted working set into the cache. The local set is
    /// replaced only on a genuine success reply; an offline or failing host
    /// leaves it untouched, so locally created reports survive. Returns the
    /// number of reports loaded, or `None` when the pull was skipped.
    pub fn refresh(&mut self) -> Result<Option<usize>> {
        match self.bridge.call::<LoadReportsResponse>(bridge::LOAD_REPORTS, json!({})) {
            Ok(reply) if reply.success => {
                let reports: Vec<Report> =
                    reply.reports.into_iter().map(Report::normalize).collect();
                let count = reports.len();
                self.write_working_set(&reports)?;
                tracing::debug!(count, "working set replaced from host");
                Ok(Some(count))
            }
            Ok(_) => {
                tracing::warn!("host refused to load reports, keeping local working set");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(error = %e, "load skipped, keeping local working set");
                Ok(None)
            }
        }
    }

    fn working_set(&self) -> Result<Vec<Report>> {
        Ok(cache::get::<Report>(&self.conn, WORKING_SET_KEY)?
            .into_iter()
            .map(Report::normalize)
            .collect())
    }

    fn write_working_set(&self, reports: &[Report]) -> Result<()> {
        cache::set(&self.conn, WORKING_SET_KEY, reports)?;
        Ok(())
    }

    fn deleted_ids(&self) -> Result<Vec<i64>> {
        Ok(cache::get(&self.conn, DELETED_IDS_KEY)?)
    }

    fn write_deleted_ids(&self, ids: &[i64]) -> Result<()> {
        cache::set(&self.conn, DELETED_IDS_KEY, ids)?;
        Ok(())
    }

    /// Seeds and working set merged into one view: deleted ids are dropped,
    /// and a working-set record shadows the seed sharing its id.
    fn combined(&self) -> Result<Vec<Report>> {
        let working = self.working_set()?;
        let deleted = self.deleted_ids()?;

        let mut out: Vec<Report> = Vec::with_capacity(self.seeds.len() + working.len());
        for seed in &self.seeds {
            if deleted.contains(&seed.id) {
                continue;
            }
            if working.iter().any(|r| r.id == seed.id) {
                continue;
            }
            out.push(seed.clone());
        }
        for report in working {
            if deleted.contains(&report.id) {
                continue;
            }
            out.push(report);
        }
        Ok(out)
    }

    /// Next locally assigned id. Soft-deleted records still exist, so their
    /// ids count; without that, a create could land on a tombstoned id and be
    /// born invisible.
    fn next_id(&self) -> Result<i64> {
        let working = self.working_set()?;
        let deleted = self.deleted_ids()?;
        let max = self
            .seeds
            .iter()
            .map(|r| r.id)
            .chain(working.iter().map(|r| r.id))
            .chain(deleted.iter().copied())
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
