use crate::models::Report;
use std::fmt;

/// Minimum grade allowed to create reports.
pub const CREATE_GRADE: u8 = 1;
/// Minimum grade allowed to edit reports.
pub const EDIT_GRADE: u8 = 2;
/// Minimum grade allowed to delete reports.
pub const DELETE_GRADE: u8 = 4;

/// A guarded report operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Edit,
    Delete,
}

impl Action {
    pub fn required_grade(self) -> u8 {
        match self {
            Action::Create => CREATE_GRADE,
            Action::Edit => EDIT_GRADE,
            Action::Delete => DELETE_GRADE,
        }
    }

    pub fn allowed_for(self, grade: u8) -> bool {
        grade >= self.required_grade()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Edit => write!(f, "edit"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

pub fn can_create(grade: u8) -> bool {
    Action::Create.allowed_for(grade)
}

pub fn can_edit(grade: u8) -> bool {
    Action::Edit.allowed_for(grade)
}

pub fn can_delete(grade: u8) -> bool {
    Action::Delete.allowed_for(grade)
}

/// A report is visible to a service when that service filed it or appears
/// among its tags. Comparison ignores case on both sides.
pub fn visible_to(report: &Report, job: &str) -> bool {
    let job = job.to_lowercase();
    report.job.to_lowercase() == job || report.tags.iter().any(|t| t.to_lowercase() == job)
}
