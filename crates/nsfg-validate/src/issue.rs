use std::fmt;

use serde::{Deserialize, Serialize};

use nsfg_model::CaseId;

/// A respondent whose reported `pregnum` disagrees with the pregnancy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregnumMismatch {
    pub case_id: CaseId,
    /// Pregnancy records on file for the case.
    pub observed: usize,
    /// Count the respondent reported.
    pub reported: u32,
}

impl fmt::Display for PregnumMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.case_id, self.observed, self.reported)
    }
}
