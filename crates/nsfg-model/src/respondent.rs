//! Respondent records from the female respondent file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::CaseId;

/// One survey participant, reduced to the fields the pregnancy check needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub case_id: CaseId,
    /// Self-reported number of pregnancies.
    pub pregnum: u32,
}

impl Respondent {
    pub fn new(case_id: impl Into<CaseId>, pregnum: u32) -> Self {
        Self {
            case_id: case_id.into(),
            pregnum,
        }
    }
}

/// Counts respondents by reported `pregnum`.
pub fn value_counts(respondents: &[Respondent]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for respondent in respondents {
        *counts.entry(respondent.pregnum).or_insert(0) += 1;
    }
    counts
}
