//! Case-to-pregnancy-record mapping.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{ModelError, Result};
use crate::ids::CaseId;

/// Maps each case identifier to the row indices of its pregnancy records.
///
/// Indices within a case are kept in insertion order, which is ascending row
/// order when the map is built by scanning the pregnancy table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PregnancyMap {
    cases: BTreeMap<CaseId, Vec<usize>>,
}

impl PregnancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that pregnancy row `index` belongs to `case_id`.
    pub fn push(&mut self, case_id: CaseId, index: usize) {
        self.cases.entry(case_id).or_default().push(index);
    }

    /// Registers surveyed cases so that a case with no pregnancy records
    /// resolves to an empty list instead of a missing-case error.
    pub fn register_cases<'a, I>(&mut self, case_ids: I)
    where
        I: IntoIterator<Item = &'a CaseId>,
    {
        for case_id in case_ids {
            if !self.cases.contains_key(case_id) {
                self.cases.insert(case_id.clone(), Vec::new());
            }
        }
    }

    /// Pregnancy row indices for a case.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingCase`] when the case has no entry.
    pub fn get(&self, case_id: &CaseId) -> Result<&[usize]> {
        self.cases
            .get(case_id)
            .map(Vec::as_slice)
            .ok_or_else(|| ModelError::MissingCase {
                case_id: case_id.clone(),
            })
    }

    /// Number of distinct cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Total number of pregnancy records across all cases.
    pub fn record_count(&self) -> usize {
        self.cases.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CaseId, Vec<usize>> {
        self.cases.iter()
    }
}

impl FromIterator<(CaseId, usize)> for PregnancyMap {
    fn from_iter<I: IntoIterator<Item = (CaseId, usize)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (case_id, index) in iter {
            map.push(case_id, index);
        }
        map
    }
}

impl<'a> IntoIterator for &'a PregnancyMap {
    type Item = (&'a CaseId, &'a Vec<usize>);
    type IntoIter = btree_map::Iter<'a, CaseId, Vec<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
