//! The fixed NSFG 2002 self-test.

use anyhow::Result;
use thiserror::Error;
use tracing::info;

use nsfg_model::value_counts;
use nsfg_validate::validate_pregnum;

use crate::pipeline::{DataSources, load_pregnancy_map, load_respondents};

/// Respondents in the 2002 female respondent file.
pub const NSFG_2002_RESPONDENTS: usize = 7643;
/// Respondents in that file reporting exactly one pregnancy.
pub const NSFG_2002_SINGLE_PREGNANCY: usize = 1267;

/// Counts the self-test requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectations {
    pub respondents: usize,
    pub single_pregnancy: usize,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            respondents: NSFG_2002_RESPONDENTS,
            single_pregnancy: NSFG_2002_SINGLE_PREGNANCY,
        }
    }
}

/// A failed self-test check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelfTestFailure {
    #[error("expected {expected} respondents, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("expected {expected} respondents with pregnum == 1, found {found}")]
    SingletonCount { expected: usize, found: usize },

    #[error("pregnum does not match the pregnancy file")]
    PregnumMismatch,
}

/// Loads respondents, checks the row and single-pregnancy counts, then
/// validates `pregnum` against the pregnancy file. Stops at the first
/// failed check.
pub fn run_self_test(sources: &DataSources, expectations: &Expectations) -> Result<()> {
    let respondents = load_respondents(&sources.respondents)?;
    if respondents.len() != expectations.respondents {
        return Err(SelfTestFailure::RowCount {
            expected: expectations.respondents,
            found: respondents.len(),
        }
        .into());
    }

    let singletons = value_counts(&respondents).get(&1).copied().unwrap_or(0);
    if singletons != expectations.single_pregnancy {
        return Err(SelfTestFailure::SingletonCount {
            expected: expectations.single_pregnancy,
            found: singletons,
        }
        .into());
    }

    let preg_map = load_pregnancy_map(&sources.pregnancies, &respondents)?;
    if !validate_pregnum(&respondents, &preg_map)? {
        return Err(SelfTestFailure::PregnumMismatch.into());
    }
    info!(respondents = respondents.len(), "self-test passed");
    Ok(())
}
