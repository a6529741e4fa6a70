use tracing::{debug, warn};

use nsfg_model::{PregnancyMap, Respondent, Result};

use crate::issue::PregnumMismatch;

/// Checks that every respondent's `pregnum` matches their pregnancy records.
///
/// Stops at the first mismatch, printing `"<caseid> <observed> <reported>"`
/// to stdout, and returns `Ok(false)`.
///
/// # Errors
///
/// Returns [`nsfg_model::ModelError::MissingCase`] when a respondent's case is
/// not in `preg_map`.
pub fn validate_pregnum(respondents: &[Respondent], preg_map: &PregnancyMap) -> Result<bool> {
    match first_pregnum_mismatch(respondents, preg_map)? {
        Some(mismatch) => {
            warn!(
                case_id = %mismatch.case_id,
                observed = mismatch.observed,
                reported = mismatch.reported,
                "pregnum mismatch"
            );
            println!("{mismatch}");
            Ok(false)
        }
        None => {
            debug!(respondents = respondents.len(), "pregnum consistent");
            Ok(true)
        }
    }
}

/// Returns the first respondent, in stored order, whose `pregnum` disagrees
/// with the pregnancy map. Respondents after it are not examined, and nothing
/// is printed or logged.
pub fn first_pregnum_mismatch(
    respondents: &[Respondent],
    preg_map: &PregnancyMap,
) -> Result<Option<PregnumMismatch>> {
    for respondent in respondents {
        if let Some(mismatch) = check(respondent, preg_map)? {
            return Ok(Some(mismatch));
        }
    }
    Ok(None)
}

/// Collects every mismatch instead of stopping at the first.
pub fn find_pregnum_mismatches(
    respondents: &[Respondent],
    preg_map: &PregnancyMap,
) -> Result<Vec<PregnumMismatch>> {
    let mut mismatches = Vec::new();
    for respondent in respondents {
        if let Some(mismatch) = check(respondent, preg_map)? {
            mismatches.push(mismatch);
        }
    }
    if !mismatches.is_empty() {
        warn!(count = mismatches.len(), "pregnum mismatches");
    }
    Ok(mismatches)
}

fn check(respondent: &Respondent, preg_map: &PregnancyMap) -> Result<Option<PregnumMismatch>> {
    let observed = preg_map.get(&respondent.case_id)?.len();
    // usize -> u64 keeps the comparison exact on every target.
    if observed as u64 == u64::from(respondent.pregnum) {
        Ok(None)
    } else {
        Ok(Some(PregnumMismatch {
            case_id: respondent.case_id.clone(),
            observed,
            reported: respondent.pregnum,
        }))
    }
}
