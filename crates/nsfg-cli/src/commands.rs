use anyhow::Result;

use nsfg_model::value_counts;
use nsfg_validate::{find_pregnum_mismatches, first_pregnum_mismatch};

use nsfg_cli::pipeline::{DataSources, load_pregnancy_map, load_respondents};
use nsfg_cli::selftest::{Expectations, run_self_test};
use nsfg_cli::summary::{ValidationReport, mismatch_table, pregnum_table};

use crate::cli::ValidateArgs;

pub fn run_check(sources: &DataSources) -> Result<()> {
    run_self_test(sources, &Expectations::default())
}

/// Returns whether the data is consistent.
pub fn run_validate(sources: &DataSources, args: &ValidateArgs) -> Result<bool> {
    let respondents = load_respondents(&sources.respondents)?;
    let preg_map = load_pregnancy_map(&sources.pregnancies, &respondents)?;
    let mismatches = if args.all {
        find_pregnum_mismatches(&respondents, &preg_map)?
    } else {
        first_pregnum_mismatch(&respondents, &preg_map)?
            .into_iter()
            .collect()
    };
    let report = ValidationReport::new(respondents.len(), preg_map.record_count(), mismatches);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.consistent {
        println!(
            "pregnum consistent for {} respondents ({} pregnancy records)",
            report.respondents, report.pregnancy_records
        );
    } else {
        println!("{}", mismatch_table(&report.mismatches));
    }
    Ok(report.consistent)
}

pub fn run_summary(sources: &DataSources) -> Result<()> {
    let respondents = load_respondents(&sources.respondents)?;
    println!("{}", pregnum_table(&value_counts(&respondents)));
    Ok(())
}
