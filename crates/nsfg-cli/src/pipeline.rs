//! Loading stage shared by every subcommand.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nsfg_ingest::{
    PregnancySource, RespondentSource, make_preg_map, read_fem_preg, read_fem_resp,
    respondents_from_frame,
};
use nsfg_model::{PregnancyMap, Respondent};

/// Where the respondent and pregnancy files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub respondents: RespondentSource,
    pub pregnancies: PregnancySource,
}

impl DataSources {
    /// Default NSFG 2002 file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            respondents: RespondentSource::in_dir(dir),
            pregnancies: PregnancySource::in_dir(dir),
        }
    }

    #[must_use]
    pub fn with_nrows(mut self, nrows: Option<usize>) -> Self {
        self.respondents.nrows = nrows;
        self
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::in_dir(&PathBuf::from("."))
    }
}

/// Reads the respondent file into typed records.
pub fn load_respondents(source: &RespondentSource) -> Result<Vec<Respondent>> {
    let span = info_span!("respondents", path = %source.dat_file.display());
    let _guard = span.enter();
    let start = Instant::now();
    let df = read_fem_resp(source)
        .with_context(|| format!("read respondents: {}", source.dat_file.display()))?;
    let respondents = respondents_from_frame(&df).context("extract respondents")?;
    info!(
        rows = respondents.len(),
        duration_ms = start.elapsed().as_millis(),
        "respondents loaded"
    );
    Ok(respondents)
}

/// Reads the pregnancy file and builds the case map.
///
/// Every respondent's case is registered in the map, so a respondent with no
/// pregnancy records resolves to an empty list.
pub fn load_pregnancy_map(
    source: &PregnancySource,
    respondents: &[Respondent],
) -> Result<PregnancyMap> {
    let span = info_span!("pregnancies", path = %source.dat_file.display());
    let _guard = span.enter();
    let start = Instant::now();
    let df = read_fem_preg(source)
        .with_context(|| format!("read pregnancies: {}", source.dat_file.display()))?;
    let mut preg_map = make_preg_map(&df).context("build pregnancy map")?;
    preg_map.register_cases(respondents.iter().map(|r| &r.case_id));
    info!(
        records = df.height(),
        cases = preg_map.len(),
        duration_ms = start.elapsed().as_millis(),
        "pregnancy map built"
    );
    Ok(preg_map)
}
