//! Loaders for the 2002 NSFG female respondent and pregnancy files.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use nsfg_model::{CaseId, PregnancyMap, Respondent};

use crate::dictionary::read_dictionary;
use crate::error::{IngestError, Result};
use crate::fixed_width::{Compression, FixedWidthOptions, read_fixed_width};
use crate::frame::{any_to_i64, any_to_string};

/// Default respondent dictionary file name.
pub const DEFAULT_RESP_DCT: &str = "2002FemResp.dct";
/// Default respondent data file name.
pub const DEFAULT_RESP_DAT: &str = "2002FemResp.dat.gz";
/// Default pregnancy dictionary file name.
pub const DEFAULT_PREG_DCT: &str = "2002FemPreg.dct";
/// Default pregnancy data file name.
pub const DEFAULT_PREG_DAT: &str = "2002FemPreg.dat.gz";

const CASEID: &str = "caseid";
const PREGNUM: &str = "pregnum";

/// Location of the respondent file pair.
///
/// Defaults to [`DEFAULT_RESP_DCT`] and [`DEFAULT_RESP_DAT`] in the current
/// directory, reading every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentSource {
    pub dct_file: PathBuf,
    pub dat_file: PathBuf,
    pub nrows: Option<usize>,
}

impl Default for RespondentSource {
    fn default() -> Self {
        Self {
            dct_file: PathBuf::from(DEFAULT_RESP_DCT),
            dat_file: PathBuf::from(DEFAULT_RESP_DAT),
            nrows: None,
        }
    }
}

impl RespondentSource {
    /// Default file names resolved inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dct_file: dir.join(DEFAULT_RESP_DCT),
            dat_file: dir.join(DEFAULT_RESP_DAT),
            nrows: None,
        }
    }

    #[must_use]
    pub fn with_nrows(mut self, nrows: Option<usize>) -> Self {
        self.nrows = nrows;
        self
    }
}

/// Location of the pregnancy file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PregnancySource {
    pub dct_file: PathBuf,
    pub dat_file: PathBuf,
}

impl Default for PregnancySource {
    fn default() -> Self {
        Self {
            dct_file: PathBuf::from(DEFAULT_PREG_DCT),
            dat_file: PathBuf::from(DEFAULT_PREG_DAT),
        }
    }
}

impl PregnancySource {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dct_file: dir.join(DEFAULT_PREG_DCT),
            dat_file: dir.join(DEFAULT_PREG_DAT),
        }
    }
}

/// Reads the respondent file.
pub fn read_fem_resp(source: &RespondentSource) -> Result<DataFrame> {
    let dictionary = read_dictionary(&source.dct_file)?;
    let options = FixedWidthOptions::default()
        .with_compression(Compression::Infer)
        .with_nrows(source.nrows);
    read_fixed_width(&source.dat_file, &dictionary, &options)
}

/// Reads the pregnancy file and applies [`clean_fem_preg`].
pub fn read_fem_preg(source: &PregnancySource) -> Result<DataFrame> {
    let dictionary = read_dictionary(&source.dct_file)?;
    let options = FixedWidthOptions::default().with_compression(Compression::Infer);
    let df = read_fixed_width(&source.dat_file, &dictionary, &options)?;
    clean_fem_preg(df)
}

/// Recodes pregnancy variables the analyses rely on.
///
/// - `agepreg` from centiyears to years
/// - `birthwgt_lb` above 20 or a not-ascertained code (97, 98, 99) becomes null
/// - `birthwgt_oz` and `hpagelb` not-ascertained codes become null
/// - `babysex` codes 7 and 9, and `nbrnaliv` code 9, become null
/// - `totalwgt_lb` is derived from pounds and ounces
/// - `cmintvw` is blanked
///
/// Each step is skipped when its column is absent.
pub fn clean_fem_preg(mut df: DataFrame) -> Result<DataFrame> {
    if df.column("agepreg").is_ok() {
        centiyears_to_years(&mut df, "agepreg")?;
    }
    let has = |name: &str| df.column(name).is_ok();
    let has_lb = has("birthwgt_lb");
    let has_oz = has("birthwgt_oz");
    let mut steps: Vec<Expr> = Vec::new();

    if has_lb {
        let implausible = col("birthwgt_lb").gt(lit(20)).or(any_of("birthwgt_lb", &[97, 98, 99]));
        steps.push(null_when("birthwgt_lb", implausible));
    }
    for name in ["birthwgt_oz", "hpagelb"] {
        if has(name) {
            steps.push(null_when(name, any_of(name, &[97, 98, 99])));
        }
    }
    if has("babysex") {
        steps.push(null_when("babysex", any_of("babysex", &[7, 9])));
    }
    if has("nbrnaliv") {
        steps.push(null_when("nbrnaliv", any_of("nbrnaliv", &[9])));
    }
    if has_lb && has_oz {
        steps.push(
            (col("birthwgt_lb").cast(DataType::Float64)
                + col("birthwgt_oz").cast(DataType::Float64) / lit(16.0))
            .alias("totalwgt_lb"),
        );
    }
    if has("cmintvw") {
        steps.push(lit(NULL).cast(DataType::Float64).alias("cmintvw"));
    }

    debug!(steps = steps.len(), "cleaning pregnancy frame");
    // Sequential `with_column` calls so `totalwgt_lb` sees the recoded weights.
    let mut lazy = df.lazy();
    for step in steps {
        lazy = lazy.with_column(step);
    }
    Ok(lazy.collect()?)
}

/// Divides element-wise. A lazy `/ lit(100.0)` is rewritten to a multiply by
/// 0.01, which is off by one ulp for values like 3316.
fn centiyears_to_years(df: &mut DataFrame, name: &str) -> Result<()> {
    let years = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?
        .f64()?
        .apply_values(|centiyears| centiyears / 100.0)
        .into_series();
    df.with_column(years)?;
    Ok(())
}

fn any_of(name: &str, codes: &[i64]) -> Expr {
    codes
        .iter()
        .map(|code| col(name).eq(lit(*code)))
        .reduce(Expr::or)
        .unwrap_or_else(|| lit(false))
}

fn null_when(name: &str, condition: Expr) -> Expr {
    when(condition)
        .then(lit(NULL))
        .otherwise(col(name))
        .alias(name)
}

/// Maps each case identifier to the row indices of its pregnancy records.
pub fn make_preg_map(df: &DataFrame) -> Result<PregnancyMap> {
    let caseids = column(df, CASEID)?;
    let mut map = PregnancyMap::new();
    for row in 0..df.height() {
        let case_id = any_to_string(caseids.get(row)?).ok_or_else(|| IngestError::InvalidValue {
            column: CASEID.to_string(),
            value: String::new(),
            row,
        })?;
        map.push(CaseId::new(case_id), row);
    }
    info!(
        cases = map.len(),
        records = map.record_count(),
        "built pregnancy map"
    );
    Ok(map)
}

/// Extracts typed respondent records in row order.
///
/// A null `caseid`, or a null or negative `pregnum`, is rejected.
pub fn respondents_from_frame(df: &DataFrame) -> Result<Vec<Respondent>> {
    let caseids = column(df, CASEID)?;
    let pregnums = column(df, PREGNUM)?;
    let mut respondents = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let case_id = any_to_string(caseids.get(row)?).ok_or_else(|| IngestError::InvalidValue {
            column: CASEID.to_string(),
            value: String::new(),
            row,
        })?;
        let raw = pregnums.get(row)?;
        let pregnum = any_to_i64(raw.clone())
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| IngestError::InvalidValue {
                column: PREGNUM.to_string(),
                value: any_to_string(raw).unwrap_or_default(),
                row,
            })?;
        respondents.push(Respondent::new(CaseId::new(case_id), pregnum));
    }
    Ok(respondents)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })
}
