//! NSFG data ingestion utilities.
//!
//! This crate loads the fixed-width NSFG release files into Polars
//! DataFrames and derives the typed structures the validator works on.
//!
//! # Features
//!
//! - **Dictionaries**: Parse Stata `infile dictionary` files into column layouts
//! - **Fixed-width reading**: Slice plain or gzip-compressed records by dictionary
//! - **NSFG loaders**: Respondent and pregnancy files with their default names
//! - **Pregnancy map**: Case identifier to pregnancy row indices
//!
//! # Example
//!
//! ```ignore
//! use nsfg_ingest::{PregnancySource, RespondentSource, read_fem_preg, read_fem_resp};
//! use nsfg_ingest::{make_preg_map, respondents_from_frame};
//!
//! let resp = read_fem_resp(&RespondentSource::in_dir("data"))?;
//! let respondents = respondents_from_frame(&resp)?;
//! let preg = read_fem_preg(&PregnancySource::in_dir("data"))?;
//! let preg_map = make_preg_map(&preg)?;
//! ```

mod dictionary;
mod error;
mod fixed_width;
mod frame;
mod nsfg;

// === Error Types ===
pub use error::{IngestError, Result};

// === Dictionaries ===
pub use dictionary::{parse_dictionary, read_dictionary};

// === Fixed-Width Reading ===
pub use fixed_width::{Compression, FixedWidthOptions, read_fixed_width, read_fixed_width_from};

// === NSFG Loaders ===
pub use nsfg::{
    DEFAULT_PREG_DAT, DEFAULT_PREG_DCT, DEFAULT_RESP_DAT, DEFAULT_RESP_DCT, PregnancySource,
    RespondentSource, clean_fem_preg, make_preg_map, read_fem_preg, read_fem_resp,
    respondents_from_frame,
};

// === Frame Helpers ===
pub use frame::{any_to_i64, any_to_string};
