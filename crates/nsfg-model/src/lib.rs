//! Data model types for the National Survey of Family Growth (NSFG).
//!
//! # Module Organization
//!
//! - [`ids`]: Case identifiers shared by the respondent and pregnancy files
//! - [`respondent`]: Typed respondent records and `pregnum` summaries
//! - [`pregnancy`]: Case-to-pregnancy-index mapping
//! - [`dictionary`]: Stata dictionary layout (column spans and types)

pub mod dictionary;
pub mod error;
pub mod ids;
pub mod pregnancy;
pub mod respondent;

pub use dictionary::{Dictionary, Variable, VariableType};
pub use error::{ModelError, Result};
pub use ids::CaseId;
pub use pregnancy::PregnancyMap;
pub use respondent::{Respondent, value_counts};
