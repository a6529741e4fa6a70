//! Consistency checks between the NSFG respondent and pregnancy files.
//!
//! The respondent file carries a self-reported pregnancy count (`pregnum`);
//! the pregnancy file carries one record per pregnancy. For a correctly
//! paired release, every respondent's `pregnum` equals the number of
//! pregnancy records filed under their case identifier.

mod issue;
mod pregnum;

pub use issue::PregnumMismatch;
pub use pregnum::{find_pregnum_mismatches, first_pregnum_mismatch, validate_pregnum};
