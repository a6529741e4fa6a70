use std::fmt;

/// Respondent case identifier (`caseid`).
///
/// Both NSFG dictionaries declare `caseid` as a padded `str12` field, so the
/// identifier is kept as trimmed text and compared as such.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for CaseId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}
