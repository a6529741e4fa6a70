use thiserror::Error;

use crate::ids::CaseId;

/// Errors raised by model lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A case identifier has no entry in the pregnancy map.
    #[error("case {case_id} not found in pregnancy map")]
    MissingCase { case_id: CaseId },
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_case_display() {
        let err = ModelError::MissingCase {
            case_id: CaseId::new("2298"),
        };
        assert_eq!(err.to_string(), "case 2298 not found in pregnancy map");
    }
}
