use thiserror::Error;

/// Unified error type for loading rule definitions.
///
/// Returned by [`LogicDefs::from_json()`](crate::LogicDefs::from_json) and
/// [`LogicDefs::from_file()`](crate::LogicDefs::from_file). Evaluation itself
/// never fails: malformed rules evaluate to `false` or are skipped.
#[derive(Debug, Error)]
pub enum FormLogicError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogicDefs;

    #[test]
    fn invalid_json_is_an_error() {
        let err = LogicDefs::from_json("{\"fields\": ").unwrap_err();
        assert!(matches!(err, FormLogicError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LogicDefs::from_file("/nonexistent/formlogic/defs.json").unwrap_err();
        assert!(matches!(err, FormLogicError::Io(_)));
    }

    #[test]
    fn wrong_shape_is_not_an_error() {
        let defs = LogicDefs::from_json("[\"not\", \"an\", \"object\"]").unwrap();
        assert!(defs.is_empty());
    }
}
