use thiserror::Error;

/// Why a `matches` pattern could not be turned into a regex.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("not a regex literal: {0}")]
    NotALiteral(String),

    #[error("unsupported regex flag '{0}'")]
    UnsupportedFlag(char),

    #[error("duplicate regex flag '{0}'")]
    DuplicateFlag(char),

    #[error(transparent)]
    Compile(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_literal_message() {
        let err = PatternError::NotALiteral("acme".into());
        assert_eq!(err.to_string(), "not a regex literal: acme");
    }

    #[test]
    fn flag_messages() {
        assert_eq!(
            PatternError::UnsupportedFlag('x').to_string(),
            "unsupported regex flag 'x'"
        );
        assert_eq!(
            PatternError::DuplicateFlag('i').to_string(),
            "duplicate regex flag 'i'"
        );
    }
}
