use thiserror::Error;

/// Failures that leave a game or plate appearance without a field that
/// aggregation depends on. Wrapped in `anyhow::Error` with file context as it
/// propagates; callers can recover it with `downcast_ref`.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ParseError {
    #[error("Missing required field `{field}` (line {line:?}: {raw})")]
    MissingField {
        field: &'static str,
        line: Option<u64>,
        raw: String,
    },

    #[error("Game group contains no records to derive a game id from")]
    EmptyGroup,
}

impl ParseError {
    pub fn missing(field: &'static str, line: Option<u64>, raw: impl Into<String>) -> Self {
        Self::MissingField {
            field,
            line,
            raw: raw.into(),
        }
    }
}
