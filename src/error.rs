use crate::value::ParseError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("too many dice rolled")]
    QuotaExhausted,
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl RollError {
    pub fn invalid(msg: impl ToString) -> Self {
        Self::InvalidArgument(msg.to_string())
    }
}
