use casegrid_assign::AssignError;
use casegrid_ir::ParseError;

/// Errors raised while building a generator, before any enumeration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to decode candidates for field '{field}': {source}")]
    Decode {
        field: String,
        #[source]
        source: ParseError,
    },

    #[error("field '{field}' is registered more than once")]
    DuplicateField { field: String },

    #[error("candidate table yields {total} combinations, above the limit of {limit}")]
    TooManyCombinations { total: u64, limit: u64 },

    #[error("candidate table combination count overflows u64")]
    CombinationOverflow,

    #[error("invalid generator config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal conditions reported to a [`FailureSink`](crate::sink::FailureSink).
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("field '{field}': {source}")]
    Assign {
        field: String,
        #[source]
        source: AssignError,
    },
}

impl GenError {
    /// The field the error is attributed to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            GenError::Assign { field, .. } => Some(field),
            GenError::Config(ConfigError::Decode { field, .. })
            | GenError::Config(ConfigError::DuplicateField { field }) => Some(field),
            GenError::Config(_) => None,
        }
    }
}
