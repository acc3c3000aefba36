use crate::value::{DynValue, ValueError};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("candidate literal must be an array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("invalid candidate value: {0}")]
    Value(#[from] ValueError),
}

/// Decode a candidate literal (a JSON array) into its ordered candidates.
pub fn parse_candidates(literal: &str) -> Result<Vec<DynValue>, ParseError> {
    let json: serde_json::Value = serde_json::from_str(literal)?;
    match json {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| DynValue::try_from(item).map_err(ParseError::from))
            .collect(),
        other => Err(ParseError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
