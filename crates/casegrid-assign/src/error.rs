use std::fmt;

use casegrid_ir::Shape;

/// Position inside a nested destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Index(usize),
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Key(k) => write!(f, "[{k:?}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
    #[error("cannot convert value '{value}' of type '{source_type}' to type '{dest_type}'")]
    Conversion {
        value: String,
        source_type: &'static str,
        dest_type: String,
    },

    #[error("cannot assign {found} type '{source_type}' to {expected} type '{dest_type}'")]
    ShapeMismatch {
        expected: Shape,
        found: Shape,
        source_type: &'static str,
        dest_type: String,
    },

    #[error("at {segment}: {source}")]
    At {
        segment: Segment,
        source: Box<AssignError>,
    },
}

impl AssignError {
    /// Wrap this error with the position it occurred at.
    pub fn at(self, segment: Segment) -> Self {
        AssignError::At {
            segment,
            source: Box::new(self),
        }
    }

    /// The innermost error, with positional wrappers stripped.
    pub fn root(&self) -> &AssignError {
        match self {
            AssignError::At { source, .. } => source.root(),
            other => other,
        }
    }

    /// Path from the field root to the failing value, e.g. `[1]["key"]`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut current = self;
        while let AssignError::At { segment, source } = current {
            path.push_str(&segment.to_string());
            current = source;
        }
        path
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self.root(), AssignError::ShapeMismatch { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self.root(), AssignError::Conversion { .. })
    }
}
