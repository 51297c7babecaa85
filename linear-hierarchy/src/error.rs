//! Error types

/// Errors raised by the navigator.
///
/// Configuration errors indicate a host-integration bug (missing cell
/// registration, malformed hierarchy document) and are surfaced immediately.
/// Programmer errors indicate a bad request against the current level.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    /// The cell provider's reuse identifier has no registered cell type.
    #[error("No cell registered for reuse identifier '{identifier}'")]
    UnregisteredCell { identifier: String },

    /// A node in the hierarchy document is missing a key or has a bad value.
    #[error("Malformed node at {path}: {reason}")]
    MalformedNode { path: String, reason: String },

    /// A node declares a type other than `static` or `dynamic`.
    #[error("Unknown node type '{value}' at {path}")]
    UnknownNodeType { path: String, value: String },

    /// The document or configuration is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The index does not address an item at the current level.
    #[error("Index {index} out of range for level with {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Expansion was requested for a leaf node.
    #[error("Node '{name}' has no children to expand")]
    NotExpandable { name: String },

    /// The current level does not accept dynamic nodes.
    #[error("Current level is not editable")]
    NotEditable,

    /// Only dynamic nodes may be removed at navigation time.
    #[error("Node '{name}' is static and cannot be removed")]
    StaticNode { name: String },
}

impl HierarchyError {
    /// Creates a new unregistered cell error.
    pub fn unregistered(identifier: impl Into<String>) -> Self {
        Self::UnregisteredCell {
            identifier: identifier.into(),
        }
    }

    /// Creates a new malformed node error.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by host integration rather than by a
    /// request against the current level.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredCell { .. }
                | Self::MalformedNode { .. }
                | Self::UnknownNodeType { .. }
                | Self::Json(_)
                | Self::InvalidColor(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
