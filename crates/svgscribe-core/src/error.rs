use crate::dom::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

/// Which attribute grammar rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    InvalidLength,
    InvalidColor,
    InvalidPath,
    InvalidTransform,
    InvalidNumberList,
}

impl FormatErrorKind {
    fn describe(self) -> &'static str {
        match self {
            FormatErrorKind::InvalidLength => "invalid length",
            FormatErrorKind::InvalidColor => "invalid color",
            FormatErrorKind::InvalidPath => "invalid path data",
            FormatErrorKind::InvalidTransform => "invalid transform list",
            FormatErrorKind::InvalidNumberList => "invalid number list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {input:?}", kind.describe())]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub input: String,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
        }
    }

    pub fn length(input: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidLength, input)
    }

    pub fn color(input: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidColor, input)
    }

    pub fn path(input: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidPath, input)
    }

    pub fn transform(input: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidTransform, input)
    }

    pub fn number_list(input: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidNumberList, input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeStructureError {
    #[error("node {child} already has parent {parent}")]
    AlreadyParented { child: NodeId, parent: NodeId },

    #[error("attaching node {child} under {parent} would create a cycle")]
    Cycle { child: NodeId, parent: NodeId },

    #[error("node {node} does not belong to this document")]
    UnknownNode { node: NodeId },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed markup: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("attribute {attribute:?} on <{tag}>: {source}")]
    Format {
        tag: String,
        attribute: String,
        #[source]
        source: FormatError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Tree(#[from] TreeStructureError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display_names_kind_and_input() {
        let err = FormatError::color("#12");
        assert_eq!(err.to_string(), r##"invalid color: "#12""##);
        assert_eq!(err.kind, FormatErrorKind::InvalidColor);
    }

    #[test]
    fn tree_error_display_mentions_both_nodes() {
        let err = TreeStructureError::AlreadyParented {
            child: NodeId::from_index(3),
            parent: NodeId::from_index(1),
        };
        assert_eq!(err.to_string(), "node #3 already has parent #1");
    }
}
