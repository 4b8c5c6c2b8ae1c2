use thiserror::Error;

/// Failures while building a tree from a parent-index encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("values has {values} elements and parents has {parents} elements")]
    ShapeMismatch { values: usize, parents: usize },

    #[error("no root: no element has parent index -1")]
    MissingRoot,

    #[error("multiple roots: elements {first} and {second} both have parent index -1")]
    MultipleRoots { first: usize, second: usize },

    #[error("element {index} has unresolvable parent index {parent}")]
    DanglingParent { index: usize, parent: i64 },

    #[error("duplicate value '{value}' at elements {first} and {second}")]
    DuplicateValue {
        value: String,
        first: usize,
        second: usize,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Failures while writing or reading the path-per-line format.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("line {line}: path cannot be resolved against the tree read so far: '{text}'")]
    OrphanLine { line: usize, text: String },

    #[error("line {line}: {reason}")]
    EmptyOrMalformedLine { line: usize, reason: String },

    #[error("value '{value}' cannot be written as a single token")]
    UnencodableValue { value: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
