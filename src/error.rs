use thiserror::Error;

/// Errors raised by the algorithms in this crate.
///
/// `InvalidArgument` and `OutOfRange` are caller errors and are reported before
/// any computation starts. `InternalInconsistency` means an algorithmic invariant
/// broke, which only happens on a bug or on a malformed custom edge type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Invalid argument `{arg}`: {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
    #[error("Index {index} of `{arg}` is out of range (length {len})")]
    OutOfRange {
        arg: &'static str,
        index: usize,
        len: usize,
    },
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl GraphError {
    pub(crate) fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        GraphError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(arg: &'static str, index: usize, len: usize) -> Self {
        GraphError::OutOfRange { arg, index, len }
    }

    pub(crate) fn inconsistent(msg: impl Into<String>) -> Self {
        GraphError::InternalInconsistency(msg.into())
    }
}
