use thiserror::Error;

/// Errors reported by fallible [`AvlTree`](crate::AvlTree) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    /// Node storage could not grow. The tree is left unchanged.
    #[error("node allocation failed")]
    AllocationFailed,
    /// A value comparing equal to the inserted one is already stored.
    #[error("duplicate key")]
    DuplicateKey,
    /// The output collector refused a value during a bulk operation.
    ///
    /// `appended` values made it into the collector before the refusal,
    /// out of `matched` values selected by the predicate.
    #[error("collector rejected value after {appended} of {matched} matches")]
    CollectorRejected { appended: usize, matched: usize },
}
