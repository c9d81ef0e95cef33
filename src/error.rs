//! Errors surfaced by the scope lookup machinery.

use thiserror::Error;

/// Errors that can occur when a consumer resolves a store through its
/// enclosing [Scope](crate::Scope).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    /// The consumer was mounted outside any
    /// [ScopeProvider](crate::ScopeProvider), so there is no store to
    /// resolve. Reported before any subscription side effect occurs.
    #[error("no store in scope; mount the consumer beneath a ScopeProvider")]
    MissingScope,
}
