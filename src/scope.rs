use crate::{ScopeError, StoreRef};

/// Associates one [StoreRef] with a subtree of consumers for as long
/// as the provider is mounted.
///
/// The provider holds a reference only: it never creates or disposes
/// of the store, which may outlive the provider or be shared across
/// several unrelated providers. Rendering is pass-through, the
/// provider contributes no output of its own; its whole job is to
/// hand out [Scope]s that resolve to its store.
pub struct ScopeProvider<State, Action> {
    store: StoreRef<State, Action>,
}

impl<State, Action> ScopeProvider<State, Action> {
    pub fn new(store: StoreRef<State, Action>) -> Self {
        ScopeProvider { store }
    }

    /// The store this provider exposes.
    pub fn store(&self) -> &StoreRef<State, Action> {
        &self.store
    }

    /// The binding a host threads through this provider's subtree.
    ///
    /// Every consumer handed this scope resolves this provider's
    /// store. A provider mounted beneath another shadows the outer
    /// binding for its own subtree: descendants see the nearest
    /// enclosing provider, because that is the scope the host hands
    /// them. Remounting a provider with a different store reference
    /// yields scopes resolving to the new store.
    pub fn scope(&self) -> Scope<State, Action> {
        Scope {
            store: Some(self.store.clone()),
        }
    }
}

/// The capability a consumer uses to reach the nearest enclosing
/// provider's store.
///
/// Hosts pass a scope down the consumer tree instead of threading the
/// store itself through every level of props. Scopes are plain
/// values, not a process-wide registry, so independent trees with
/// independent stores coexist without interference. Outside any
/// provider the scope is empty and lookups fail with
/// [ScopeError::MissingScope].
pub struct Scope<State, Action> {
    store: Option<StoreRef<State, Action>>,
}

impl<State, Action> Scope<State, Action> {
    /// The scope in effect outside any [ScopeProvider].
    pub fn empty() -> Self {
        Scope { store: None }
    }

    /// Resolve the nearest enclosing provider's store.
    pub fn store(&self) -> Result<&StoreRef<State, Action>, ScopeError> {
        self.store.as_ref().ok_or(ScopeError::MissingScope)
    }
}
