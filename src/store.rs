use crate::{
    listener::{ListenerEntry, ListenerList},
    Listener, Reducer, Subscription,
};
use std::{
    cell::{Cell, RefCell},
    ops::Deref,
    rc::Rc,
};

/// A wrapper for an [Rc] reference to a [Store].
///
/// This wrapper exists to provide a standard interface for components
/// which require a long living reference to the store, such as a
/// [ScopeProvider](crate::ScopeProvider) or a consumer mounted with
/// [connect()](crate::connect()).
pub struct StoreRef<State, Action>(Rc<Store<State, Action>>);

impl<State, Action> StoreRef<State, Action> {
    pub fn new<R: Reducer<State, Action> + 'static>(reducer: R, initial_state: State) -> Self {
        StoreRef(Rc::new(Store::new(reducer, initial_state)))
    }

    /// Create a store with `State::default()` as the initial state,
    /// for callers which have no initial value of their own.
    pub fn with_default<R: Reducer<State, Action> + 'static>(reducer: R) -> Self
    where
        State: Default,
    {
        StoreRef(Rc::new(Store::with_default(reducer)))
    }

    /// A dispatch-only capability for this store, the value handed to
    /// [MapDispatchToProps](crate::MapDispatchToProps) so derived
    /// props can carry handlers without being granted access to
    /// [state()](Store::state()) or [subscribe()](Store::subscribe()).
    pub fn dispatcher(&self) -> Dispatcher<State, Action> {
        Dispatcher(self.0.clone())
    }
}

impl<State, Action> Clone for StoreRef<State, Action> {
    fn clone(&self) -> Self {
        StoreRef(self.0.clone())
    }
}

impl<State, Action> Deref for StoreRef<State, Action> {
    type Target = Store<State, Action>;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl<State, Action> PartialEq for StoreRef<State, Action> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A clonable capability granting only
/// [dispatch()](Dispatcher::dispatch()) on the underlying [Store].
pub struct Dispatcher<State, Action>(Rc<Store<State, Action>>);

impl<State, Action> Dispatcher<State, Action> {
    pub fn dispatch<A: Into<Action>>(&self, action: A) {
        self.0.dispatch(action);
    }
}

impl<State, Action> Clone for Dispatcher<State, Action> {
    fn clone(&self) -> Self {
        Dispatcher(self.0.clone())
    }
}

/// This struct is designed to operate as a central source of truth and
/// "immutable" state within your application.
///
/// The current state of this store ([Store::state()]) can only be
/// replaced by dispatching an `Action` via [Store::dispatch()] to the
/// store. Actions are taken by the [Reducer] which you provided to the
/// store (at construction) and a new current state is produced. The
/// previous state is never mutated, and remains valid for any part of
/// your application which may still hold a reference to it.
///
/// Listeners subscribe to changes with [Store::subscribe()] and are
/// notified after every accepted dispatch, in subscription order.
pub struct Store<State, Action> {
    /// The [Reducer] for this store, which takes `Action`s and the
    /// current `State` and produces the next `State`.
    reducer: Box<dyn Reducer<State, Action>>,
    /// The current state of this store.
    state: RefCell<Rc<State>>,
    /// The ordered listener registrations which are notified after
    /// every accepted dispatch. Shared with the [Subscription] handles
    /// so they can remove their own registration.
    listeners: ListenerList,
    /// Source of per-registration ids, used by [Subscription] for
    /// identity based removal.
    next_listener_id: Cell<u64>,
}

impl<State, Action> Store<State, Action> {
    /// Create a new [Store], which uses the specified `reducer` to
    /// handle `Action`s which replace the state, starting from
    /// `initial_state`.
    pub fn new<R: Reducer<State, Action> + 'static>(reducer: R, initial_state: State) -> Self {
        Self {
            reducer: Box::new(reducer),
            state: RefCell::new(Rc::new(initial_state)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    /// Create a new [Store] with `State::default()` as the initial
    /// state.
    pub fn with_default<R: Reducer<State, Action> + 'static>(reducer: R) -> Self
    where
        State: Default,
    {
        Self::new(reducer, State::default())
    }

    /// Get the current `State` stored in this store.
    ///
    /// Modifications to this state need to be performed by dispatching
    /// an `Action` to the store using [dispatch()](Store::dispatch()).
    pub fn state(&self) -> Rc<State> {
        self.state.borrow().clone()
    }

    /// Dispatch an `Action` to be passed to the [Reducer] in order to
    /// produce the next `State` in this store, then notify listeners.
    ///
    /// The reduce and the notification pass run synchronously to
    /// completion before this returns. Listeners are invoked in
    /// subscription order, with no arguments, and notification happens
    /// on every dispatch, with no equality check between the previous
    /// and next states. Exactly the registrations present when the
    /// dispatch began are notified: a listener subscribed from inside
    /// a callback first fires on the following dispatch, and an
    /// unsubscribe from inside a callback takes effect on the
    /// following dispatch. A dispatch issued from inside a listener
    /// callback recurses, running its own reduce and notification pass
    /// to completion before the outer pass resumes.
    ///
    /// A panic in the reducer propagates to the caller of `dispatch`;
    /// the stored state is left as it was and no listener is notified.
    pub fn dispatch<A: Into<Action>>(&self, action: A) {
        self.dispatch_impl(action.into());
    }

    /// Concrete version of [Store::dispatch()], so that only one copy
    /// of the dispatch machinery is generated per store type rather
    /// than one per `Into<Action>` implementor.
    fn dispatch_impl(&self, action: Action) {
        let next_state = {
            let prev_state = self.state.borrow().clone();
            self.reducer.reduce(&prev_state, &action)
        };

        *self.state.borrow_mut() = next_state;

        self.notify_listeners();
    }

    /// Notify store listeners that a dispatch replaced the state.
    fn notify_listeners(&self) {
        // Snapshot the registrations so a subscribe or unsubscribe
        // from inside a callback cannot invalidate the iteration; the
        // pass notifies exactly the registrations present when it
        // started.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|entry| entry.listener.clone())
            .collect();

        log::trace!("notifying {} listener(s)", snapshot.len());

        for listener in snapshot {
            listener.emit();
        }
    }

    /// Subscribe a [Listener] to changes in the store state caused by
    /// `Action`s dispatched via [dispatch()](Store::dispatch()).
    ///
    /// The returned [Subscription] is the only way to remove the
    /// registration; keep hold of it for as long as the listener
    /// should stay subscribed. Subscribing the same callback more than
    /// once creates independent registrations, each firing once per
    /// dispatch and each removed by its own handle.
    pub fn subscribe<L: Into<Listener>>(&self, listener: L) -> Subscription {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);

        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            listener: listener.into(),
        });
        log::trace!("listener {} subscribed", id);

        Subscription::new(&self.listeners, id)
    }
}
