use crate::{Dispatcher, Listener, Scope, ScopeError, StoreRef, Subscription};
use std::rc::Rc;

/// A pure presentational view: a function from a bag of input
/// properties to a description of visual output.
///
/// The rendering runtime owns turning descriptions into screen
/// updates; this crate only produces the descriptions.
pub trait View {
    type Props;
    type Output;

    fn render(&self, props: Self::Props) -> Self::Output;
}

/// The property bag delivered to a connected view on every render.
///
/// The fragments derived from the store arrive in their own fields,
/// next to the consumer's own props, so a store-derived value can
/// never be shadowed by an identically named own prop.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProps<S, D, O> {
    /// The fragment computed by [MapStateToProps] from the current
    /// store state.
    pub from_state: S,
    /// The fragment computed by [MapDispatchToProps], conventionally
    /// handlers which dispatch constructed actions.
    pub from_dispatch: D,
    /// The props the consumer was mounted with.
    pub own: O,
}

/// Derives a props fragment from the current store state and the
/// consumer's own props.
pub struct MapStateToProps<State, Own, S>(fn(&Rc<State>, &Own) -> S);

impl<State, Own, S> MapStateToProps<State, Own, S> {
    pub fn new(function: fn(&Rc<State>, &Own) -> S) -> Self {
        Self(function)
    }

    pub fn perform(&self, state: &Rc<State>, own_props: &Own) -> S {
        (self.0)(state, own_props)
    }
}

impl<State, Own, S> Clone for MapStateToProps<State, Own, S> {
    fn clone(&self) -> Self {
        MapStateToProps(self.0)
    }
}

impl<State, Own, S> PartialEq for MapStateToProps<State, Own, S> {
    fn eq(&self, other: &Self) -> bool {
        (self.0 as *const ()) == (other.0 as *const ())
    }
}

impl<State, Own, S> std::fmt::Debug for MapStateToProps<State, Own, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapStateToProps(function @ {:p})", self.0 as *const ())
    }
}

/// Derives a props fragment from the store's dispatch capability and
/// the consumer's own props.
pub struct MapDispatchToProps<State, Action, Own, D>(fn(&Dispatcher<State, Action>, &Own) -> D);

impl<State, Action, Own, D> MapDispatchToProps<State, Action, Own, D> {
    pub fn new(function: fn(&Dispatcher<State, Action>, &Own) -> D) -> Self {
        Self(function)
    }

    pub fn perform(&self, dispatcher: &Dispatcher<State, Action>, own_props: &Own) -> D {
        (self.0)(dispatcher, own_props)
    }
}

impl<State, Action, Own, D> Clone for MapDispatchToProps<State, Action, Own, D> {
    fn clone(&self) -> Self {
        MapDispatchToProps(self.0)
    }
}

impl<State, Action, Own, D> PartialEq for MapDispatchToProps<State, Action, Own, D> {
    fn eq(&self, other: &Self) -> bool {
        (self.0 as *const ()) == (other.0 as *const ())
    }
}

impl<State, Action, Own, D> std::fmt::Debug for MapDispatchToProps<State, Action, Own, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapDispatchToProps(function @ {:p})", self.0 as *const ())
    }
}

/// Capture the two mapping functions of a binding adapter; the
/// returned value [wraps](Connect::wrap) a [View] into a connectable
/// consumer.
pub fn connect<State, Action, Own, S, D>(
    map_state_to_props: MapStateToProps<State, Own, S>,
    map_dispatch_to_props: MapDispatchToProps<State, Action, Own, D>,
) -> Connect<State, Action, Own, S, D> {
    Connect {
        map_state_to_props,
        map_dispatch_to_props,
    }
}

/// The first stage of [connect()], holding the mapping functions.
pub struct Connect<State, Action, Own, S, D> {
    map_state_to_props: MapStateToProps<State, Own, S>,
    map_dispatch_to_props: MapDispatchToProps<State, Action, Own, D>,
}

impl<State, Action, Own, S, D> Connect<State, Action, Own, S, D> {
    /// Wrap a pure view, producing a consumer which can be
    /// [mounted](Connected::mount) under a
    /// [ScopeProvider](crate::ScopeProvider).
    pub fn wrap<V>(self, view: V) -> Connected<State, Action, Own, S, D, V>
    where
        V: View<Props = ViewProps<S, D, Own>>,
    {
        Connected {
            map_state_to_props: self.map_state_to_props,
            map_dispatch_to_props: self.map_dispatch_to_props,
            view: Rc::new(view),
        }
    }
}

/// A consumer produced by wrapping a pure [View] with [connect()].
///
/// The value itself is stateless and can mount any number of
/// instances; all per-instance state lives in the [MountedView] each
/// [mount()](Connected::mount) call returns.
pub struct Connected<State, Action, Own, S, D, V> {
    map_state_to_props: MapStateToProps<State, Own, S>,
    map_dispatch_to_props: MapDispatchToProps<State, Action, Own, D>,
    view: Rc<V>,
}

impl<State, Action, Own, S, D, V> Connected<State, Action, Own, S, D, V>
where
    V: View<Props = ViewProps<S, D, Own>>,
{
    /// Mount an instance of this consumer into `scope`.
    ///
    /// The nearest enclosing provider's store is resolved first, so
    /// mounting outside any provider fails with
    /// [ScopeError::MissingScope] before any subscription exists.
    /// `request_rerender` is the opaque re-render capability granted
    /// by the rendering runtime for this instance; it is subscribed to
    /// the store and invoked on every dispatch until unmount. Whether
    /// the derived props actually changed is not checked here, every
    /// notification is a re-render request.
    pub fn mount<L: Into<Listener>>(
        &self,
        scope: &Scope<State, Action>,
        own_props: Own,
        request_rerender: L,
    ) -> Result<MountedView<State, Action, Own, S, D, V>, ScopeError> {
        let store = scope.store()?.clone();
        let subscription = store.subscribe(request_rerender);

        Ok(MountedView {
            store,
            own_props,
            map_state_to_props: self.map_state_to_props.clone(),
            map_dispatch_to_props: self.map_dispatch_to_props.clone(),
            view: self.view.clone(),
            subscription,
        })
    }
}

/// One mounted instance of a [Connected] consumer.
///
/// The store subscription lives exactly as long as the instance:
/// dropping it on any teardown path removes the registration, so a
/// torn-down instance can never be re-rendered by a later dispatch.
pub struct MountedView<State, Action, Own, S, D, V> {
    store: StoreRef<State, Action>,
    own_props: Own,
    map_state_to_props: MapStateToProps<State, Own, S>,
    map_dispatch_to_props: MapDispatchToProps<State, Action, Own, D>,
    view: Rc<V>,
    subscription: Subscription,
}

impl<State, Action, Own, S, D, V> MountedView<State, Action, Own, S, D, V> {
    /// Compute the view's props from the current store state, the
    /// dispatch capability and the own props, then render the wrapped
    /// view.
    pub fn render(&self) -> V::Output
    where
        Own: Clone,
        V: View<Props = ViewProps<S, D, Own>>,
    {
        let state = self.store.state();
        let from_state = self.map_state_to_props.perform(&state, &self.own_props);
        let from_dispatch = self
            .map_dispatch_to_props
            .perform(&self.store.dispatcher(), &self.own_props);

        self.view.render(ViewProps {
            from_state,
            from_dispatch,
            own: self.own_props.clone(),
        })
    }

    /// Tear the instance down, removing its store registration.
    ///
    /// Equivalent to dropping the instance; this method exists so
    /// hosts can make the unmount point explicit.
    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}
