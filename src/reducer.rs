use std::rc::Rc;

/// Using the [reduce()](Reducer::reduce()) method, implementors of
/// this trait take an `Action` submitted to a store via
/// [Store::dispatch()](crate::Store::dispatch()) and produce the next
/// `State` from the previous one.
///
/// A reducer must be a pure function of its two arguments: no side
/// effects, no hidden inputs. An `Action` the reducer does not
/// recognize must leave the state unchanged in meaning. The previous
/// state is never mutated in place; each accepted action produces a
/// new value (structural sharing through `Rc` fields is fine, full
/// copies are not required). A reducer must also not retain references
/// into the previous state that it later mutates, since consumers may
/// still be holding that state.
pub trait Reducer<State, Action> {
    fn reduce(&self, prev_state: &Rc<State>, action: &Action) -> Rc<State>;
}

impl<State, Action, F> Reducer<State, Action> for F
where
    F: Fn(&Rc<State>, &Action) -> Rc<State>,
{
    fn reduce(&self, prev_state: &Rc<State>, action: &Action) -> Rc<State> {
        self(prev_state, action)
    }
}

/// A [Reducer] composed of multiple reducers, applied left to right
/// over the same `Action`.
pub struct CompositeReducer<State, Action> {
    reducers: Vec<Box<dyn Reducer<State, Action>>>,
}

impl<State, Action> CompositeReducer<State, Action> {
    /// Create a new [CompositeReducer].
    pub fn new(reducers: Vec<Box<dyn Reducer<State, Action>>>) -> Self {
        CompositeReducer { reducers }
    }
}

impl<State, Action> Reducer<State, Action> for CompositeReducer<State, Action> {
    fn reduce(&self, prev_state: &Rc<State>, action: &Action) -> Rc<State> {
        let mut state = prev_state.clone();

        for reducer in &self.reducers {
            state = reducer.reduce(&state, action);
        }

        state
    }
}
