//! End-to-end exercise of the store / provider / connect triad with a
//! small to-do list application.

use scoped_state::{
    connect, Dispatcher, MapDispatchToProps, MapStateToProps, ScopeProvider, StoreRef, View,
    ViewProps,
};
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Default, PartialEq)]
struct TodoList {
    todos: Vec<String>,
}

#[derive(Clone)]
enum TodoAction {
    Add(String),
    Remove(usize),
}

fn todo_reducer(prev_state: &Rc<TodoList>, action: &TodoAction) -> Rc<TodoList> {
    match action {
        TodoAction::Add(text) => {
            let mut todos = prev_state.todos.clone();
            todos.push(text.clone());
            Rc::new(TodoList { todos })
        }
        TodoAction::Remove(index) => {
            if *index >= prev_state.todos.len() {
                return prev_state.clone();
            }
            let mut todos = prev_state.todos.clone();
            todos.remove(*index);
            Rc::new(TodoList { todos })
        }
    }
}

struct TodoControls {
    add: Box<dyn Fn(&str)>,
}

fn todos_to_props(state: &Rc<TodoList>, _own: &()) -> Vec<String> {
    state.todos.clone()
}

fn controls_to_props(dispatcher: &Dispatcher<TodoList, TodoAction>, _own: &()) -> TodoControls {
    let dispatcher = dispatcher.clone();
    TodoControls {
        add: Box::new(move |text| dispatcher.dispatch(TodoAction::Add(text.to_string()))),
    }
}

/// Returns its props untouched so the tests can inspect the derived
/// fragments directly.
struct TodoView;

impl View for TodoView {
    type Props = ViewProps<Vec<String>, TodoControls, ()>;
    type Output = ViewProps<Vec<String>, TodoControls, ()>;

    fn render(&self, props: Self::Props) -> Self::Output {
        props
    }
}

fn connected_todos() -> scoped_state::Connected<
    TodoList,
    TodoAction,
    (),
    Vec<String>,
    TodoControls,
    TodoView,
> {
    connect(
        MapStateToProps::new(todos_to_props),
        MapDispatchToProps::new(controls_to_props),
    )
    .wrap(TodoView)
}

#[test]
fn dispatch_folds_actions_into_state() {
    let store = StoreRef::new(todo_reducer, TodoList::default());

    store.dispatch(TodoAction::Add("x".to_string()));
    assert_eq!(vec!["x".to_string()], store.state().todos);

    store.dispatch(TodoAction::Add("y".to_string()));
    assert_eq!(vec!["x".to_string(), "y".to_string()], store.state().todos);
}

#[test]
fn connected_consumer_observes_dispatches() {
    let store = StoreRef::new(todo_reducer, TodoList::default());
    let provider = ScopeProvider::new(store.clone());

    let renders = Rc::new(Cell::new(0));
    let renders_copy = renders.clone();
    let mounted = connected_todos()
        .mount(&provider.scope(), (), move || {
            renders_copy.set(renders_copy.get() + 1)
        })
        .unwrap();

    // The consumer has not dispatched anything itself; the change
    // still reaches its derived props.
    store.dispatch(TodoAction::Add("x".to_string()));
    assert_eq!(1, renders.get());
    assert_eq!(vec!["x".to_string()], mounted.render().from_state);

    // Driving the handler from the derived props reaches the store.
    let props = mounted.render();
    (props.from_dispatch.add)("y");
    assert_eq!(2, renders.get());
    assert_eq!(vec!["x".to_string(), "y".to_string()], store.state().todos);
}

#[test]
fn unmount_stops_re_renders() {
    let store = StoreRef::new(todo_reducer, TodoList::default());
    let provider = ScopeProvider::new(store.clone());

    let renders = Rc::new(Cell::new(0));
    let renders_copy = renders.clone();
    let mounted = connected_todos()
        .mount(&provider.scope(), (), move || {
            renders_copy.set(renders_copy.get() + 1)
        })
        .unwrap();

    store.dispatch(TodoAction::Add("x".to_string()));
    assert_eq!(1, renders.get());

    mounted.unmount();

    store.dispatch(TodoAction::Add("y".to_string()));
    assert_eq!(1, renders.get());
    assert_eq!(2, store.state().todos.len());
}

#[test]
fn unrelated_trees_do_not_interfere() {
    let left_store = StoreRef::new(todo_reducer, TodoList::default());
    let right_store = StoreRef::new(todo_reducer, TodoList::default());
    let left_provider = ScopeProvider::new(left_store.clone());
    let right_provider = ScopeProvider::new(right_store.clone());

    let left_renders = Rc::new(Cell::new(0));
    let left_copy = left_renders.clone();
    let _left = connected_todos()
        .mount(&left_provider.scope(), (), move || {
            left_copy.set(left_copy.get() + 1)
        })
        .unwrap();

    let right_renders = Rc::new(Cell::new(0));
    let right_copy = right_renders.clone();
    let _right = connected_todos()
        .mount(&right_provider.scope(), (), move || {
            right_copy.set(right_copy.get() + 1)
        })
        .unwrap();

    left_store.dispatch(TodoAction::Add("only left".to_string()));

    assert_eq!(1, left_renders.get());
    assert_eq!(0, right_renders.get());
    assert!(right_store.state().todos.is_empty());
}

#[test]
fn unrecognized_removal_keeps_state_but_still_notifies() {
    let store = StoreRef::new(todo_reducer, TodoList::default());

    let calls = Rc::new(Cell::new(0));
    let calls_copy = calls.clone();
    let _subscription = store.subscribe(move || calls_copy.set(calls_copy.get() + 1));

    store.dispatch(TodoAction::Remove(5));

    assert!(store.state().todos.is_empty());
    assert_eq!(1, calls.get());
}
