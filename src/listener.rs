use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

/// A handle to a callback function which is notified after every
/// accepted state change in a [Store](crate::Store).
///
/// The callback takes no arguments; a listener that needs the new
/// state reads it from the store it subscribed to.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn()>);

impl Listener {
    pub fn new<C: Fn() + 'static>(closure: C) -> Self {
        Listener(Rc::new(closure))
    }

    pub(crate) fn emit(&self) {
        (self.0)()
    }
}

impl<C> From<C> for Listener
where
    C: Fn() + 'static,
{
    fn from(closure: C) -> Self {
        Listener(Rc::new(closure))
    }
}

/// One registration slot in a store's listener list. The id is what
/// distinguishes two registrations of the same callback.
pub(crate) struct ListenerEntry {
    pub(crate) id: u64,
    pub(crate) listener: Listener,
}

/// The ordered listener list, shared between a [Store](crate::Store)
/// and the [Subscription]s it hands out.
pub(crate) type ListenerList = Rc<RefCell<Vec<ListenerEntry>>>;

/// The single-use capability returned by
/// [Store::subscribe()](crate::Store::subscribe()).
///
/// Dropping the handle also unsubscribes, so a teardown path that
/// never reaches an explicit [unsubscribe()](Subscription::unsubscribe())
/// call still cannot leak its listener.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    list: Weak<RefCell<Vec<ListenerEntry>>>,
    id: u64,
    removed: Cell<bool>,
}

impl Subscription {
    pub(crate) fn new(list: &ListenerList, id: u64) -> Self {
        Subscription {
            list: Rc::downgrade(list),
            id,
            removed: Cell::new(false),
        }
    }

    /// Remove the registration this handle was created for.
    ///
    /// Removal is by registration id, not by callback value: with the
    /// same callback subscribed twice, each handle removes only its
    /// own slot. Calling this more than once is a no-op, as is calling
    /// it after the store has been dropped.
    pub fn unsubscribe(&self) {
        if self.removed.replace(true) {
            return;
        }

        if let Some(list) = self.list.upgrade() {
            let mut entries = list.borrow_mut();
            if let Some(index) = entries.iter().position(|entry| entry.id == self.id) {
                entries.remove(index);
                log::trace!("listener {} unsubscribed", self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
