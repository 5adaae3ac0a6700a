use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<S> = Rc<dyn Fn(&S)>;

/// Change observers for a controller's state.
pub(crate) struct Listeners<S> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Listener<S>)>>,
}

impl<S> Default for Listeners<S> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<S> Listeners<S> {
    pub(crate) fn add(&self, listener: impl Fn(&S) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    /// Listeners may subscribe or unsubscribe from inside the callback.
    pub(crate) fn emit(&self, state: &S) {
        let current: Vec<Listener<S>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in current {
            listener(state);
        }
    }
}
