//! Expand-state listener registry.

use std::rc::Rc;

/// Receives the new expand state after every successful toggle.
pub trait ExpandStateListener {
    fn on_expand_state_changed(&self, is_expanded: bool);
}

impl<F> ExpandStateListener for F
where
    F: Fn(bool),
{
    fn on_expand_state_changed(&self, is_expanded: bool) {
        self(is_expanded)
    }
}

pub type ListenerHandle = Rc<dyn ExpandStateListener>;

/// Ordered set of distinct listener handles. Identity is the handle's allocation.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<ListenerHandle>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the handle was already registered.
    pub fn add(&mut self, listener: ListenerHandle) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Returns `false` when the handle was not registered.
    pub fn remove(&mut self, listener: &ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|existing| !same_handle(existing, listener));
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &ListenerHandle) -> bool {
        self.listeners
            .iter()
            .any(|existing| same_handle(existing, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, is_expanded: bool) {
        for listener in &self.listeners {
            listener.on_expand_state_changed(is_expanded);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .finish()
    }
}

fn same_handle(a: &ListenerHandle, b: &ListenerHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
