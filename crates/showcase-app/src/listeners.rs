// crates/showcase-app/src/listeners.rs
// Bookkeeping for event listeners a widget registered on the page

/// A registration that can be taken back off the page
pub trait Detach {
    fn detach(&mut self);
}

/// Listeners owned by one widget. Detaching the set, or dropping it,
/// detaches every member once and leaves the set empty.
pub struct ListenerSet<L: Detach> {
    listeners: Vec<L>,
}

impl<L: Detach> ListenerSet<L> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn push(&mut self, listener: L) {
        self.listeners.push(listener);
    }

    /// Listeners still attached
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detach everything. Returns how many listeners were removed.
    pub fn detach_all(&mut self) -> usize {
        let count = self.listeners.len();
        for mut listener in self.listeners.drain(..) {
            listener.detach();
        }
        count
    }
}

impl<L: Detach> Default for ListenerSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Detach> From<Vec<L>> for ListenerSet<L> {
    fn from(listeners: Vec<L>) -> Self {
        Self { listeners }
    }
}

impl<L: Detach> Drop for ListenerSet<L> {
    fn drop(&mut self) {
        self.detach_all();
    }
}
