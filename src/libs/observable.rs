use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

/// Single-threaded publisher. Subscribers are called synchronously, in
/// subscription order, every time `publish` runs.
pub struct Observable<T> {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed (already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn publish(&self, value: &T) {
        // snapshot so a callback may subscribe or unsubscribe while we iterate
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reaches_every_subscriber_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let observable = Observable::<u32>::new();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            observable.subscribe(move |v| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        observable.publish(&7);
        assert_eq!(*seen.borrow(), vec!["a7", "b7"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(Cell::new(0));
        let observable = Observable::<()>::new();
        let id = observable.subscribe({
            let count = count.clone();
            move |_| count.set(count.get() + 1)
        });
        observable.publish(&());
        assert!(observable.unsubscribe(id));
        assert!(!observable.unsubscribe(id));
        observable.publish(&());
        assert_eq!(count.get(), 1);
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn callback_can_unsubscribe_itself() {
        let observable = Rc::new(Observable::<()>::new());
        let slot = Rc::new(Cell::new(None));
        let id = observable.subscribe({
            let observable = observable.clone();
            let slot = slot.clone();
            move |_| {
                if let Some(id) = slot.get() {
                    observable.unsubscribe(id);
                }
            }
        });
        slot.set(Some(id));
        observable.publish(&());
        assert_eq!(observable.subscriber_count(), 0);
    }
}
