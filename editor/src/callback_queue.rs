//! Priority-ordered deferred callbacks.
//!
//! [`CallbackQueue`] uses interior mutability ([`RefCell`]) so that a callback
//! holding only a shared reference to the owning request can still queue
//! follow-up work. The queue owns non-`Send` closures, which keeps it on the
//! thread that created it.

use std::cell::{Cell, RefCell};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

/// A deferred zero-argument action.
pub type Callback = Box<dyn FnOnce()>;

/// Priority used when the caller does not care.
pub const DEFAULT_PRIORITY: i32 = 0;

struct CallbackEntry {
    callback: Callback,
    priority: i32,
    sequence: u64,
}

impl CallbackEntry {
    /// Higher priority first, then earlier submission first.
    fn key(&self) -> (i32, Reverse<u64>) {
        (self.priority, Reverse(self.sequence))
    }
}

impl PartialEq for CallbackEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CallbackEntry {}

impl PartialOrd for CallbackEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CallbackEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Holds deferred callbacks tagged with priorities and runs them one at a time.
///
/// [`invoke_highest()`](Self::invoke_highest) runs the callback with the
/// greatest priority. Callbacks with equal priority run in submission order.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use redlilium_editor::CallbackQueue;
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let queue = CallbackQueue::new();
///
/// let l = log.clone();
/// queue.queue(Box::new(move || l.borrow_mut().push("fallback")), -10);
/// let l = log.clone();
/// queue.queue(Box::new(move || l.borrow_mut().push("preferred")), 10);
///
/// queue.invoke_highest();
/// assert_eq!(*log.borrow(), vec!["preferred"]);
/// assert_eq!(queue.len(), 1);
/// ```
pub struct CallbackQueue {
    entries: RefCell<BinaryHeap<CallbackEntry>>,
    next_sequence: Cell<u64>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(BinaryHeap::new()),
            next_sequence: Cell::new(0),
        }
    }

    /// Queues a callback. Callable from `&self`, including from inside a
    /// callback that is currently being invoked by this queue.
    pub fn queue(&self, callback: Callback, priority: i32) {
        let sequence = self.next_sequence.get();
        self.next_sequence.set(sequence.wrapping_add(1));
        self.entries.borrow_mut().push(CallbackEntry {
            callback,
            priority,
            sequence,
        });
    }

    /// Queues a callback with [`DEFAULT_PRIORITY`].
    pub fn queue_default(&self, callback: Callback) {
        self.queue(callback, DEFAULT_PRIORITY);
    }

    /// Removes and runs the highest-priority callback.
    ///
    /// Returns `false` without doing anything if the queue is empty. The entry
    /// is removed before it runs, so callbacks it queues are left for later
    /// calls.
    pub fn invoke_highest(&self) -> bool {
        let entry = self.entries.borrow_mut().pop();
        match entry {
            Some(entry) => {
                log::trace!("Invoking callback with priority {}", entry.priority);
                (entry.callback)();
                true
            }
            None => false,
        }
    }

    /// Priority of the callback [`invoke_highest()`](Self::invoke_highest) would run next.
    pub fn peek_priority(&self) -> Option<i32> {
        self.entries.borrow().peek().map(|entry| entry.priority)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops all pending callbacks without running them.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.entries.borrow_mut());
        drop(dropped);
    }
}

impl Default for CallbackQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<i32>>>;

    fn push_value(log: &Log, value: i32) -> Callback {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(value))
    }

    fn drain(queue: &CallbackQueue) {
        while queue.invoke_highest() {}
    }

    #[test]
    fn empty_invoke_is_noop() {
        let queue = CallbackQueue::new();
        assert!(!queue.invoke_highest());
        assert!(!queue.invoke_highest());
        assert!(queue.is_empty());
    }

    #[test]
    fn runs_in_non_increasing_priority_order() {
        let log = Log::default();
        let queue = CallbackQueue::new();
        for priority in [3, -7, 12, 0, 12, 5, -1] {
            queue.queue(push_value(&log, priority), priority);
        }
        drain(&queue);
        assert_eq!(*log.borrow(), vec![12, 12, 5, 3, 0, -1, -7]);
    }

    #[test]
    fn equal_priorities_run_in_submission_order() {
        let log = Log::default();
        let queue = CallbackQueue::new();
        for value in 0..5 {
            queue.queue(push_value(&log, value), 1);
        }
        drain(&queue);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn invoke_runs_exactly_one() {
        let log = Log::default();
        let queue = CallbackQueue::new();
        queue.queue(push_value(&log, 1), 1);
        queue.queue(push_value(&log, 2), 2);

        assert!(queue.invoke_highest());
        assert_eq!(*log.borrow(), vec![2]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_priority(), Some(1));
    }

    #[test]
    fn reentrant_queue_is_not_run_by_same_call() {
        let log = Log::default();
        let queue = Rc::new(CallbackQueue::new());

        let inner_queue = queue.clone();
        let inner_log = log.clone();
        queue.queue(
            Box::new(move || {
                inner_log.borrow_mut().push(1);
                let nested_log = inner_log.clone();
                inner_queue.queue(Box::new(move || nested_log.borrow_mut().push(2)), 100);
            }),
            0,
        );

        assert!(queue.invoke_highest());
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(queue.len(), 1);

        assert!(queue.invoke_highest());
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn queue_default_uses_zero() {
        let log = Log::default();
        let queue = CallbackQueue::new();
        queue.queue_default(push_value(&log, 0));
        queue.queue(push_value(&log, -1), -1);
        queue.queue(push_value(&log, 1), 1);
        drain(&queue);
        assert_eq!(*log.borrow(), vec![1, 0, -1]);
    }

    #[test]
    fn clear_drops_without_running() {
        let log = Log::default();
        let queue = CallbackQueue::new();
        queue.queue(push_value(&log, 1), 0);
        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.invoke_highest());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn debug_shows_pending() {
        let queue = CallbackQueue::new();
        queue.queue_default(Box::new(|| {}));
        let debug = format!("{queue:?}");
        assert!(debug.contains("CallbackQueue"));
        assert!(debug.contains("pending: 1"));
    }
}
