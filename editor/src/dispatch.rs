//! Fan-out of project requests to interested editor subsystems.

use std::fmt;
use std::rc::Rc;

use crate::request::ProjectRequest;

/// Handle returned by [`RequestDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&Rc<ProjectRequest>)>;

/// Delivers each request to every listener, then runs the winning reaction.
///
/// Listeners inspect the request and queue callbacks on it with
/// [`ProjectRequest::queue_process_callback`]. A callback that needs the
/// request later should capture `Rc::downgrade(request)`; a strong `Rc` would
/// keep the request alive for as long as the callback stays queued.
///
/// ```
/// use redlilium_editor::{ProjectRequest, RequestDispatcher};
/// use redlilium_vfs::Vfs;
///
/// let mut dispatcher = RequestDispatcher::new();
/// dispatcher.subscribe(|request| {
///     if let Some(open) = request.as_open_resource() {
///         if open.has_extension(".xml") {
///             let name = open.resource_name().to_owned();
///             request.queue_process_callback(Box::new(move || println!("open {name}")), 0);
///         }
///     }
/// });
///
/// let vfs = Vfs::new();
/// let request = dispatcher.process(ProjectRequest::open_resource(&vfs, "Scene.xml"));
/// assert_eq!(request.pending_callbacks(), 0);
/// ```
pub struct RequestDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl RequestDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener. Listeners are notified in subscription order.
    pub fn subscribe(&mut self, listener: impl Fn(&Rc<ProjectRequest>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify every listener, then invoke the highest-priority callback.
    ///
    /// Lower-priority callbacks stay queued on the returned request; the
    /// caller may run them or drop the request to discard them.
    pub fn process(&self, request: ProjectRequest) -> Rc<ProjectRequest> {
        let request = Rc::new(request);
        for (_, listener) in &self.listeners {
            listener(&request);
        }

        if request.invoke_process_callback() {
            log::debug!(
                "{} request handled ({} alternative(s) left)",
                request.name(),
                request.pending_callbacks()
            );
        } else {
            log::debug!("{} request was not handled", request.name());
        }
        request
    }
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
