//! Project requests for the RedLilium editor.
//!
//! UI code describes what the user asked for (open a resource, inspect
//! resources, inspect scene nodes and components) as a [`ProjectRequest`].
//! The [`RequestDispatcher`] shows the request to every interested
//! subsystem; each one may queue a prioritized reaction, and only the
//! highest-priority reaction runs.
//!
//! Everything here is single-threaded and lives on the editor main thread.

pub mod callback_queue;
pub mod dispatch;
pub mod project;
pub mod request;
pub mod resource_desc;

pub use callback_queue::{Callback, CallbackQueue, DEFAULT_PRIORITY};
pub use dispatch::{ListenerId, RequestDispatcher};
pub use project::{Project, ProjectConfig, ProjectError};
pub use request::{
    InspectNodeComponentRequest, InspectResourceRequest, OpenResourceRequest, ProjectRequest,
    RequestKind,
};
pub use resource_desc::{FileResourceDesc, JsonFile, XmlFile};
