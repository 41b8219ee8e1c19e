//! Scene nodes and components with generational identity.
//!
//! The editor never holds scene objects directly. It holds [`NodeId`] and
//! [`ComponentId`] handles, which stay cheap to copy and compare after the
//! object they named is gone: a removed slot bumps its generation, so a stale
//! handle simply stops resolving through [`Scene::node`] or
//! [`Scene::component`].

mod id;
mod scene;
mod slots;

pub use id::{ComponentId, NodeId};
pub use scene::{Component, Node, Scene};
