//! Resource path resolution for the RedLilium editor.
//!
//! Resources are addressed by logical names such as `"assets/Materials/Stone.xml"`.
//! A [`Vfs`] maps those names to real files through mounted [`VfsProvider`]s:
//! the first path segment selects a mount, and names that match no mount are
//! handed to the default mount unchanged.
//!
//! ```ignore
//! let mut vfs = Vfs::new();
//! vfs.mount("assets", FileSystemProvider::new("./assets"));
//! vfs.set_default("assets");
//!
//! let path = vfs.resolve_file_name("Materials/Stone.xml")?;
//! let file = vfs.open("assets/Materials/Stone.xml")?;
//! ```
//!
//! All operations are synchronous. The editor resolves names on the main
//! thread while building requests, so there is nothing to await.

mod error;
mod filesystem;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
pub use filesystem::FileSystemProvider;
pub use provider::VfsProvider;
pub use vfs::Vfs;
