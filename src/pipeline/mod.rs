//! Render pipeline
//!
//! Connects descriptors to a live [`Document`](crate::dom::Document).
//!
//! ```text
//! h(tag, props, children) → ElementDescriptor → render → nodes + live directives → MountHandle
//! ```
//!
//! ## Data Flow
//!
//! 1. **h** - classifies props, resolves `bind:` strategies, normalizes children
//! 2. **render** - creates a container, mounts the tree, applies directives
//! 3. **unmount** - removes the container; every node's teardown runs
//!    children first

mod mount;
mod runtime;

pub(crate) use mount::{mount_child, MountContext};
pub use mount::{MountHandle, Mounted};
pub use runtime::{h, render, Runtime, RuntimeBuilder, RuntimeConfig};
