//! PluginXml Core Library
//!
//! This is the core library for the pluginxml descriptor-inheritance tool.
//! It loads Maven `plugin.xml` descriptors, looks up mojo definitions by
//! goal, and merges a child mojo with an inherited super-mojo definition.
//!
//! ## Architecture
//!
//! - [`descriptor`] - Descriptor documents: load, goal lookup, save
//! - [`merge`] - The mojo inheritance merge and its deduplication rules
//! - [`dom`] - Generic XML node tree, parsing, serialization, tree merge
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pluginxml_core::{merge_mojo, PluginDescriptor};
//!
//! # fn example() -> pluginxml_core::DescriptorResult<()> {
//! let mut child = PluginDescriptor::load("target/classes/META-INF/maven/plugin.xml")?;
//! let parent = PluginDescriptor::load("parent/plugin.xml")?;
//!
//! if let (Some(mojo), Some(super_mojo)) =
//!     (child.find_mojo_mut("pax:compile"), parent.find_mojo("compile"))
//! {
//!     merge_mojo(mojo, super_mojo);
//! }
//! child.save()?;
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod dom;
pub mod merge;
pub mod types;

// Re-export the main types for easier usage
pub use descriptor::PluginDescriptor;
pub use dom::XmlNode;
pub use merge::{bare_goal, merge_mojo};
pub use types::{DescriptorError, DescriptorResult};
