// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonicalized per-character formatting metadata for rich text models.
//!
//! A rich text document model stores one [`CharacterMetadata`] value per
//! character: the set of inline styles applied at that position plus an
//! optional reference to a linked entity (a hyperlink target, an embedded
//! object, …). Documents are long and edits are frequent, but the number of
//! distinct style/entity configurations in real content is tiny, so the model
//! wants to compare, share, and replace these values by identity rather than
//! by content.
//!
//! [`MetadataRegistry`] makes that possible: it owns a canonicalization pool
//! guaranteeing that any two logically equal configurations are represented by
//! the same shared instance. All construction goes through the registry;
//! the values themselves are immutable.
//!
//! ```
//! use character_metadata::{MetadataConfig, MetadataRegistry};
//!
//! let mut registry = MetadataRegistry::default();
//! let plain = registry.create(MetadataConfig::default());
//! let bold = registry.apply_style(&plain, "BOLD");
//! let bold_italic = registry.apply_style(&bold, "ITALIC");
//!
//! // A different application order converges on the identical instance.
//! let other = registry.apply_style(&plain, "ITALIC");
//! let other = registry.apply_style(&other, "BOLD");
//! assert!(bold_italic.ptr_eq(&other));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables [`MetadataRegistry::new_shared`], a
//!   registry mode whose clones all resolve against one synchronized pool.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod entity;
mod metadata;
mod registry;

#[cfg(test)]
mod tests;

pub use crate::entity::EntityKey;
pub use crate::metadata::{CharacterMetadata, MetadataConfig};
pub use crate::registry::{MetadataRegistry, RegistryOptions};

pub use style_set::StyleSet;
