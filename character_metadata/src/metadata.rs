// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};
use style_set::StyleSet;

use crate::entity::EntityKey;

/// Immutable formatting metadata for one character position.
///
/// A value pairs an orderless set of inline style labels with an optional
/// entity reference. Values are cheap handles over shared storage and are
/// only constructed by a [`MetadataRegistry`](crate::MetadataRegistry), which
/// guarantees that equal configurations resolve to the identical instance.
/// Cloning a value yields another handle to the same instance.
///
/// Because of that guarantee, [`ptr_eq`](Self::ptr_eq) substitutes for content
/// comparison between values obtained from the same registry.
#[derive(Clone)]
pub struct CharacterMetadata(Arc<Inner>);

#[derive(PartialEq, Eq, Hash)]
struct Inner {
    style: StyleSet,
    entity: Option<EntityKey>,
}

impl CharacterMetadata {
    pub(crate) fn new(style: StyleSet, entity: Option<EntityKey>) -> Self {
        Self(Arc::new(Inner { style, entity }))
    }

    /// Returns the set of style labels applied at this position.
    pub fn style(&self) -> &StyleSet {
        &self.0.style
    }

    /// Returns the attached entity reference, if any.
    pub fn entity(&self) -> Option<&EntityKey> {
        self.0.entity.as_ref()
    }

    /// Returns true if the given style label is applied at this position.
    pub fn has_style(&self, label: &str) -> bool {
        self.0.style.contains(label)
    }

    /// Returns true if both handles refer to the same canonical instance.
    ///
    /// For values produced by one registry this is equivalent to `==` and
    /// runs in constant time regardless of how many styles are applied.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for CharacterMetadata {
    fn eq(&self, other: &Self) -> bool {
        // Values from independent registries may be equal in content without
        // sharing storage, so fall back to a structural comparison.
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for CharacterMetadata {}

impl Hash for CharacterMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for CharacterMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterMetadata")
            .field("style", &self.0.style)
            .field("entity", &self.0.entity)
            .finish()
    }
}

/// Partial configuration accepted by [`MetadataRegistry::create`].
///
/// Unset fields take the values of the canonical empty instance: an empty
/// style set and no entity.
///
/// [`MetadataRegistry::create`]: crate::MetadataRegistry::create
#[derive(Clone, Debug, Default)]
pub struct MetadataConfig {
    pub(crate) style: Option<StyleSet>,
    pub(crate) entity: Option<EntityKey>,
}

impl MetadataConfig {
    /// Sets the style collection for the configuration.
    #[must_use]
    pub fn style(mut self, style: StyleSet) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the entity reference for the configuration.
    #[must_use]
    pub fn entity(mut self, entity: impl Into<EntityKey>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}
