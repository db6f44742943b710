// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// An opaque reference to a linked entity record.
///
/// The key identifies an out-of-scope entity (for example a hyperlink target)
/// attached to a character. This crate never resolves the key to its referent
/// and accepts any string; absence of an entity is expressed as
/// `Option<EntityKey>`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EntityKey(Arc<str>);

impl EntityKey {
    /// Creates a key from the given identifier.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityKey").field(&self.as_str()).finish()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
