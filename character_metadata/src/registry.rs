// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canonicalization pool for character metadata.

use alloc::sync::Arc;
use core::fmt;
use hashbrown::HashMap;
use style_set::StyleSet;

#[cfg(feature = "std")]
use std::sync::Mutex;

use crate::entity::EntityKey;
use crate::metadata::{CharacterMetadata, MetadataConfig};

/// Structural key for the canonicalization pool.
///
/// Keying on the normalized style set and the entity directly (rather than on
/// some textual rendering of them) means two configurations share a key
/// exactly when they are equal in content.
#[derive(Clone, PartialEq, Eq, Hash)]
struct PoolKey {
    style: StyleSet,
    entity: Option<EntityKey>,
}

/// Options for a metadata registry.
#[derive(Copy, Clone, Default, Debug)]
pub struct RegistryOptions {
    /// If true, the registry will use a synchronized backing pool
    /// guaranteeing that all clones resolve equal configurations to the
    /// identical instance.
    ///
    /// If the registry will be used by a single owner, this is pure
    /// overhead and should be disabled.
    ///
    /// The default value is false.
    #[cfg(feature = "std")]
    pub shared: bool,
}

/// Owner of the canonicalization pool for [`CharacterMetadata`] values.
///
/// The registry is the sole way to construct metadata values. Every
/// construction path resolves through the pool, so configurations that are
/// equal in content always come back as the identical shared instance, and
/// the document model can rely on [`CharacterMetadata::ptr_eq`] for change
/// detection.
///
/// Real documents use a very small number of distinct style/entity
/// configurations, so the pool stays small in practice. Entries are never
/// evicted: a canonical instance must stay valid and identity-stable for as
/// long as any part of the document refers to it.
///
/// A registry created with default [`RegistryOptions`] owns its pool
/// outright; clones of it are independent registries whose instances will not
/// be identity-equal across the clone boundary (content equality via `==`
/// still holds). When multiple owners must agree on identity, use a shared
/// registry.
#[derive(Clone)]
pub struct MetadataRegistry {
    pool: HashMap<PoolKey, CharacterMetadata>,
    empty: CharacterMetadata,
    #[cfg(feature = "std")]
    shared: Option<Arc<Mutex<Shared>>>,
}

impl MetadataRegistry {
    /// Creates a registry with the given options.
    pub fn new(options: RegistryOptions) -> Self {
        #[cfg(feature = "std")]
        if options.shared {
            return Self::new_shared();
        }
        #[cfg(not(feature = "std"))]
        let _ = options;
        Self::unshared()
    }

    /// Creates a registry that is suitable for multi-threaded use.
    ///
    /// A registry created with this function maintains a synchronized backing
    /// pool that is shared among all clones, so equal configurations resolve
    /// to the identical instance no matter which clone they came through.
    /// Each clone additionally keeps a local cache of the instances it has
    /// already resolved, which it consults without locking.
    #[cfg(feature = "std")]
    pub fn new_shared() -> Self {
        let mut registry = Self::unshared();
        registry.shared = Some(Arc::new(Mutex::new(Shared {
            pool: registry.pool.clone(),
        })));
        registry
    }

    fn unshared() -> Self {
        let empty = CharacterMetadata::new(StyleSet::new(), None);
        let mut pool = HashMap::new();
        pool.insert(
            PoolKey {
                style: StyleSet::new(),
                entity: None,
            },
            empty.clone(),
        );
        Self {
            pool,
            empty,
            #[cfg(feature = "std")]
            shared: None,
        }
    }

    /// Returns the canonical instance with no styles and no entity.
    pub fn empty(&self) -> CharacterMetadata {
        self.empty.clone()
    }

    /// Returns the canonical instance for the given configuration.
    ///
    /// Unset configuration fields default to the empty instance's values, so
    /// `create(MetadataConfig::default())` returns [`empty`](Self::empty).
    /// A configuration seen before comes back as the pooled instance with no
    /// allocation; an unseen one is constructed and pooled first.
    pub fn create(&mut self, config: MetadataConfig) -> CharacterMetadata {
        self.resolve(PoolKey {
            style: config.style.unwrap_or_default(),
            entity: config.entity,
        })
    }

    /// Returns the canonical instance for `record` with `label` applied.
    ///
    /// Applying a label that is already present is a no-op: for a record
    /// obtained from this registry the result is `record` itself. The result
    /// always resolves through this registry's pool, so a record obtained
    /// from a different registry comes back as this pool's canonical
    /// instance for the same content.
    pub fn apply_style(
        &mut self,
        record: &CharacterMetadata,
        label: impl Into<Arc<str>>,
    ) -> CharacterMetadata {
        self.resolve(PoolKey {
            style: record.style().with(label),
            entity: record.entity().cloned(),
        })
    }

    /// Returns the canonical instance for `record` with `label` removed.
    ///
    /// Removing a label that is absent is a no-op: for a record obtained
    /// from this registry the result is `record` itself. Like
    /// [`apply_style`](Self::apply_style), the result always resolves
    /// through this registry's pool.
    pub fn remove_style(&mut self, record: &CharacterMetadata, label: &str) -> CharacterMetadata {
        self.resolve(PoolKey {
            style: record.style().without(label),
            entity: record.entity().cloned(),
        })
    }

    /// Returns the canonical instance for `record` with its entity replaced.
    ///
    /// Passing `None` detaches the entity. If the requested entity already
    /// matches, this is `record` itself and the pool is not consulted.
    pub fn apply_entity(
        &mut self,
        record: &CharacterMetadata,
        entity: Option<EntityKey>,
    ) -> CharacterMetadata {
        if record.entity() == entity.as_ref() {
            return record.clone();
        }
        self.resolve(PoolKey {
            style: record.style().clone(),
            entity,
        })
    }

    /// Returns the number of distinct configurations in the pool.
    ///
    /// For a shared registry this counts the synchronized backing pool, not
    /// the local cache.
    pub fn pool_len(&self) -> usize {
        #[cfg(feature = "std")]
        if let Some(shared) = self.shared.as_ref().and_then(|shared| shared.lock().ok()) {
            return shared.pool.len();
        }
        self.pool.len()
    }

    fn resolve(&mut self, key: PoolKey) -> CharacterMetadata {
        if let Some(existing) = self.pool.get(&key) {
            return existing.clone();
        }
        #[cfg(feature = "std")]
        if let Some(mut shared) = self.shared.as_ref().and_then(|shared| shared.lock().ok()) {
            // Resolution happens under the lock, so two clones racing on the
            // same unseen configuration still converge on one instance.
            let canonical = shared.resolve(&key);
            self.pool.insert(key, canonical.clone());
            return canonical;
        }
        let created = CharacterMetadata::new(key.style.clone(), key.entity.clone());
        self.pool.insert(key, created.clone());
        created
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::unshared()
    }
}

impl fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("pool_len", &self.pool_len())
            .finish_non_exhaustive()
    }
}

/// Synchronized backing pool for a shared registry.
#[cfg(feature = "std")]
struct Shared {
    pool: HashMap<PoolKey, CharacterMetadata>,
}

#[cfg(feature = "std")]
impl Shared {
    fn resolve(&mut self, key: &PoolKey) -> CharacterMetadata {
        if let Some(existing) = self.pool.get(key) {
            return existing.clone();
        }
        let created = CharacterMetadata::new(key.style.clone(), key.entity.clone());
        self.pool.insert(key.clone(), created.clone());
        created
    }
}
