// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{EntityKey, MetadataConfig, MetadataRegistry, RegistryOptions, StyleSet};

#[test]
fn default_options_build_an_unshared_registry() {
    let mut registry = MetadataRegistry::new(RegistryOptions::default());
    let record = registry.create(MetadataConfig::default());
    assert!(record.ptr_eq(&registry.empty()));
    assert_eq!(registry.pool_len(), 1);
}

#[test]
fn default_config_is_the_empty_singleton() {
    let mut registry = MetadataRegistry::default();
    let a = registry.create(MetadataConfig::default());
    let b = registry.create(MetadataConfig::default());
    assert!(a.ptr_eq(&registry.empty()));
    assert!(a.ptr_eq(&b));
    assert!(a.style().is_empty());
    assert!(a.entity().is_none());
    // The empty instance is seeded at construction, not created on demand.
    assert_eq!(registry.pool_len(), 1);
}

#[test]
fn equal_configurations_share_one_instance() {
    let mut registry = MetadataRegistry::default();
    let ordered: StyleSet = ["BOLD", "ITALIC"].into_iter().collect();
    let reversed = StyleSet::new().with("ITALIC").with("BOLD");

    let a = registry.create(MetadataConfig::default().style(ordered).entity("link-1"));
    let b = registry.create(MetadataConfig::default().style(reversed).entity("link-1"));
    assert!(a.ptr_eq(&b));
    assert_eq!(registry.pool_len(), 2);
}

#[test]
fn distinct_configurations_get_distinct_instances() {
    let mut registry = MetadataRegistry::default();
    let bold = registry.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
    let italic = registry.create(MetadataConfig::default().style(StyleSet::new().with("ITALIC")));
    let bold_linked = registry.create(
        MetadataConfig::default()
            .style(StyleSet::new().with("BOLD"))
            .entity("link-1"),
    );
    assert!(!bold.ptr_eq(&italic));
    assert!(!bold.ptr_eq(&bold_linked));
    assert_ne!(bold, italic);
    assert_ne!(bold, bold_linked);
}

#[test]
fn entity_text_cannot_collide_with_style_content() {
    // A textual pool key (styles rendered to a string, concatenated with the
    // entity) would conflate these configurations. The structural key must
    // keep them apart.
    let mut registry = MetadataRegistry::default();
    let styled = registry.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
    let entity_only = registry.create(MetadataConfig::default().entity("BOLD"));
    assert!(!styled.ptr_eq(&entity_only));
    assert_ne!(styled, entity_only);

    let joined = registry.create(
        MetadataConfig::default().style(["BOLD", "ITALIC"].into_iter().collect::<StyleSet>()),
    );
    let concatenated =
        registry.create(MetadataConfig::default().style(StyleSet::new().with("BOLDITALIC")));
    assert!(!joined.ptr_eq(&concatenated));
}

#[test]
fn apply_style_is_idempotent() {
    let mut registry = MetadataRegistry::default();
    let record = registry.empty();
    let bold = registry.apply_style(&record, "BOLD");
    let again = registry.apply_style(&bold, "BOLD");
    assert!(bold.ptr_eq(&again));
    assert!(bold.has_style("BOLD"));
}

#[test]
fn remove_style_round_trips_to_the_same_instance() {
    let mut registry = MetadataRegistry::default();
    let record = registry.create(MetadataConfig::default().style(StyleSet::new().with("ITALIC")));
    let bold = registry.apply_style(&record, "BOLD");
    let back = registry.remove_style(&bold, "BOLD");
    assert!(back.ptr_eq(&record));
}

#[test]
fn remove_absent_style_is_a_no_op() {
    let mut registry = MetadataRegistry::default();
    let record = registry.empty();
    let before = registry.pool_len();
    let same = registry.remove_style(&record, "BOLD");
    assert!(same.ptr_eq(&record));
    assert_eq!(registry.pool_len(), before);
}

#[test]
fn reapplying_the_current_entity_returns_the_record() {
    let mut registry = MetadataRegistry::default();
    let record = registry.create(MetadataConfig::default().entity("link-1"));
    let before = registry.pool_len();
    let same = registry.apply_entity(&record, Some(EntityKey::new("link-1")));
    assert!(same.ptr_eq(&record));
    assert_eq!(registry.pool_len(), before);

    let empty = registry.empty();
    let still_empty = registry.apply_entity(&empty, None);
    assert!(still_empty.ptr_eq(&empty));
}

#[test]
fn apply_entity_replaces_and_detaches() {
    let mut registry = MetadataRegistry::default();
    let bold = registry.apply_style(&registry.empty(), "BOLD");
    let linked = registry.apply_entity(&bold, Some(EntityKey::new("link-1")));
    assert_eq!(linked.entity().map(EntityKey::as_str), Some("link-1"));
    assert!(linked.has_style("BOLD"));

    let detached = registry.apply_entity(&linked, None);
    assert!(detached.entity().is_none());
    assert!(detached.ptr_eq(&bold));
}

#[test]
fn style_chains_converge_on_one_instance() {
    let mut registry = MetadataRegistry::default();
    let r0 = registry.create(MetadataConfig::default());
    let r1 = registry.apply_style(&r0, "BOLD");
    let r2 = registry.apply_style(&r1, "ITALIC");

    let r3 = registry.create(MetadataConfig::default());
    let r3 = registry.apply_style(&r3, "ITALIC");
    let r4 = registry.apply_style(&r3, "BOLD");

    assert!(r2.ptr_eq(&r4));
    assert!(r2.has_style("BOLD"));
    assert!(r2.has_style("ITALIC"));
    assert!(r2.entity().is_none());
}

#[test]
fn pool_only_grows_for_unseen_configurations() {
    let mut registry = MetadataRegistry::default();
    let bold_config = || MetadataConfig::default().style(StyleSet::new().with("BOLD"));
    registry.create(bold_config());
    let after_first = registry.pool_len();
    registry.create(bold_config());
    registry.create(bold_config());
    assert_eq!(registry.pool_len(), after_first);
}

#[test]
fn foreign_records_resolve_to_this_pool() {
    let mut a = MetadataRegistry::default();
    let mut b = MetadataRegistry::default();
    let foreign = a.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));

    // Even a no-op style application on a record from another registry must
    // come back as this registry's canonical instance.
    let adopted = b.apply_style(&foreign, "BOLD");
    assert_eq!(adopted, foreign);
    assert!(!adopted.ptr_eq(&foreign));
    let canonical = b.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
    assert!(adopted.ptr_eq(&canonical));

    let trimmed = b.remove_style(&foreign, "ITALIC");
    assert!(trimmed.ptr_eq(&canonical));
}

#[test]
fn independent_registries_compare_by_content() {
    let mut a = MetadataRegistry::default();
    let mut b = MetadataRegistry::default();
    let config = MetadataConfig::default()
        .style(StyleSet::new().with("BOLD"))
        .entity("link-1");
    let from_a = a.create(config.clone());
    let from_b = b.create(config);
    assert_eq!(from_a, from_b);
    assert!(!from_a.ptr_eq(&from_b));
}

#[test]
fn metadata_is_immutable_under_registry_operations() {
    let mut registry = MetadataRegistry::default();
    let record = registry.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
    let _ = registry.apply_style(&record, "ITALIC");
    let _ = registry.apply_entity(&record, Some(EntityKey::new("link-1")));
    assert_eq!(record.style().len(), 1);
    assert!(record.has_style("BOLD"));
    assert!(record.entity().is_none());
}

#[cfg(feature = "std")]
mod shared {
    use super::*;
    use crate::CharacterMetadata;
    use std::thread;

    #[test]
    fn clones_share_the_empty_singleton() {
        let registry = MetadataRegistry::new_shared();
        let clone = registry.clone();
        assert!(registry.empty().ptr_eq(&clone.empty()));
    }

    #[test]
    fn shared_option_matches_new_shared() {
        let registry = MetadataRegistry::new(RegistryOptions { shared: true });
        let mut clone = registry.clone();
        let record = clone.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
        let mut other = registry.clone();
        let again = other.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
        assert!(record.ptr_eq(&again));
    }

    #[test]
    fn debug_reports_the_synchronized_pool() {
        let registry = MetadataRegistry::new_shared();
        let mut clone = registry.clone();
        clone.create(MetadataConfig::default().style(StyleSet::new().with("BOLD")));
        // The clone grew the backing pool; the original's debug output must
        // reflect that, not its untouched local cache.
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("pool_len: 2"));
    }

    #[test]
    fn clones_resolve_to_the_identical_instance() {
        let mut registry = MetadataRegistry::new_shared();
        let mut clone = registry.clone();

        let config = || {
            MetadataConfig::default()
                .style(StyleSet::new().with("BOLD"))
                .entity("link-1")
        };
        let from_original = registry.create(config());
        let from_clone = clone.create(config());
        assert!(from_original.ptr_eq(&from_clone));
        assert_eq!(registry.pool_len(), 2);
    }

    #[test]
    fn threads_converge_on_one_instance() {
        let registry = MetadataRegistry::new_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut registry = registry.clone();
                thread::spawn(move || {
                    let bold = registry.apply_style(&registry.empty(), "BOLD");
                    registry.apply_style(&bold, "ITALIC")
                })
            })
            .collect();

        let results: Vec<CharacterMetadata> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for pair in results.windows(2) {
            assert!(pair[0].ptr_eq(&pair[1]));
        }
    }
}
