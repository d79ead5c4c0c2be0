//! Archetype deduplication table.

use crate::property::StyleProperty;
use crate::resolver::{ClassRules, PropertyResolver};
use core::hash::{Hash as _, Hasher as _};
use log::{debug, trace};
use node_table::{ArchetypeId, Atom};
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

/// Class sets are usually short; keep them inline.
type ClassSet = SmallVec<[Atom; 8]>;

/// One resolved style shared by every node with the same class set.
#[derive(Clone, Debug, PartialEq)]
pub struct Archetype {
    /// Sorted, deduplicated class ids.
    pub class_ids: ClassSet,
    /// Resolved properties in cascade order.
    pub properties: Vec<StyleProperty>,
    /// Hash of `class_ids`.
    pub hash: u64,
}

/// Lookup statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchetypeStats {
    pub archetypes: usize,
    pub lookups: u64,
    pub hits: u64,
}

/// Hash a sorted class-id sequence.
pub fn class_set_hash(class_ids: &[Atom]) -> u64 {
    let mut hasher = FxHasher::default();
    class_ids.hash(&mut hasher);
    hasher.finish()
}

/// Deduplicates style resolution by sorted class-set identity.
///
/// Archetypes are never removed; ids are dense and start at 1.
#[derive(Debug)]
pub struct ArchetypeTable<R = ClassRules> {
    archetypes: Vec<Archetype>,
    /// Hash -> candidate ids. Several ids share a bucket on collision.
    index: FxHashMap<u64, SmallVec<[ArchetypeId; 1]>>,
    resolver: R,
    lookups: u64,
    hits: u64,
}

impl<R: Default> Default for ArchetypeTable<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R> ArchetypeTable<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            archetypes: Vec::new(),
            index: FxHashMap::default(),
            resolver,
            lookups: 0,
            hits: 0,
        }
    }

    /// Number of archetypes created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn get_archetype(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.get(id.index())
    }

    /// Resolver used for new archetypes.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn stats(&self) -> ArchetypeStats {
        ArchetypeStats {
            archetypes: self.archetypes.len(),
            lookups: self.lookups,
            hits: self.hits,
        }
    }

    /// Iterate `(id, archetype)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ArchetypeId, &Archetype)> + '_ {
        self.archetypes
            .iter()
            .enumerate()
            .filter_map(|(index, archetype)| ArchetypeId::from_index(index).map(|id| (id, archetype)))
    }

    fn find(&self, hash: u64, class_ids: &[Atom]) -> Option<ArchetypeId> {
        self.index.get(&hash)?.iter().copied().find(|candidate| {
            self.get_archetype(*candidate)
                .is_some_and(|archetype| archetype.class_ids.as_slice() == class_ids)
        })
    }
}

impl<R: PropertyResolver> ArchetypeTable<R> {
    /// Return the archetype for `class_ids`, creating it on first sight.
    ///
    /// Input order and duplicates do not matter: the set is sorted and
    /// deduplicated before hashing.
    pub fn get_or_create_archetype(&mut self, class_ids: &[Atom]) -> ArchetypeId {
        let mut sorted: ClassSet = class_ids.iter().copied().collect();
        sorted.sort_unstable();
        sorted.dedup();
        let hash = class_set_hash(&sorted);
        self.lookups += 1;

        if let Some(existing) = self.find(hash, &sorted) {
            self.hits += 1;
            trace!(target: "css::archetypes", "archetype hit {existing} for {} classes", sorted.len());
            return existing;
        }

        let Some(id) = ArchetypeId::from_index(self.archetypes.len()) else {
            debug!(target: "css::archetypes", "archetype id space exhausted");
            return ArchetypeId::MAX;
        };
        let properties = self.resolver.resolve(&sorted);
        debug!(
            target: "css::archetypes",
            "new archetype {id}: {} classes, {} properties",
            sorted.len(),
            properties.len()
        );
        self.archetypes.push(Archetype {
            class_ids: sorted,
            properties,
            hash,
        });
        self.index.entry(hash).or_default().push(id);
        id
    }
}

/// Copy each property's scalar into `target` starting at `offset`.
///
/// Writes that would land past the end of `target` are skipped. Returns the
/// number of values written.
pub fn apply_archetype(target: &mut [f32], archetype: &Archetype, offset: usize) -> usize {
    let mut written = 0;
    for (position, property) in archetype.properties.iter().enumerate() {
        let Some(slot) = offset
            .checked_add(position)
            .and_then(|index| target.get_mut(index))
        else {
            continue;
        };
        *slot = property.value.numeric();
        written += 1;
    }
    written
}
