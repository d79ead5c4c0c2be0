//! Injected cascade.
//!
//! Selector matching and the full cascade live outside this crate. The table
//! only needs something that turns a sorted class set into a property list.

use crate::property::StyleProperty;
use node_table::Atom;
use rustc_hash::FxHashMap;

/// Resolves the property list for a sorted, deduplicated class set.
pub trait PropertyResolver {
    fn resolve(&self, class_ids: &[Atom]) -> Vec<StyleProperty>;
}

impl<F> PropertyResolver for F
where
    F: Fn(&[Atom]) -> Vec<StyleProperty>,
{
    fn resolve(&self, class_ids: &[Atom]) -> Vec<StyleProperty> {
        self(class_ids)
    }
}

/// Per-class declaration lists cascaded over a default list.
///
/// Classes apply in ascending id order, so for a property declared by two
/// classes the higher class id wins.
#[derive(Clone, Debug, Default)]
pub struct ClassRules {
    defaults: Vec<StyleProperty>,
    rules: FxHashMap<Atom, Vec<StyleProperty>>,
}

impl ClassRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties every archetype starts from.
    pub fn with_defaults(defaults: Vec<StyleProperty>) -> Self {
        Self {
            defaults,
            rules: FxHashMap::default(),
        }
    }

    /// Declare (or replace) the properties contributed by `class`.
    pub fn insert(&mut self, class: Atom, properties: Vec<StyleProperty>) {
        self.rules.insert(class, properties);
    }

    pub fn get(&self, class: Atom) -> Option<&[StyleProperty]> {
        self.rules.get(&class).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Override `property` in place, or append it.
fn cascade_into(resolved: &mut Vec<StyleProperty>, property: &StyleProperty) {
    match resolved.iter_mut().find(|existing| existing.id == property.id) {
        Some(existing) => existing.value = property.value.clone(),
        None => resolved.push(property.clone()),
    }
}

impl PropertyResolver for ClassRules {
    fn resolve(&self, class_ids: &[Atom]) -> Vec<StyleProperty> {
        let mut resolved = self.defaults.clone();
        for class in class_ids {
            if let Some(declared) = self.rules.get(class) {
                for property in declared {
                    cascade_into(&mut resolved, property);
                }
            }
        }
        resolved
    }
}
