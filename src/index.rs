//! Lookup layer over a loaded [`MappingCollection`].
//!
//! The index owns its collection so that community names can only be assigned
//! through it, keeping the community name lookup in sync with the records.
//!
//! Community names are stored exactly as they were linked (Bukkit's files use slashes),
//! but are looked up by their dotted form.
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::descriptor::split_array_suffix;
use crate::error::RemapError;
use crate::model::{ClassEntry, MappingCollection};
use crate::utils::dotted_class_name;

#[derive(Debug, Default)]
pub struct MappingIndex {
    collection: MappingCollection,
    by_obfuscated: IndexMap<String, usize>,
    by_human: IndexMap<String, usize>,
    by_community: IndexMap<String, usize>,
}
impl MappingIndex {
    pub fn build(collection: MappingCollection) -> MappingIndex {
        let mut by_obfuscated = IndexMap::with_capacity(collection.len());
        let mut by_human = IndexMap::with_capacity(collection.len());
        let mut by_community = IndexMap::new();
        for (index, class) in collection.iter().enumerate() {
            // The first declaration wins if a name is somehow repeated
            insert_first(&mut by_obfuscated, class.obfuscated_name(), index);
            if let Some(human) = class.human_name() {
                insert_first(&mut by_human, human, index);
            }
            if let Some(community) = class.community_name() {
                insert_first(&mut by_community, &dotted_class_name(community), index);
            }
        }
        MappingIndex { collection, by_obfuscated, by_human, by_community }
    }
    #[inline]
    pub fn collection(&self) -> &MappingCollection {
        &self.collection
    }
    #[inline]
    pub fn classes(&self) -> ::std::slice::Iter<ClassEntry> {
        self.collection.iter()
    }
    #[inline]
    pub fn into_collection(self) -> MappingCollection {
        self.collection
    }
    #[inline]
    pub fn by_obfuscated_class_name(&self, name: &str) -> Option<&ClassEntry> {
        self.by_obfuscated.get(name).map(|&index| &self.collection.classes[index])
    }
    #[inline]
    pub fn by_human_class_name(&self, name: &str) -> Option<&ClassEntry> {
        self.by_human.get(name).map(|&index| &self.collection.classes[index])
    }
    #[inline]
    pub fn by_community_class_name(&self, name: &str) -> Option<&ClassEntry> {
        self.by_community.get(&*dotted_class_name(name))
            .map(|&index| &self.collection.classes[index])
    }
    /// Mutable access for assigning member names, which aren't indexed
    #[inline]
    pub fn by_community_class_name_mut(&mut self, name: &str) -> Option<&mut ClassEntry> {
        match self.by_community.get(&*dotted_class_name(name)) {
            Some(&index) => Some(&mut self.collection.classes[index]),
            None => None
        }
    }
    /// Assign the community name of the class with the given obfuscated name.
    ///
    /// If several classes are given the same community name,
    /// lookups find the one declared first.
    pub fn link_class(&mut self, obfuscated: &str, community: &str) -> Result<(), RemapError> {
        let index = *self.by_obfuscated.get(obfuscated)
            .ok_or_else(|| RemapError::missing_class("obfuscated", obfuscated))?;
        let previous = self.collection.classes[index].identity.community_name
            .replace(community.into());
        if let Some(previous) = previous {
            let previous_key = dotted_class_name(&previous).into_owned();
            if self.by_community.get(&previous_key) == Some(&index) {
                self.by_community.remove(&previous_key);
                // Another class may still hold the old name
                if let Some(other) = self.first_with_community_key(&previous_key) {
                    self.by_community.insert(previous_key, other);
                }
            }
        }
        let key = dotted_class_name(community).into_owned();
        let current = self.by_community.get(&key).cloned();
        match current {
            Some(current) if current < index && self.has_community_key(current, &key) => {},
            _ => { self.by_community.insert(key, index); }
        }
        Ok(())
    }
    fn has_community_key(&self, index: usize, key: &str) -> bool {
        self.collection.classes[index].community_name()
            .map_or(false, |name| dotted_class_name(name) == key)
    }
    fn first_with_community_key(&self, key: &str) -> Option<usize> {
        (0..self.collection.len()).find(|&index| self.has_community_key(index, key))
    }
    /// Translate a community type name into the human name of the same class,
    /// leaving unknown classes (and primitives) untouched.
    pub fn resolve_human_or_default_from_community_type(&self, name: &str) -> String {
        let (base, array_depth) = split_array_suffix(name);
        match self.by_community_class_name(base).and_then(ClassEntry::human_name) {
            Some(human) => with_array_depth(human, array_depth),
            None => name.into()
        }
    }
    /// Translate a human type name into the name the output should use for it:
    /// the community name if one was resolved, otherwise the obfuscated name.
    ///
    /// Unknown classes (and primitives) are left untouched.
    pub fn resolve_obfuscated_or_default_from_human_type(&self, name: &str) -> String {
        let (base, array_depth) = split_array_suffix(name);
        match self.by_human_class_name(base) {
            Some(class) => {
                let target = class.community_name()
                    .unwrap_or_else(|| class.obfuscated_name());
                with_array_depth(target, array_depth)
            },
            None => name.into()
        }
    }
}
fn insert_first(map: &mut IndexMap<String, usize>, key: &str, index: usize) {
    if let Entry::Vacant(entry) = map.entry(key.into()) {
        entry.insert(index);
    }
}
fn with_array_depth(base: &str, array_depth: usize) -> String {
    let mut result = String::with_capacity(base.len() + array_depth * 2);
    result.push_str(base);
    for _ in 0..array_depth {
        result.push_str("[]");
    }
    result
}
