//! Carries Bukkit names from the old build onto the new build as the new mappings are parsed.
//!
//! The obfuscated names of the two builds are unrelated, so records are matched by their
//! human readable names. Methods must also agree on their full signature,
//! and a field whose type changed is considered a different field.
use log::{debug, warn};

use mappings::{MappingIndex, ClassEntry, IdentifierRecord, RecordVisitor};

pub struct VersionBridge<'a> {
    old: &'a MappingIndex,
    bridged_classes: usize,
    bridged_members: usize,
    retyped_fields: usize,
}
impl<'a> VersionBridge<'a> {
    #[inline]
    pub fn new(old: &'a MappingIndex) -> Self {
        VersionBridge { old, bridged_classes: 0, bridged_members: 0, retyped_fields: 0 }
    }
    #[inline]
    pub fn bridged_classes(&self) -> usize {
        self.bridged_classes
    }
    #[inline]
    pub fn bridged_members(&self) -> usize {
        self.bridged_members
    }
    /// The number of same-named fields rejected because their type changed
    #[inline]
    pub fn retyped_fields(&self) -> usize {
        self.retyped_fields
    }
    fn old_class(&self, owner: &IdentifierRecord) -> Option<&'a ClassEntry> {
        let old = self.old;
        owner.human_name().and_then(|human| old.by_human_class_name(human))
    }
}
impl<'a> RecordVisitor for VersionBridge<'a> {
    fn visit_class(&mut self, class: &mut IdentifierRecord) {
        let old = self.old;
        let community = class.human_name()
            .and_then(|human| old.by_human_class_name(human))
            .and_then(|old| old.community_name());
        if let Some(community) = community {
            class.community_name = Some(community.into());
            self.bridged_classes += 1;
        }
    }
    fn visit_field(&mut self, owner: &IdentifierRecord, field: &mut IdentifierRecord) {
        let old_class = match self.old_class(owner) {
            Some(old_class) => old_class,
            None => return
        };
        for old in &old_class.fields {
            if old.human_name != field.human_name { continue }
            if old.return_type != field.return_type {
                warn!(
                    "{}: Type differs from original field '{}': expected: {}, new: {}",
                    owner.human_name().unwrap_or(&owner.obfuscated_name),
                    field.human_name().unwrap_or(&field.obfuscated_name),
                    old.return_type().unwrap_or("<none>"),
                    field.return_type().unwrap_or("<none>")
                );
                self.retyped_fields += 1;
                continue;
            }
            if let Some(community) = old.community_name() {
                debug!(
                    "{}: {} - {} - {}",
                    owner.human_name().unwrap_or(&owner.obfuscated_name),
                    field.obfuscated_name,
                    field.human_name().unwrap_or("<none>"),
                    community
                );
                field.community_name = Some(community.into());
                self.bridged_members += 1;
                break;
            }
        }
    }
    fn visit_method(&mut self, owner: &IdentifierRecord, method: &mut IdentifierRecord) {
        let community = self.old_class(owner)
            .and_then(|old_class| old_class.methods.iter().find(|old| old.same_signature(method)))
            .and_then(|old| old.community_name());
        if let Some(community) = community {
            method.community_name = Some(community.into());
            self.bridged_members += 1;
        }
    }
}
