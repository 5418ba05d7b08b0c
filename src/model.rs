use itertools::Itertools;
use serde_derive::Serialize;

/// A single class, field or method as named by the obfuscator,
/// Mojang's mappings, and (once resolved) Bukkit.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct IdentifierRecord {
    pub obfuscated_name: String,
    pub human_name: Option<String>,
    pub community_name: Option<String>,
    /// The human type names of the parameters (empty for classes and fields)
    pub param_types: Vec<String>,
    /// The human type name of a field or the return type of a method
    pub return_type: Option<String>,
}
impl IdentifierRecord {
    #[inline]
    pub fn class(obfuscated_name: String, human_name: String) -> IdentifierRecord {
        IdentifierRecord {
            obfuscated_name,
            human_name: Some(human_name),
            ..Default::default()
        }
    }
    #[inline]
    pub fn field(obfuscated_name: String, human_name: String, field_type: String) -> IdentifierRecord {
        IdentifierRecord {
            obfuscated_name,
            human_name: Some(human_name),
            return_type: Some(field_type),
            ..Default::default()
        }
    }
    #[inline]
    pub fn method(
        obfuscated_name: String,
        human_name: String,
        param_types: Vec<String>,
        return_type: String
    ) -> IdentifierRecord {
        IdentifierRecord {
            obfuscated_name,
            human_name: Some(human_name),
            community_name: None,
            param_types,
            return_type: Some(return_type)
        }
    }
    #[inline]
    pub fn human_name(&self) -> Option<&str> {
        self.human_name.as_ref().map(String::as_str)
    }
    #[inline]
    pub fn community_name(&self) -> Option<&str> {
        self.community_name.as_ref().map(String::as_str)
    }
    #[inline]
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_ref().map(String::as_str)
    }
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.community_name.is_some()
    }
    /// The comma-joined parameter list, which identifies an overload together with the name
    #[inline]
    pub fn joined_params(&self) -> String {
        self.param_types.iter().join(",")
    }
    /// Check whether the human name, return type and parameters are all identical
    pub fn same_signature(&self, other: &IdentifierRecord) -> bool {
        self.human_name == other.human_name
            && self.return_type == other.return_type
            && self.param_types == other.param_types
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ClassEntry {
    pub identity: IdentifierRecord,
    pub fields: Vec<IdentifierRecord>,
    /// Overloads share an obfuscated name and differ only in their signature
    pub methods: Vec<IdentifierRecord>,
}
impl ClassEntry {
    #[inline]
    pub fn new(identity: IdentifierRecord) -> ClassEntry {
        ClassEntry { identity, fields: Vec::new(), methods: Vec::new() }
    }
    #[inline]
    pub fn obfuscated_name(&self) -> &str {
        &self.identity.obfuscated_name
    }
    #[inline]
    pub fn human_name(&self) -> Option<&str> {
        self.identity.human_name()
    }
    #[inline]
    pub fn community_name(&self) -> Option<&str> {
        self.identity.community_name()
    }
    #[inline]
    pub fn member_count(&self) -> usize {
        self.fields.len() + self.methods.len()
    }
    pub fn field_by_obfuscated_name(&self, obfuscated: &str) -> Option<&IdentifierRecord> {
        self.fields.iter().find(|field| field.obfuscated_name == obfuscated)
    }
    pub fn field_by_obfuscated_name_mut(&mut self, obfuscated: &str) -> Option<&mut IdentifierRecord> {
        self.fields.iter_mut().find(|field| field.obfuscated_name == obfuscated)
    }
    pub fn methods_by_obfuscated_name<'a>(&'a self, obfuscated: &'a str) -> impl Iterator<Item=&'a IdentifierRecord> + 'a {
        self.methods.iter().filter(move |method| method.obfuscated_name == obfuscated)
    }
}

/// All the classes loaded from a single mapping file, in file order
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MappingCollection {
    pub classes: Vec<ClassEntry>,
}
impl MappingCollection {
    #[inline]
    pub fn new() -> MappingCollection {
        MappingCollection::default()
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
    #[inline]
    pub fn member_count(&self) -> usize {
        self.classes.iter().map(ClassEntry::member_count).sum()
    }
    #[inline]
    pub fn iter(&self) -> ::std::slice::Iter<ClassEntry> {
        self.classes.iter()
    }
}
