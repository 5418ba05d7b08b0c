use mappings::report::is_ignored_line;
use mappings::utils::dotted_class_name;
use mappings::MappingIndex;

/// Whether an exclusion line was carried onto the new build
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExcludeLine {
    Remapped(String),
    Unchanged(String),
}
impl ExcludeLine {
    #[inline]
    pub fn as_str(&self) -> &str {
        match *self {
            ExcludeLine::Remapped(ref line) | ExcludeLine::Unchanged(ref line) => line,
        }
    }
    #[inline]
    pub fn into_string(self) -> String {
        match self {
            ExcludeLine::Remapped(line) | ExcludeLine::Unchanged(line) => line,
        }
    }
    #[inline]
    pub fn is_remapped(&self) -> bool {
        match *self {
            ExcludeLine::Remapped(_) => true,
            ExcludeLine::Unchanged(_) => false,
        }
    }
}

pub struct ExcludeListRemapper<'a> {
    old: &'a MappingIndex,
    new: &'a MappingIndex,
}
impl<'a> ExcludeListRemapper<'a> {
    #[inline]
    pub fn new(old: &'a MappingIndex, new: &'a MappingIndex) -> Self {
        ExcludeListRemapper { old, new }
    }
    /// Find the new obfuscated name of the class with the given old obfuscated name
    pub fn remap_class(&self, old_obfuscated: &str) -> Option<&'a str> {
        let old_obfuscated = dotted_class_name(old_obfuscated.trim());
        let human = self.old.by_obfuscated_class_name(&old_obfuscated)?
            .human_name()?;
        self.new.by_human_class_name(human)
            .map(|class| class.obfuscated_name())
    }
    /// Comments and unknown classes are kept as-is
    pub fn remap_line(&self, line: &str) -> ExcludeLine {
        if is_ignored_line(line) {
            return ExcludeLine::Unchanged(line.into())
        }
        match self.remap_class(line) {
            Some(obfuscated) => ExcludeLine::Remapped(obfuscated.into()),
            None => ExcludeLine::Unchanged(line.into())
        }
    }
    pub fn remap_text(&self, text: &str) -> Vec<ExcludeLine> {
        text.lines().map(|line| self.remap_line(line)).collect()
    }
}
