//! Parser for Mojang's (proguard-style) mapping files.
//!
//! ```text
//! net.minecraft.server.MinecraftServer -> net.minecraft.server.MinecraftServer:
//!     java.util.logging.Logger LOGGER -> a
//!     12:14:void tick(java.util.function.BooleanSupplier) -> b
//! ```
use log::trace;

use crate::error::RemapError;
use crate::model::{IdentifierRecord, ClassEntry, MappingCollection};
use crate::report::{Diagnostics, content_lines};

const ARROW: &str = " -> ";
const PACKAGE_INFO: &str = "package-info";

/// A single meaningful line of a mapping file
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MappingLine {
    ClassHeader {
        human: String,
        obfuscated: String,
    },
    FieldEntry {
        field_type: String,
        human: String,
        obfuscated: String,
    },
    MethodEntry {
        return_type: String,
        human: String,
        param_types: Vec<String>,
        obfuscated: String,
    }
}
impl MappingLine {
    pub fn parse(line: &str) -> Result<MappingLine, RemapError> {
        let indented = line.starts_with(char::is_whitespace);
        let body = line.trim();
        if !indented {
            parse_class_header(body)
        } else if body.contains('(') || body.starts_with(|c: char| c.is_ascii_digit()) {
            parse_method(body)
        } else {
            parse_field(body)
        }
    }
}

fn split_arrow<'a>(body: &'a str, shape: &'static str) -> Result<(&'a str, &'a str), RemapError> {
    let index = body.rfind(ARROW)
        .ok_or_else(|| RemapError::grammar(shape, "missing ' -> ' separator"))?;
    let left = body[..index].trim();
    let right = body[(index + ARROW.len())..].trim();
    if left.is_empty() || right.is_empty() {
        return Err(RemapError::grammar(shape, "empty name around ' -> '"))
    }
    if right.contains(char::is_whitespace) {
        return Err(RemapError::grammar(shape, "obfuscated name contains whitespace"))
    }
    Ok((left, right))
}

fn parse_class_header(body: &str) -> Result<MappingLine, RemapError> {
    let shape = "class header";
    if !body.ends_with(':') {
        return Err(RemapError::grammar(shape, "missing trailing ':'"))
    }
    let (human, obfuscated) = split_arrow(&body[..(body.len() - 1)], shape)?;
    if human.contains(char::is_whitespace) {
        return Err(RemapError::grammar(shape, "class name contains whitespace"))
    }
    Ok(MappingLine::ClassHeader { human: human.into(), obfuscated: obfuscated.into() })
}

fn parse_field(body: &str) -> Result<MappingLine, RemapError> {
    let shape = "field entry";
    let (declaration, obfuscated) = split_arrow(body, shape)?;
    let parts: Vec<&str> = declaration.split_whitespace().collect();
    match parts[..] {
        [field_type, human] => Ok(MappingLine::FieldEntry {
            field_type: field_type.into(),
            human: human.into(),
            obfuscated: obfuscated.into()
        }),
        _ => Err(RemapError::grammar(shape, format!("expected '<type> <name>', got {:?}", declaration)))
    }
}

/// Strip a leading `<n>:<n>:` line range
fn strip_line_range(body: &str) -> Result<&str, RemapError> {
    let mut remaining = body;
    for _ in 0..2 {
        let digits = remaining.len() - remaining.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || !remaining[digits..].starts_with(':') {
            return Err(RemapError::grammar("method entry", "malformed line range"))
        }
        remaining = &remaining[(digits + 1)..];
    }
    Ok(remaining)
}

/// Check for the `:<n>:<n>` original line numbers newer mappings put after the parameters
fn is_line_suffix(s: &str) -> bool {
    s.is_empty() || (s.starts_with(':') && s[1..].split(':').all(|part| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
    }))
}

fn parse_method(body: &str) -> Result<MappingLine, RemapError> {
    let shape = "method entry";
    let body = if body.starts_with(|c: char| c.is_ascii_digit()) {
        strip_line_range(body)?
    } else {
        body
    };
    let (declaration, obfuscated) = split_arrow(body, shape)?;
    let open = declaration.find('(')
        .ok_or_else(|| RemapError::grammar(shape, "missing '('"))?;
    let close = declaration.rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| RemapError::grammar(shape, "missing ')'"))?;
    if !is_line_suffix(&declaration[(close + 1)..]) {
        return Err(RemapError::grammar(shape, "unexpected data after ')'"))
    }
    let head: Vec<&str> = declaration[..open].split_whitespace().collect();
    let (return_type, human) = match head[..] {
        [return_type, human] => (return_type, human),
        _ => return Err(RemapError::grammar(shape, "expected '<return type> <name>(...)'"))
    };
    let params_body = declaration[(open + 1)..close].trim();
    let param_types = if params_body.is_empty() {
        Vec::new()
    } else {
        params_body.split(',').map(str::trim).map(String::from).collect::<Vec<_>>()
    };
    if param_types.iter().any(String::is_empty) {
        return Err(RemapError::grammar(shape, "empty parameter type"))
    }
    Ok(MappingLine::MethodEntry {
        return_type: return_type.into(),
        human: human.into(),
        param_types,
        obfuscated: obfuscated.into()
    })
}

/// Invoked as each record is constructed, before it's added to the collection
pub trait RecordVisitor {
    fn visit_class(&mut self, _class: &mut IdentifierRecord) {}
    fn visit_field(&mut self, _owner: &IdentifierRecord, _field: &mut IdentifierRecord) {}
    fn visit_method(&mut self, _owner: &IdentifierRecord, _method: &mut IdentifierRecord) {}
}
pub struct NoopVisitor;
impl RecordVisitor for NoopVisitor {}

pub struct MappingFileParser<V: RecordVisitor> {
    label: &'static str,
    visitor: V,
    collection: MappingCollection,
    /// Whether we're inside a class that was deliberately skipped
    skipping_class: bool,
}
impl<V: RecordVisitor> MappingFileParser<V> {
    #[inline]
    pub fn new(label: &'static str, visitor: V) -> Self {
        MappingFileParser { label, visitor, collection: MappingCollection::new(), skipping_class: false }
    }
    pub fn parse_line(&mut self, line: &str) -> Result<(), RemapError> {
        match MappingLine::parse(line)? {
            MappingLine::ClassHeader { human, obfuscated } => {
                if human.ends_with(PACKAGE_INFO) {
                    self.skipping_class = true;
                    return Ok(())
                }
                self.skipping_class = false;
                trace!("{} '{}' -> '{}'", self.label, obfuscated, human);
                let mut identity = IdentifierRecord::class(obfuscated, human);
                self.visitor.visit_class(&mut identity);
                self.collection.classes.push(ClassEntry::new(identity));
            },
            MappingLine::FieldEntry { field_type, human, obfuscated } => {
                if self.skipping_class { return Ok(()) }
                let class = current_class(&mut self.collection, "field entry")?;
                let mut field = IdentifierRecord::field(obfuscated, human, field_type);
                self.visitor.visit_field(&class.identity, &mut field);
                class.fields.push(field);
            },
            MappingLine::MethodEntry { return_type, human, param_types, obfuscated } => {
                if self.skipping_class { return Ok(()) }
                let class = current_class(&mut self.collection, "method entry")?;
                let mut method = IdentifierRecord::method(obfuscated, human, param_types, return_type);
                self.visitor.visit_method(&class.identity, &mut method);
                class.methods.push(method);
            }
        }
        Ok(())
    }
    /// Parse every line of the text, recording and skipping the lines that fail
    pub fn parse_text(&mut self, text: &str, diagnostics: &mut Diagnostics) {
        for (line_number, line) in content_lines(text) {
            if let Err(e) = self.parse_line(line) {
                diagnostics.record(line_number, line, e);
            }
        }
    }
    #[inline]
    pub fn finish(self) -> (MappingCollection, V) {
        (self.collection, self.visitor)
    }
}

fn current_class<'a>(
    collection: &'a mut MappingCollection,
    shape: &'static str
) -> Result<&'a mut ClassEntry, RemapError> {
    collection.classes.last_mut()
        .ok_or_else(|| RemapError::grammar(shape, "member declared before any class"))
}

/// Parse a mapping file without observing the records as they're built
pub fn parse_mappings(text: &str, label: &'static str, diagnostics: &mut Diagnostics) -> MappingCollection {
    let mut parser = MappingFileParser::new(label, NoopVisitor);
    parser.parse_text(text, diagnostics);
    parser.finish().0
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn class_header() {
        assert_eq!(
            MappingLine::parse("net.minecraft.server.Main -> net.minecraft.server.Main:").unwrap(),
            MappingLine::ClassHeader {
                human: "net.minecraft.server.Main".into(),
                obfuscated: "net.minecraft.server.Main".into()
            }
        );
        assert_eq!(
            MappingLine::parse("a.b.C -> x:").unwrap(),
            MappingLine::ClassHeader { human: "a.b.C".into(), obfuscated: "x".into() }
        );
        assert!(MappingLine::parse("a.b.C -> x").is_err());
        assert!(MappingLine::parse("a.b.C x:").is_err());
    }
    #[test]
    fn field_entry() {
        assert_eq!(
            MappingLine::parse("    int f -> g").unwrap(),
            MappingLine::FieldEntry { field_type: "int".into(), human: "f".into(), obfuscated: "g".into() }
        );
        assert_eq!(
            MappingLine::parse("\tjava.util.Map$Entry[] entries -> b").unwrap(),
            MappingLine::FieldEntry {
                field_type: "java.util.Map$Entry[]".into(),
                human: "entries".into(),
                obfuscated: "b".into()
            }
        );
        assert!(MappingLine::parse("    int -> g").is_err());
        assert!(MappingLine::parse("    int f g").is_err());
    }
    #[test]
    fn method_entry() {
        assert_eq!(
            MappingLine::parse("    11:11:void <init>() -> <init>").unwrap(),
            MappingLine::MethodEntry {
                return_type: "void".into(),
                human: "<init>".into(),
                param_types: Vec::new(),
                obfuscated: "<init>".into()
            }
        );
        assert_eq!(
            MappingLine::parse("    java.lang.String format(int,a.b.C[]) -> a").unwrap(),
            MappingLine::MethodEntry {
                return_type: "java.lang.String".into(),
                human: "format".into(),
                param_types: strings(&["int", "a.b.C[]"]),
                obfuscated: "a".into()
            }
        );
        assert_eq!(
            MappingLine::parse("    13:13:java.util.Map$Entry eldest():168:168 -> a").unwrap(),
            MappingLine::MethodEntry {
                return_type: "java.util.Map$Entry".into(),
                human: "eldest".into(),
                param_types: Vec::new(),
                obfuscated: "a".into()
            }
        );
        assert!(MappingLine::parse("    1:void broken() -> a").is_err());
        assert!(MappingLine::parse("    void broken( -> a").is_err());
        assert!(MappingLine::parse("    void broken(int,) -> a").is_err());
        assert!(MappingLine::parse("    broken() -> a").is_err());
    }
    #[test]
    fn parse_collection() {
        let text = "\
# comment
a.b.C -> x:
    int f -> g
    1:1:void <init>() -> <init>
    void add(int) -> a
    void add(int,long) -> a
a.b.package-info -> y:
a.b.D -> z:
    this is garbage
    long count -> c
";
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let collection = parse_mappings(text, "old", &mut diagnostics);
        assert_eq!(collection.len(), 2);
        let first = &collection.classes[0];
        assert_eq!(first.obfuscated_name(), "x");
        assert_eq!(first.human_name(), Some("a.b.C"));
        assert_eq!(first.fields.len(), 1);
        assert_eq!(first.fields[0].return_type(), Some("int"));
        assert_eq!(first.methods.len(), 3);
        assert_eq!(first.methods[2].param_types, strings(&["int", "long"]));
        let second = &collection.classes[1];
        assert_eq!(second.obfuscated_name(), "z");
        assert_eq!(second.fields.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.errors()[0].line_number, 9);
        assert_eq!(diagnostics.errors()[0].raw, "    this is garbage");
    }
    #[test]
    fn member_before_class() {
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let collection = parse_mappings("    int f -> g\na -> b:\n", "old", &mut diagnostics);
        assert_eq!(collection.len(), 1);
        assert!(collection.classes[0].fields.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.errors()[0].line_number, 1);
    }
    #[test]
    fn package_info_members_dropped() {
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let text = "a.A -> a:\na.package-info -> b:\n    int f -> g\n";
        let collection = parse_mappings(text, "old", &mut diagnostics);
        assert_eq!(collection.len(), 1);
        assert!(collection.classes[0].fields.is_empty());
        assert!(diagnostics.is_empty());
    }
    #[test]
    fn visitor_sees_records() {
        struct Renamer;
        impl RecordVisitor for Renamer {
            fn visit_class(&mut self, class: &mut IdentifierRecord) {
                class.community_name = Some("Bukkit".into());
            }
            fn visit_method(&mut self, owner: &IdentifierRecord, method: &mut IdentifierRecord) {
                method.community_name = owner.community_name.clone();
            }
        }
        let mut parser = MappingFileParser::new("new", Renamer);
        parser.parse_line("a.b.C -> x:").unwrap();
        parser.parse_line("    void run() -> a").unwrap();
        let (collection, _) = parser.finish();
        assert_eq!(collection.classes[0].community_name(), Some("Bukkit"));
        assert_eq!(collection.classes[0].methods[0].community_name(), Some("Bukkit"));
    }
}
