//! Attaches Bukkit's names onto the old build's mappings.
//!
//! Bukkit's class mappings look like `<obfuscated> <bukkit class>`,
//! while member mappings are `<bukkit class> <obfuscated> <bukkit field>`
//! or `<bukkit class> <obfuscated> <descriptor> <bukkit method>`.
//! Method descriptors are written in terms of Bukkit's class names.
use itertools::Itertools;
use log::warn;

use mappings::descriptor::decode_signature;
use mappings::utils::{dotted_class_name, tokens};
use mappings::report::content_lines;
use mappings::{MappingIndex, RemapError, Diagnostics};

pub struct BukkitLinkResolver<'a> {
    mappings: &'a mut MappingIndex,
}
impl<'a> BukkitLinkResolver<'a> {
    #[inline]
    pub fn new(mappings: &'a mut MappingIndex) -> Self {
        BukkitLinkResolver { mappings }
    }
    pub fn resolve_class_line(&mut self, line: &str) -> Result<(), RemapError> {
        let parts = tokens(line);
        if parts.len() < 2 {
            return Err(RemapError::grammar(
                "class link",
                format!("expected '<obfuscated> <bukkit name>' but got {} tokens", parts.len())
            ))
        }
        let obfuscated = dotted_class_name(parts[0]);
        self.mappings.link_class(&obfuscated, parts[1])
    }
    /// Link every class in the class mappings, returning the number of linked classes
    pub fn link_classes(&mut self, text: &str, diagnostics: &mut Diagnostics) -> usize {
        let mut count = 0;
        for (line_number, line) in content_lines(text) {
            match self.resolve_class_line(line) {
                Ok(()) => count += 1,
                Err(e) => diagnostics.record(line_number, line, e),
            }
        }
        count
    }
    /// Link each anchor class to itself
    pub fn link_anchors<S: AsRef<str>>(&mut self, anchors: &[S]) -> usize {
        let mut count = 0;
        for anchor in anchors {
            let anchor = anchor.as_ref();
            match self.mappings.link_class(anchor, anchor) {
                Ok(()) => count += 1,
                Err(e) => warn!("Unable to anchor {}: {}", anchor, e),
            }
        }
        count
    }
    pub fn resolve_member_line(&mut self, line: &str) -> Result<(), RemapError> {
        let parts = tokens(line);
        match parts[..] {
            [class, obfuscated, community] => self.link_field(class, obfuscated, community),
            [class, obfuscated, descriptor, community] => {
                self.link_method(class, obfuscated, descriptor, community)
            },
            _ => Err(RemapError::grammar(
                "member link",
                format!("expected 3 or 4 tokens but got {}", parts.len())
            ))
        }
    }
    fn link_field(&mut self, class: &str, obfuscated: &str, community: &str) -> Result<(), RemapError> {
        let class_name = dotted_class_name(class);
        let entry = self.mappings.by_community_class_name_mut(&class_name)
            .ok_or_else(|| RemapError::missing_class("bukkit", &class_name))?;
        let field = entry.field_by_obfuscated_name_mut(obfuscated)
            .ok_or_else(|| RemapError::MissingMember {
                class: class_name.to_string(),
                kind: "field",
                obfuscated: obfuscated.into(),
                community: community.into()
            })?;
        field.community_name = Some(community.into());
        Ok(())
    }
    fn link_method(
        &mut self,
        class: &str,
        obfuscated: &str,
        descriptor: &str,
        community: &str
    ) -> Result<(), RemapError> {
        let class_name = dotted_class_name(class);
        let (params, return_type) = decode_signature(descriptor)?;
        let params: Vec<String> = params.iter()
            .map(|param| self.mappings.resolve_human_or_default_from_community_type(param))
            .collect();
        let return_type = self.mappings.resolve_human_or_default_from_community_type(&return_type);
        let entry = self.mappings.by_community_class_name_mut(&class_name)
            .ok_or_else(|| RemapError::missing_class("bukkit", &class_name))?;
        let mut candidates = entry.methods.iter_mut()
            .filter(|method| method.obfuscated_name == obfuscated)
            .peekable();
        if candidates.peek().is_none() {
            return Err(RemapError::MissingMember {
                class: class_name.to_string(),
                kind: "method",
                obfuscated: obfuscated.into(),
                community: community.into()
            })
        }
        let method = candidates.find(|method| method.param_types == params)
            .ok_or_else(|| RemapError::ParameterMismatch {
                class: class_name.to_string(),
                obfuscated: obfuscated.into(),
                community: community.into(),
                params: params.iter().join(", ")
            })?;
        if method.return_type() != Some(return_type.as_str()) {
            return Err(RemapError::ReturnTypeMismatch {
                class: class_name.to_string(),
                obfuscated: obfuscated.into(),
                community: community.into(),
                expected: method.return_type().unwrap_or("<none>").into(),
                actual: return_type
            })
        }
        method.community_name = Some(community.into());
        Ok(())
    }
    /// Link every member in the member mappings, returning the number of linked members
    pub fn link_members(&mut self, text: &str, diagnostics: &mut Diagnostics) -> usize {
        let mut count = 0;
        for (line_number, line) in content_lines(text) {
            match self.resolve_member_line(line) {
                Ok(()) => count += 1,
                Err(e) => diagnostics.record(line_number, line, e),
            }
        }
        count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mappings::parser::parse_mappings;
    use mappings::ErrorKind;

    const OLD_MAPPINGS: &str = "\
net.minecraft.server.MinecraftServer -> net.minecraft.server.MinecraftServer:
    int tickCount -> d
a.b.C -> x:
    int f -> g
    void add(int) -> a
    void add(int,a.b.D) -> a
    a.b.D get(a.b.D[]) -> b
a.b.D -> y:
";

    fn load() -> MappingIndex {
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let index = MappingIndex::build(parse_mappings(OLD_MAPPINGS, "old", &mut diagnostics));
        assert!(diagnostics.is_empty());
        index
    }

    #[test]
    fn links_classes_and_fields() {
        let mut index = load();
        {
            let mut resolver = BukkitLinkResolver::new(&mut index);
            let mut diagnostics = Diagnostics::new("bukkit cl mapping");
            assert_eq!(resolver.link_classes("x com.example.C\n", &mut diagnostics), 1);
            let mut diagnostics = Diagnostics::new("bukkit members mapping");
            assert_eq!(resolver.link_members("com.example.C g field1\n", &mut diagnostics), 1);
            assert!(diagnostics.is_empty());
        }
        let class = index.by_obfuscated_class_name("x").unwrap();
        assert_eq!(class.community_name(), Some("com.example.C"));
        assert_eq!(class.fields[0].community_name(), Some("field1"));
    }
    #[test]
    fn slashed_names_are_kept() {
        let mut index = load();
        {
            let mut resolver = BukkitLinkResolver::new(&mut index);
            resolver.resolve_class_line("x com/example/C").unwrap();
            resolver.resolve_member_line("com.example.C g field1").unwrap();
        }
        let class = index.by_obfuscated_class_name("x").unwrap();
        assert_eq!(class.community_name(), Some("com/example/C"));
        assert_eq!(class.fields[0].community_name(), Some("field1"));
    }
    #[test]
    fn shared_class_names_link_members_to_first_class() {
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let mut index = MappingIndex::build(parse_mappings(
            "a.b.C -> x:\n    int f -> g\na.b.Z -> z:\n    int f -> g\n",
            "old",
            &mut diagnostics
        ));
        {
            let mut resolver = BukkitLinkResolver::new(&mut index);
            assert_eq!(resolver.link_classes("x com/example/C\nz com/example/C\n", &mut diagnostics), 2);
            assert_eq!(resolver.link_members("com/example/C g field1\n", &mut diagnostics), 1);
        }
        assert!(diagnostics.is_empty());
        assert_eq!(index.by_obfuscated_class_name("x").unwrap().fields[0].community_name(), Some("field1"));
        assert_eq!(index.by_obfuscated_class_name("z").unwrap().fields[0].community_name(), None);
    }
    #[test]
    fn links_overloaded_methods() {
        let mut index = load();
        {
            let mut resolver = BukkitLinkResolver::new(&mut index);
            resolver.resolve_class_line("x com/example/C").unwrap();
            resolver.resolve_class_line("y com/example/D").unwrap();
            resolver.resolve_member_line("com/example/C a (ILcom/example/D;)V addWithD").unwrap();
            resolver.resolve_member_line("com/example/C a (I)V addInt").unwrap();
            resolver.resolve_member_line("com/example/C b ([Lcom/example/D;)Lcom/example/D; getD").unwrap();
        }
        let class = index.by_obfuscated_class_name("x").unwrap();
        assert_eq!(class.methods[0].community_name(), Some("addInt"));
        assert_eq!(class.methods[1].community_name(), Some("addWithD"));
        assert_eq!(class.methods[2].community_name(), Some("getD"));
    }
    #[test]
    fn method_mismatches() {
        let mut index = load();
        let mut resolver = BukkitLinkResolver::new(&mut index);
        resolver.resolve_class_line("x com/example/C").unwrap();
        let kind = |result: Result<(), RemapError>| result.unwrap_err().kind();
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C a (J)V addLong")),
            ErrorKind::ParameterMismatch
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C a (I)Z addBoolean")),
            ErrorKind::ReturnTypeMismatch
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C zz ()V missing")),
            ErrorKind::MissingMember
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C zz missingField")),
            ErrorKind::MissingMember
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/Unknown a (I)V add")),
            ErrorKind::MissingClassLookup
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C a (Q)V add")),
            ErrorKind::InvalidDescriptor
        );
        assert_eq!(
            kind(resolver.resolve_member_line("com/example/C a")),
            ErrorKind::UnmatchedLineGrammar
        );
    }
    #[test]
    fn unresolved_lines_are_skipped() {
        let mut index = load();
        let mut resolver = BukkitLinkResolver::new(&mut index);
        let mut diagnostics = Diagnostics::new("bukkit cl mapping");
        let linked = resolver.link_classes("# comment\nmissing com/example/Missing\nx com/example/C\nlonely\n", &mut diagnostics);
        assert_eq!(linked, 1);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.errors()[0].line_number, 2);
        assert_eq!(diagnostics.errors()[0].kind(), ErrorKind::MissingClassLookup);
        assert_eq!(diagnostics.errors()[1].kind(), ErrorKind::UnmatchedLineGrammar);
    }
    #[test]
    fn anchors_link_to_themselves() {
        let mut index = load();
        {
            let mut resolver = BukkitLinkResolver::new(&mut index);
            assert_eq!(resolver.link_anchors(crate::config::DEFAULT_ANCHORS), 1);
            resolver.resolve_member_line("net.minecraft.server.MinecraftServer d ticks").unwrap();
        }
        let server = index.by_community_class_name("net.minecraft.server.MinecraftServer").unwrap();
        assert_eq!(server.obfuscated_name(), "net.minecraft.server.MinecraftServer");
        assert_eq!(server.fields[0].community_name(), Some("ticks"));
    }
}
