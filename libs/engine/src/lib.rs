//! Carries Bukkit's mappings from one minecraft build onto the next.
//!
//! The phases always run in the same order:
//! 1. Load Mojang's mappings for the old build
//! 2. Attach Bukkit's class and member names to the old build (plus the anchor classes)
//! 3. Load Mojang's mappings for the new build, bridging Bukkit names across as each record is read
//! 4. Remap the exclusion list from the old obfuscated names to the new ones
//! 5. Render the new class mappings, member mappings and exclusion list
//!
//! A line that can't be parsed or resolved is reported and skipped,
//! so a run always produces output.
extern crate failure;
extern crate indexmap;
extern crate itertools;
extern crate log;
extern crate serde;
extern crate serde_derive;
#[cfg(dummy)]
extern crate bukkit_remapper as mappings;

pub mod bridge;
pub mod config;
pub mod exclude;
pub mod link;
pub mod output;

use indexmap::IndexMap;
use log::info;
use serde_derive::Serialize;

use mappings::parser::{parse_mappings, MappingFileParser};
use mappings::{MappingIndex, Diagnostics};

pub use self::bridge::VersionBridge;
pub use self::config::RemapConfig;
pub use self::exclude::{ExcludeListRemapper, ExcludeLine};
pub use self::link::BukkitLinkResolver;

/// The text of every input file
#[derive(Copy, Clone, Debug)]
pub struct RemapInputs<'a> {
    pub old_mappings: &'a str,
    pub class_links: &'a str,
    pub member_links: &'a str,
    pub excludes: &'a str,
    pub new_mappings: &'a str,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RemapSummary {
    pub old_classes: usize,
    pub old_members: usize,
    pub linked_classes: usize,
    pub linked_members: usize,
    pub new_classes: usize,
    pub new_members: usize,
    pub bridged_classes: usize,
    pub bridged_members: usize,
    pub retyped_fields: usize,
    pub remapped_excludes: usize,
    pub unchanged_excludes: usize,
    /// The number of skipped lines in each input file
    pub line_errors: IndexMap<&'static str, usize>,
}

pub struct RemapOutput {
    pub class_links: Vec<String>,
    pub member_links: Vec<String>,
    pub excludes: Vec<String>,
    pub summary: RemapSummary,
    pub old: MappingIndex,
    pub new: MappingIndex,
}

pub struct Remapper {
    config: RemapConfig,
}
impl Remapper {
    #[inline]
    pub fn new(config: RemapConfig) -> Remapper {
        Remapper { config }
    }
    #[inline]
    pub fn config(&self) -> &RemapConfig {
        &self.config
    }
    pub fn run(&self, inputs: RemapInputs) -> RemapOutput {
        let mut summary = RemapSummary::default();
        let mut old = self.load_old(inputs.old_mappings, &mut summary);
        self.link_old(&mut old, inputs.class_links, inputs.member_links, &mut summary);
        let new = self.load_new(&old, inputs.new_mappings, &mut summary);
        let excludes = ExcludeListRemapper::new(&old, &new)
            .remap_text(inputs.excludes);
        summary.remapped_excludes = excludes.iter().filter(|line| line.is_remapped()).count();
        summary.unchanged_excludes = excludes.len() - summary.remapped_excludes;
        info!(
            "Remapped {} excludes ({} unchanged)",
            summary.remapped_excludes, summary.unchanged_excludes
        );
        RemapOutput {
            class_links: output::class_link_lines(&new),
            member_links: output::member_link_lines(&new),
            excludes: output::exclude_lines(excludes),
            summary,
            old,
            new
        }
    }
    fn load_old(&self, text: &str, summary: &mut RemapSummary) -> MappingIndex {
        let mut diagnostics = Diagnostics::new("mojang mapping");
        let collection = parse_mappings(text, "old", &mut diagnostics);
        summary.old_classes = collection.len();
        summary.old_members = collection.member_count();
        info!("Old: {} classes loaded", summary.old_classes);
        info!("Old: {} members loaded", summary.old_members);
        record_errors(summary, &diagnostics);
        MappingIndex::build(collection)
    }
    fn link_old(&self, old: &mut MappingIndex, class_links: &str, member_links: &str, summary: &mut RemapSummary) {
        let mut resolver = BukkitLinkResolver::new(old);
        let mut diagnostics = Diagnostics::new("bukkit cl mapping");
        summary.linked_classes = resolver.link_classes(class_links, &mut diagnostics);
        summary.linked_classes += resolver.link_anchors(&self.config.anchors);
        info!("Linked {} classes (Bukkit <-> Mojang)", summary.linked_classes);
        record_errors(summary, &diagnostics);
        let mut diagnostics = Diagnostics::new("bukkit members mapping");
        summary.linked_members = resolver.link_members(member_links, &mut diagnostics);
        info!("Linked {} members (Bukkit <-> Mojang)", summary.linked_members);
        record_errors(summary, &diagnostics);
    }
    fn load_new(&self, old: &MappingIndex, text: &str, summary: &mut RemapSummary) -> MappingIndex {
        let mut diagnostics = Diagnostics::new("mojang mapping (new)");
        let mut parser = MappingFileParser::new("new", VersionBridge::new(old));
        parser.parse_text(text, &mut diagnostics);
        let (collection, bridge) = parser.finish();
        summary.new_classes = collection.len();
        summary.new_members = collection.member_count();
        summary.bridged_classes = bridge.bridged_classes();
        summary.bridged_members = bridge.bridged_members();
        summary.retyped_fields = bridge.retyped_fields();
        info!("New: {} classes loaded", summary.new_classes);
        info!("New: {} members loaded", summary.new_members);
        info!(
            "Bridged {} classes and {} members onto the new mappings",
            summary.bridged_classes, summary.bridged_members
        );
        record_errors(summary, &diagnostics);
        MappingIndex::build(collection)
    }
}
impl Default for Remapper {
    #[inline]
    fn default() -> Self {
        Remapper::new(RemapConfig::default())
    }
}
fn record_errors(summary: &mut RemapSummary, diagnostics: &Diagnostics) {
    *summary.line_errors.entry(diagnostics.source()).or_insert(0) += diagnostics.len();
}

#[cfg(test)]
mod test {
    use super::*;

    const OLD_MAPPINGS: &str = "\
# old build
net.minecraft.server.MinecraftServer -> net.minecraft.server.MinecraftServer:
    a.b.C world -> a
a.b.C -> x:
    int f -> g
    long count -> h
    void add(int) -> a
    void add(a.b.D) -> a
    a.b.D[] all() -> b
a.b.D -> w:
a.b.Gone -> v:
";
    const CLASS_LINKS: &str = "\
# bukkit classes
x com/example/C
w com/example/D
v com/example/Gone
";
    const MEMBER_LINKS: &str = "\
com/example/C g field1
com/example/C h count
com/example/C a (I)V addInt
com/example/C a (Lcom/example/D;)V addD
com/example/C b ()[Lcom/example/D; all
net/minecraft/server/MinecraftServer a world
com/example/C a (J)V missing
";
    const EXCLUDES: &str = "\
# excluded
x
unknown
";
    const NEW_MAPPINGS: &str = "\
net.minecraft.server.MinecraftServer -> net.minecraft.server.MinecraftServer:
    a.b.C world -> b
a.b.D -> q:
a.b.C -> y:
    int f -> c
    int count -> d
    void add(a.b.D) -> e
    void add(int) -> e
    a.b.D[] all() -> f
a.b.New -> x:
";

    fn run() -> RemapOutput {
        Remapper::default().run(RemapInputs {
            old_mappings: OLD_MAPPINGS,
            class_links: CLASS_LINKS,
            member_links: MEMBER_LINKS,
            excludes: EXCLUDES,
            new_mappings: NEW_MAPPINGS,
        })
    }

    #[test]
    fn resolves_old_names() {
        let output = run();
        let class = output.old.by_obfuscated_class_name("x").unwrap();
        assert_eq!(class.community_name(), Some("com/example/C"));
        assert_eq!(class.fields[0].community_name(), Some("field1"));
        assert_eq!(class.methods[0].community_name(), Some("addInt"));
        assert_eq!(class.methods[1].community_name(), Some("addD"));
        assert_eq!(output.summary.linked_classes, 4);
        assert_eq!(output.summary.linked_members, 6);
        assert_eq!(output.summary.line_errors["bukkit members mapping"], 1);
        assert_eq!(output.summary.line_errors["bukkit cl mapping"], 0);
    }
    #[test]
    fn writes_new_class_links() {
        assert_eq!(run().class_links, vec![
            "net.minecraft.server.MinecraftServer net.minecraft.server.MinecraftServer",
            "q com/example/D",
            "y com/example/C",
        ]);
    }
    #[test]
    fn writes_new_member_links() {
        assert_eq!(run().member_links, vec![
            "com/example/C c field1",
            "com/example/C e (I)V addInt",
            "com/example/C e (Lcom/example/D;)V addD",
            "com/example/C f ()[Lcom/example/D; all",
            "net.minecraft.server.MinecraftServer b world",
        ]);
    }
    #[test]
    fn remaps_excludes() {
        let output = run();
        assert_eq!(output.excludes, vec!["# excluded", "unknown", "y"]);
        assert_eq!(output.summary.remapped_excludes, 1);
        assert_eq!(output.summary.unchanged_excludes, 2);
    }
    #[test]
    fn retyped_fields_are_counted() {
        let output = run();
        assert_eq!(output.summary.retyped_fields, 1);
        assert_eq!(output.summary.bridged_classes, 3);
        assert_eq!(output.summary.bridged_members, 5);
    }
    #[test]
    fn output_is_deterministic() {
        let first = run();
        let second = run();
        assert_eq!(first.class_links, second.class_links);
        assert_eq!(first.member_links, second.member_links);
        assert_eq!(first.excludes, second.excludes);
    }
    #[test]
    fn slashed_links_stay_slashed() {
        let output = Remapper::default().run(RemapInputs {
            old_mappings: "net.minecraft.server.Foo -> x:\n    int f -> g\n",
            class_links: "x net/minecraft/server/Foo\n",
            member_links: "net/minecraft/server/Foo g field1\n",
            excludes: "",
            new_mappings: "net.minecraft.server.Foo -> y:\n    int f -> h\n",
        });
        assert_eq!(output.class_links, vec!["y net/minecraft/server/Foo"]);
        assert_eq!(output.member_links, vec!["net/minecraft/server/Foo h field1"]);
    }
    #[test]
    fn custom_anchors() {
        let remapper = Remapper::new(RemapConfig::with_anchors(Vec::new()));
        let output = remapper.run(RemapInputs {
            old_mappings: OLD_MAPPINGS,
            class_links: CLASS_LINKS,
            member_links: MEMBER_LINKS,
            excludes: EXCLUDES,
            new_mappings: NEW_MAPPINGS,
        });
        assert_eq!(output.summary.linked_classes, 3);
        assert!(output.class_links.iter().all(|line| !line.starts_with("net.minecraft")));
    }
}
