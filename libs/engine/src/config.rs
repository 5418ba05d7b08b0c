use serde_derive::{Serialize, Deserialize};

/// Classes whose obfuscated, human and Bukkit names are always identical.
///
/// The server entry points are never obfuscated, and Bukkit's class mappings don't list them.
pub const DEFAULT_ANCHORS: &[&str] = &[
    "net.minecraft.server.MinecraftServer",
    "net.minecraft.server.Main",
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RemapConfig {
    #[serde(default = "default_anchors")]
    pub anchors: Vec<String>,
}
impl RemapConfig {
    #[inline]
    pub fn with_anchors(anchors: Vec<String>) -> RemapConfig {
        RemapConfig { anchors }
    }
}
impl Default for RemapConfig {
    #[inline]
    fn default() -> Self {
        RemapConfig { anchors: default_anchors() }
    }
}
fn default_anchors() -> Vec<String> {
    DEFAULT_ANCHORS.iter().map(|&anchor| String::from(anchor)).collect()
}
