//! Serializes the resolved new build in Bukkit's mapping formats.
//!
//! Every output is sorted by the full line, so the same resolved state always
//! produces byte-identical files.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use failure::Error;

use mappings::descriptor::encode_signature;
use mappings::MappingIndex;

use crate::exclude::ExcludeLine;

/// `<obfuscated class> <bukkit class>` for every resolved class
pub fn class_link_lines(new: &MappingIndex) -> Vec<String> {
    let mut lines: Vec<String> = new.classes()
        .filter_map(|class| {
            class.community_name()
                .map(|community| format!("{} {}", class.obfuscated_name(), community))
        })
        .collect();
    lines.sort();
    lines
}

/// The resolved methods and fields of every resolved class.
///
/// Method descriptors refer to classes by their Bukkit name where one is known,
/// and by their obfuscated name otherwise.
pub fn member_link_lines(new: &MappingIndex) -> Vec<String> {
    let mut lines = Vec::new();
    for class in new.classes() {
        let class_name = match class.community_name() {
            Some(name) => name,
            None => continue
        };
        for method in &class.methods {
            if let Some(community) = method.community_name() {
                let params: Vec<String> = method.param_types.iter()
                    .map(|param| new.resolve_obfuscated_or_default_from_human_type(param))
                    .collect();
                let return_type = new.resolve_obfuscated_or_default_from_human_type(
                    method.return_type().unwrap_or("")
                );
                lines.push(format!(
                    "{} {} {} {}",
                    class_name,
                    method.obfuscated_name,
                    encode_signature(&params, &return_type),
                    community
                ));
            }
        }
        for field in &class.fields {
            if let Some(community) = field.community_name() {
                lines.push(format!("{} {} {}", class_name, field.obfuscated_name, community));
            }
        }
    }
    lines.sort();
    lines
}

pub fn exclude_lines(excludes: Vec<ExcludeLine>) -> Vec<String> {
    let mut lines: Vec<String> = excludes.into_iter()
        .map(ExcludeLine::into_string)
        .collect();
    lines.sort();
    lines
}

pub fn write_lines<W: Write>(lines: &[String], mut writer: W) -> io::Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write the lines to the given file, replacing it if it already exists
pub fn write_file(location: &Path, lines: &[String]) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(location)?);
    write_lines(lines, writer)?;
    Ok(())
}
