#[cfg(dummy)] // Needed for IntelliJ autocomplete
extern crate bukkit_remapper as mappings;
#[cfg(dummy)]
extern crate bukkit_remapper_engine as engine;
#[macro_use]
extern crate clap;
extern crate failure;
extern crate log;
extern crate env_logger;
extern crate serde_json;

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use log::{error, info, LevelFilter};

use engine::{RemapConfig, RemapInputs, Remapper};
use engine::output::write_file;
use mappings::RemapError;

fn app() -> App<'static, 'static> {
    let file = |name: &'static str, default: &'static str, help: &'static str| {
        Arg::with_name(name)
            .long(name)
            .takes_value(true)
            .value_name("FILE")
            .default_value(default)
            .help(help)
    };
    App::new("bukkit-remapper")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(Arg::with_name("debug").long("debug").help("enable debug logging"))
        .arg(Arg::with_name("verbose").long("verbose").help("enable verbose logging"))
        .arg(file("mapping-file", "./mappings.txt", "the mojang mapping file to load"))
        .arg(file("cl-file", "./bukkit-cl.csrg", "the input bukkit-cl.csrg file to process"))
        .arg(file("members-file", "./bukkit-members.csrg", "the input bukkit-members.csrg file to process"))
        .arg(file("exclude-file", "./bukkit.exclude", "the input bukkit-<version>.exclude file to process"))
        .arg(file("mapping2-file", "./mappings-new.txt", "the mojang mapping file of new version to load"))
        .arg(file("output-cl-file", "./output-cl.csrg", "the output cl file path"))
        .arg(file("output-members-file", "./output-members.csrg", "the output members file path"))
        .arg(file("output-exclude-file", "./output.exclude", "the output exclude file path"))
        .arg(Arg::with_name("summary-file")
            .long("summary-file")
            .takes_value(true)
            .value_name("FILE")
            .help("write a JSON summary of the run to this file"))
        .arg(Arg::with_name("anchor")
            .long("anchor")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .value_name("CLASS")
            .help("a class that keeps its name across obfuscation (replaces the default anchors)"))
}

struct InputFiles {
    mappings: PathBuf,
    class_links: PathBuf,
    member_links: PathBuf,
    excludes: PathBuf,
    new_mappings: PathBuf,
}
impl InputFiles {
    fn from_matches(matches: &ArgMatches) -> InputFiles {
        InputFiles {
            mappings: path_of(matches, "mapping-file"),
            class_links: path_of(matches, "cl-file"),
            member_links: path_of(matches, "members-file"),
            excludes: path_of(matches, "exclude-file"),
            new_mappings: path_of(matches, "mapping2-file"),
        }
    }
    /// Check all the input files exist before we start parsing anything
    fn check(&self) -> Result<(), RemapError> {
        check_file("mapping file", &self.mappings)?;
        check_file("bukkit-cl file", &self.class_links)?;
        check_file("bukkit-members file", &self.member_links)?;
        check_file("bukkit.exclude file", &self.excludes)?;
        check_file("mapping file", &self.new_mappings)?;
        Ok(())
    }
}
fn check_file(description: &'static str, path: &Path) -> Result<(), RemapError> {
    if !path.exists() || path.is_dir() {
        return Err(RemapError::missing_input(description, path))
    }
    Ok(())
}
#[inline]
fn path_of(matches: &ArgMatches, name: &str) -> PathBuf {
    // Every file option has a default value
    PathBuf::from(matches.value_of(name).unwrap_or_default())
}

fn setup_logging(debug: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Trace
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    builder.init();
}

fn main() -> Result<(), Error> {
    let matches = app().get_matches();
    setup_logging(matches.is_present("debug"), matches.is_present("verbose"));
    let inputs = InputFiles::from_matches(&matches);
    if let Err(e) = inputs.check() {
        error!("{}", e);
        exit(1);
    }
    let config = match matches.values_of("anchor") {
        Some(anchors) => RemapConfig::with_anchors(anchors.map(String::from).collect()),
        None => RemapConfig::default()
    };
    info!("Loading files");
    let old_mappings = fs::read_to_string(&inputs.mappings)?;
    let class_links = fs::read_to_string(&inputs.class_links)?;
    let member_links = fs::read_to_string(&inputs.member_links)?;
    let excludes = fs::read_to_string(&inputs.excludes)?;
    let new_mappings = fs::read_to_string(&inputs.new_mappings)?;
    let output = Remapper::new(config).run(RemapInputs {
        old_mappings: &old_mappings,
        class_links: &class_links,
        member_links: &member_links,
        excludes: &excludes,
        new_mappings: &new_mappings,
    });
    info!("Writing files");
    write_file(&path_of(&matches, "output-cl-file"), &output.class_links)?;
    write_file(&path_of(&matches, "output-members-file"), &output.member_links)?;
    write_file(&path_of(&matches, "output-exclude-file"), &output.excludes)?;
    if let Some(location) = matches.value_of("summary-file") {
        let writer = BufWriter::new(File::create(location)?);
        serde_json::to_writer_pretty(writer, &output.summary)?;
    }
    info!("Complete!");
    Ok(())
}
