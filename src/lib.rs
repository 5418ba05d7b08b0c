//! Core model for carrying Bukkit names between two minecraft builds.
//!
//! Each build ships with Mojang's mappings, linking the obfuscated names to human readable ones.
//! Bukkit's own mappings only link the obfuscated names of a single build to Bukkit's names,
//! so the human readable names are the only identity the two builds share.
extern crate indexmap;
extern crate failure;
extern crate failure_derive;
extern crate itertools;
extern crate log;
extern crate serde;
extern crate serde_derive;

pub mod descriptor;
pub mod error;
pub mod index;
pub mod model;
pub mod parser;
pub mod report;
pub mod utils;

pub use self::error::{RemapError, ErrorKind};
pub use self::index::MappingIndex;
pub use self::model::{IdentifierRecord, ClassEntry, MappingCollection};
pub use self::parser::{MappingFileParser, MappingLine, RecordVisitor};
pub use self::report::{Diagnostics, LineError};
