use std::fmt::{self, Display, Formatter};
use std::env;
use std::path::Path;

use failure_derive::Fail;

use crate::descriptor::InvalidDescriptor;

#[derive(Debug, Fail)]
pub enum RemapError {
    #[fail(display = "{}", _0)]
    InvalidDescriptor(#[cause] InvalidDescriptor),
    #[fail(display = "Line does not match the {} grammar: {}", shape, reason)]
    UnmatchedLineGrammar {
        shape: &'static str,
        reason: String
    },
    #[fail(display = "Could not find mapping data by {} class name {:?}", namespace, name)]
    MissingClassLookup {
        namespace: &'static str,
        name: String
    },
    #[fail(display = "{}: Could not find {} by obf name {:?} ({})", class, kind, obfuscated, community)]
    MissingMember {
        class: String,
        kind: &'static str,
        obfuscated: String,
        community: String
    },
    #[fail(
        display = "{}: Parameter mismatch in obf method {:?} ({}) params: [{}]",
        class, obfuscated, community, params
    )]
    ParameterMismatch {
        class: String,
        obfuscated: String,
        community: String,
        params: String
    },
    #[fail(
        display = "{}: Return type mismatch: {} != {} in obf method {:?} ({})",
        class, expected, actual, obfuscated, community
    )]
    ReturnTypeMismatch {
        class: String,
        obfuscated: String,
        community: String,
        expected: String,
        actual: String
    },
    #[fail(display = "{} {} does not exist", description, path)]
    MissingInputFile {
        description: &'static str,
        path: String
    },
}
impl RemapError {
    #[inline]
    pub fn grammar(shape: &'static str, reason: impl Into<String>) -> RemapError {
        RemapError::UnmatchedLineGrammar { shape, reason: reason.into() }
    }
    #[inline]
    pub fn missing_class(namespace: &'static str, name: &str) -> RemapError {
        RemapError::MissingClassLookup { namespace, name: name.into() }
    }
    pub fn missing_input(description: &'static str, path: &Path) -> RemapError {
        let path = env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf());
        RemapError::MissingInputFile { description, path: format!("{}", path.display()) }
    }
    pub fn kind(&self) -> ErrorKind {
        match *self {
            RemapError::InvalidDescriptor(_) => ErrorKind::InvalidDescriptor,
            RemapError::UnmatchedLineGrammar { .. } => ErrorKind::UnmatchedLineGrammar,
            RemapError::MissingClassLookup { .. } => ErrorKind::MissingClassLookup,
            RemapError::MissingMember { .. } => ErrorKind::MissingMember,
            RemapError::ParameterMismatch { .. } => ErrorKind::ParameterMismatch,
            RemapError::ReturnTypeMismatch { .. } => ErrorKind::ReturnTypeMismatch,
            RemapError::MissingInputFile { .. } => ErrorKind::MissingInputFile,
        }
    }
}
impl From<InvalidDescriptor> for RemapError {
    #[inline]
    fn from(e: InvalidDescriptor) -> Self {
        RemapError::InvalidDescriptor(e)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidDescriptor,
    UnmatchedLineGrammar,
    MissingClassLookup,
    MissingMember,
    ParameterMismatch,
    ReturnTypeMismatch,
    MissingInputFile,
}
impl ErrorKind {
    #[inline]
    fn id(self) -> &'static str {
        match self {
            ErrorKind::InvalidDescriptor => "InvalidDescriptor",
            ErrorKind::UnmatchedLineGrammar => "UnmatchedLineGrammar",
            ErrorKind::MissingClassLookup => "MissingClassLookup",
            ErrorKind::MissingMember => "MissingMember",
            ErrorKind::ParameterMismatch => "ParameterMismatch",
            ErrorKind::ReturnTypeMismatch => "ReturnTypeMismatch",
            ErrorKind::MissingInputFile => "MissingInputFile",
        }
    }
}
impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}
