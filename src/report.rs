use log::{debug, error};

use crate::error::{RemapError, ErrorKind};

/// A line that was skipped because it couldn't be parsed or resolved
#[derive(Debug)]
pub struct LineError {
    pub line_number: usize,
    pub raw: String,
    pub error: RemapError,
}
impl LineError {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Collects the per-line failures for a single input file.
///
/// Every failure is logged as soon as it is recorded,
/// with the full error detail only visible at the debug level.
#[derive(Debug)]
pub struct Diagnostics {
    source: &'static str,
    errors: Vec<LineError>,
}
impl Diagnostics {
    #[inline]
    pub fn new(source: &'static str) -> Diagnostics {
        Diagnostics { source, errors: Vec::new() }
    }
    #[inline]
    pub fn source(&self) -> &'static str {
        self.source
    }
    pub fn record(&mut self, line_number: usize, raw: &str, error: RemapError) {
        error!("Invalid {} at line {}: {}", self.source, line_number, raw);
        error!("Error message: {}: {}", error.kind(), error);
        debug!("{:?}", error);
        self.errors.push(LineError { line_number, raw: raw.into(), error });
    }
    #[inline]
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }
}

/// Iterate over the meaningful lines of a text file, with one-based line numbers.
///
/// Blank lines and `#` comments are skipped.
pub fn content_lines<'a>(text: &'a str) -> impl Iterator<Item=(usize, &'a str)> + 'a {
    text.lines().enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|&(_, line)| !is_ignored_line(line))
}

#[inline]
pub fn is_ignored_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}
