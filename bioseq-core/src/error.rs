//! Structured error types for the bioseq workspace.

use thiserror::Error;

/// Unified error type for all bioseq operations.
#[derive(Debug, Error)]
pub enum BioseqError {
    /// I/O error while reading or writing a record stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A symbol that is not a member of the target alphabet.
    ///
    /// Construction stops at the first offending symbol, so `position` is the
    /// index of the earliest violation.
    #[error("symbol '{symbol}' at position {position} is not in alphabet {alphabet}")]
    AlphabetViolation {
        symbol: char,
        position: usize,
        alphabet: &'static str,
    },

    /// Single-position access past the end of a sequence.
    ///
    /// Together with [`Range`](Self::Range) this is a range failure; see
    /// [`is_range`](Self::is_range).
    #[error("position {position} is out of range for sequence of length {len}")]
    Position { position: usize, len: usize },

    /// Half-open range access outside `[0, len]` or with `start >= stop`.
    #[error("range [{start}, {stop}) is out of range for sequence of length {len}")]
    Range {
        start: usize,
        stop: usize,
        len: usize,
    },

    /// A non-stop codon with no entry in the codon table.
    #[error("failed to translate codon '{codon}' with table {table}")]
    Translation { codon: String, table: String },

    /// Structural problem in a record stream.
    ///
    /// [`HeaderMismatch`](Self::HeaderMismatch) is a format failure as well;
    /// use [`is_format`](Self::is_format) to match both.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// The `+` line of a FASTQ record names a different header than the `@` line.
    #[error("header mismatch at line {line}: expected '{expected}', found '{found}'")]
    HeaderMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    /// Quality character or score outside the range of its encoding.
    #[error("quality value {value} is out of range for {encoding}")]
    Quality { value: i32, encoding: &'static str },

    /// Invalid argument (bad table id, malformed codon, and so on).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BioseqError {
    /// Whether this is a record-stream format failure, header mismatches included.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::HeaderMismatch { .. })
    }

    /// Whether this is an out-of-bounds position or range access.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Position { .. } | Self::Range { .. })
    }
}

/// Convenience alias used throughout the bioseq workspace.
pub type Result<T> = std::result::Result<T, BioseqError>;

/// A record read that stopped early.
///
/// Carries every record completed before the failure alongside the error.
#[derive(Debug, Error)]
#[error("read stopped after {} records: {source}", .records.len())]
pub struct PartialRead<T> {
    pub records: Vec<T>,
    #[source]
    pub source: BioseqError,
}

/// A record write that stopped early; `written` records reached the sink.
#[derive(Debug, Error)]
#[error("write stopped after {written} records: {source}")]
pub struct PartialWrite {
    pub written: usize,
    #[source]
    pub source: BioseqError,
}
