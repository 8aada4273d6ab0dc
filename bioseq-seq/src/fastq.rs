//! FASTQ records and a streaming line-oriented reader/writer.
//!
//! The reader is a small state machine over lines:
//!
//! ```text
//! ScanningForHeader -> ReadingSequence -> ReadingSecondHeader -> ReadingQuality -> RecordComplete
//!        ^                                                                              |
//!        +------------------------------------------------------------------------------+
//! ```
//!
//! Sequence lines go through a caller-supplied generator (`Fn(&str) -> Result<S>`),
//! so the reader is agnostic to the sequence kind:
//!
//! ```
//! use bioseq::{DnaSequence, FastqReader};
//!
//! let text = "@read1\nACGT\n+\nIIII\n";
//! let mut reader = FastqReader::new(text.as_bytes(), |s| DnaSequence::new(s));
//! let records = reader.read(0).unwrap();
//! assert_eq!(records[0].sequence().as_str(), "ACGT");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use bioseq_core::{
    Annotated, BioseqError, PartialRead, PartialWrite, Result, Sequence, Summarizable,
};
use log::{debug, trace, warn};

use crate::quality::{QualityEncoding, QualityScores};

/// A single FASTQ record.
///
/// `quality` is kept as raw text; decode it with
/// [`quality_scores`](Self::quality_scores). Its length is not required to
/// match the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastqRecord<S> {
    header: String,
    sequence: S,
    quality: String,
}

impl<S> FastqRecord<S> {
    pub fn new(header: impl Into<String>, quality: impl Into<String>, sequence: S) -> Self {
        Self {
            header: header.into(),
            sequence,
            quality: quality.into(),
        }
    }

    /// Header text without the leading `@`.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &S {
        &self.sequence
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// Decode the quality line with the given encoding.
    pub fn quality_scores(&self, encoding: QualityEncoding) -> Result<QualityScores> {
        QualityScores::from_ascii(self.quality.as_bytes(), encoding)
    }

    pub fn into_sequence(self) -> S {
        self.sequence
    }
}

impl<S: Sequence> Sequence for FastqRecord<S> {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl<S> Annotated for FastqRecord<S> {
    /// Identifier: the header up to the first whitespace.
    fn name(&self) -> &str {
        match self.header.split_once(char::is_whitespace) {
            Some((name, _)) => name,
            None => &self.header,
        }
    }

    fn description(&self) -> Option<&str> {
        self.header
            .split_once(char::is_whitespace)
            .map(|(_, desc)| desc)
    }
}

impl<S: Sequence> Summarizable for FastqRecord<S> {
    fn summary(&self) -> String {
        format!(
            "FASTQ {} ({} bp, {} quality chars)",
            self.name(),
            self.sequence.len(),
            self.quality.len()
        )
    }
}

/// Position of a [`FastqReader`] within the current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    ScanningForHeader,
    ReadingSequence,
    ReadingSecondHeader,
    ReadingQuality,
    RecordComplete,
}

/// Streaming FASTQ reader.
///
/// Lines before the first `@` are skipped. If input ends mid-record, the
/// partial record is still returned, with missing fields empty.
/// After the first error or end of input the reader yields nothing more.
pub struct FastqReader<R, S, G> {
    reader: R,
    generator: G,
    state: ReaderState,
    line_number: usize,
    buffer: String,
    header: String,
    sequence: Option<S>,
    quality: String,
    done: bool,
}

impl<R, S, G> FastqReader<R, S, G>
where
    R: BufRead,
    G: Fn(&str) -> Result<S>,
{
    pub fn new(reader: R, generator: G) -> Self {
        Self {
            reader,
            generator,
            state: ReaderState::ScanningForHeader,
            line_number: 0,
            buffer: String::new(),
            header: String::new(),
            sequence: None,
            quality: String::new(),
            done: false,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read up to `n` records (`0` reads to end of input).
    ///
    /// On failure the records completed before the error are returned inside
    /// the [`PartialRead`].
    pub fn read(
        &mut self,
        n: usize,
    ) -> std::result::Result<Vec<FastqRecord<S>>, PartialRead<FastqRecord<S>>> {
        let mut records = Vec::new();
        while n == 0 || records.len() < n {
            match self.next_record() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => break,
                Err(source) => return Err(PartialRead { records, source }),
            }
        }
        debug!("read {} FASTQ records", records.len());
        Ok(records)
    }

    /// Advance to the next complete record.
    pub fn next_record(&mut self) -> Result<Option<FastqRecord<S>>> {
        if self.done {
            return Ok(None);
        }
        let result = self.advance();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<FastqRecord<S>>> {
        loop {
            if self.state == ReaderState::RecordComplete {
                self.state = ReaderState::ScanningForHeader;
                let record = self.take_record()?;
                trace!("FASTQ record '{}' complete", record.header);
                return Ok(Some(record));
            }

            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return self.finish();
            }
            self.line_number += 1;
            let line = self.buffer.trim_end();

            match self.state {
                ReaderState::ScanningForHeader => match line.strip_prefix('@') {
                    Some(header) => {
                        self.header = header.to_string();
                        self.state = ReaderState::ReadingSequence;
                    }
                    None => debug!("skipping line {} outside a FASTQ record", self.line_number),
                },
                ReaderState::ReadingSequence => {
                    self.sequence = Some((self.generator)(line.trim())?);
                    self.state = ReaderState::ReadingSecondHeader;
                }
                ReaderState::ReadingSecondHeader => {
                    let Some(second) = line.strip_prefix('+') else {
                        return Err(BioseqError::Format {
                            line: self.line_number,
                            message: format!("expected '+' line, found '{line}'"),
                        });
                    };
                    if !second.is_empty() && second != self.header {
                        return Err(BioseqError::HeaderMismatch {
                            line: self.line_number,
                            expected: self.header.clone(),
                            found: second.to_string(),
                        });
                    }
                    self.state = ReaderState::ReadingQuality;
                }
                ReaderState::ReadingQuality => {
                    self.quality = line.to_string();
                    self.state = ReaderState::RecordComplete;
                }
                ReaderState::RecordComplete => unreachable!("handled before reading"),
            }
        }
    }

    /// End of input: emit the in-progress record, if it holds any data.
    fn finish(&mut self) -> Result<Option<FastqRecord<S>>> {
        if self.state == ReaderState::ScanningForHeader {
            return Ok(None);
        }
        if self.header.is_empty() && self.sequence.is_none() && self.quality.is_empty() {
            debug!("ignoring empty record at end of input");
            self.state = ReaderState::ScanningForHeader;
            return Ok(None);
        }
        warn!(
            "input ended mid-record after line {}; emitting '{}' with missing fields empty",
            self.line_number, self.header
        );
        self.state = ReaderState::ScanningForHeader;
        self.take_record().map(Some)
    }

    fn take_record(&mut self) -> Result<FastqRecord<S>> {
        let sequence = match self.sequence.take() {
            Some(sequence) => sequence,
            None => (self.generator)("")?,
        };
        Ok(FastqRecord {
            header: std::mem::take(&mut self.header),
            sequence,
            quality: std::mem::take(&mut self.quality),
        })
    }
}

impl<S, G> FastqReader<BufReader<File>, S, G>
where
    G: Fn(&str) -> Result<S>,
{
    /// Open a file for buffered reading.
    pub fn from_path(path: impl AsRef<Path>, generator: G) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), generator))
    }
}

impl<R, S, G> Iterator for FastqReader<R, S, G>
where
    R: BufRead,
    G: Fn(&str) -> Result<S>,
{
    type Item = Result<FastqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Read every record of a FASTQ file.
///
/// Records read before a failure are discarded; use [`FastqReader::read`]
/// to keep them.
pub fn read_fastq_file<S, G>(path: impl AsRef<Path>, generator: G) -> Result<Vec<FastqRecord<S>>>
where
    G: Fn(&str) -> Result<S>,
{
    FastqReader::from_path(path, generator)?
        .read(0)
        .map_err(|partial| partial.source)
}

/// Output settings for [`FastqWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastqWriterOptions {
    /// Also emit a bare `+` line and the quality line for each record.
    pub write_quality: bool,
}

/// FASTQ writer.
///
/// By default only the `@header` and sequence lines are written.
pub struct FastqWriter<W: Write> {
    writer: W,
    options: FastqWriterOptions,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, FastqWriterOptions::default())
    }

    pub fn with_options(writer: W, options: FastqWriterOptions) -> Self {
        Self { writer, options }
    }

    pub fn options(&self) -> FastqWriterOptions {
        self.options
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write up to `n` records (`0` writes all).
    ///
    /// Each sequence is revalidated through `generator` before it is written.
    /// Returns the number of records written; on failure the count written
    /// before the error is reported in the [`PartialWrite`] and the output so
    /// far is flushed.
    pub fn write<'a, S, T, G, I>(
        &mut self,
        records: I,
        n: usize,
        generator: G,
    ) -> std::result::Result<usize, PartialWrite>
    where
        S: Sequence + 'a,
        T: Sequence,
        G: Fn(&str) -> Result<T>,
        I: IntoIterator<Item = &'a FastqRecord<S>>,
    {
        let mut written = 0;
        for record in records {
            if n != 0 && written == n {
                break;
            }
            if let Err(source) = self.write_record(record, &generator) {
                // The first error wins over a failing flush.
                let _ = self.writer.flush();
                return Err(PartialWrite { written, source });
            }
            written += 1;
            trace!("wrote FASTQ record '{}'", record.header);
        }
        self.writer.flush().map_err(|e| PartialWrite {
            written,
            source: e.into(),
        })?;
        debug!("wrote {written} FASTQ records");
        Ok(written)
    }

    fn write_record<S, T, G>(&mut self, record: &FastqRecord<S>, generator: &G) -> Result<()>
    where
        S: Sequence,
        T: Sequence,
        G: Fn(&str) -> Result<T>,
    {
        let text = std::str::from_utf8(record.sequence.as_bytes())
            .map_err(|e| BioseqError::InvalidInput(format!("sequence is not UTF-8: {e}")))?;
        let sequence = generator(text)?;

        self.writer.write_all(b"@")?;
        self.writer.write_all(record.header.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.write_all(sequence.as_bytes())?;
        self.writer.write_all(b"\n")?;
        if self.options.write_quality {
            self.writer.write_all(b"+\n")?;
            self.writer.write_all(record.quality.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
