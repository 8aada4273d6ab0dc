//! FASTA records with a streaming reader and a wrapping writer.
//!
//! Uses the same generator contract as [`crate::fastq`]: all sequence lines
//! of a record are trimmed, concatenated and handed to a
//! `Fn(&str) -> Result<S>` that builds the validated sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use bioseq_core::{
    Annotated, BioseqError, PartialRead, PartialWrite, Result, Sequence, Summarizable,
};
use log::{debug, trace};

/// A single FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastaRecord<S> {
    header: String,
    sequence: S,
}

impl<S> FastaRecord<S> {
    pub fn new(header: impl Into<String>, sequence: S) -> Self {
        Self {
            header: header.into(),
            sequence,
        }
    }

    /// Header text without the leading `>`.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &S {
        &self.sequence
    }

    pub fn into_sequence(self) -> S {
        self.sequence
    }
}

impl<S: Sequence> Sequence for FastaRecord<S> {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl<S> Annotated for FastaRecord<S> {
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

impl<S: Sequence> Summarizable for FastaRecord<S> {
    fn summary(&self) -> String {
        format!("FASTA {} ({} bp)", self.name(), self.sequence.len())
    }
}

/// Streaming FASTA reader.
///
/// A record runs from its `>` line to the next `>` line or end of input.
/// Lines before the first header are skipped.
pub struct FastaReader<R, G> {
    reader: R,
    generator: G,
    line_number: usize,
    buffer: String,
    header: Option<String>,
    sequence: String,
    done: bool,
}

impl<R, S, G> FastaReader<R, G>
where
    R: BufRead,
    G: Fn(&str) -> Result<S>,
{
    pub fn new(reader: R, generator: G) -> Self {
        Self {
            reader,
            generator,
            line_number: 0,
            buffer: String::new(),
            header: None,
            sequence: String::new(),
            done: false,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read up to `n` records (`0` reads to end of input).
    pub fn read(
        &mut self,
        n: usize,
    ) -> std::result::Result<Vec<FastaRecord<S>>, PartialRead<FastaRecord<S>>> {
        let mut records = Vec::new();
        while n == 0 || records.len() < n {
            match self.next_record() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => break,
                Err(source) => return Err(PartialRead { records, source }),
            }
        }
        debug!("read {} FASTA records", records.len());
        Ok(records)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord<S>>> {
        if self.done {
            return Ok(None);
        }
        let result = self.advance();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<FastaRecord<S>>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return match self.header.take() {
                    Some(header) => self.emit(header).map(Some),
                    None => Ok(None),
                };
            }
            self.line_number += 1;
            let line = self.buffer.trim();

            if let Some(next_header) = line.strip_prefix('>') {
                let next_header = next_header.to_string();
                if let Some(header) = self.header.replace(next_header) {
                    return self.emit(header).map(Some);
                }
            } else if self.header.is_some() {
                self.sequence.push_str(line);
            } else {
                debug!("skipping line {} before first FASTA header", self.line_number);
            }
        }
    }

    fn emit(&mut self, header: String) -> Result<FastaRecord<S>> {
        let sequence = (self.generator)(&self.sequence);
        self.sequence.clear();
        let record = FastaRecord {
            header,
            sequence: sequence?,
        };
        trace!("FASTA record '{}' complete", record.header);
        Ok(record)
    }
}

impl<S, G> FastaReader<BufReader<File>, G>
where
    G: Fn(&str) -> Result<S>,
{
    pub fn from_path(path: impl AsRef<Path>, generator: G) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), generator))
    }
}

impl<R, S, G> Iterator for FastaReader<R, G>
where
    R: BufRead,
    G: Fn(&str) -> Result<S>,
{
    type Item = Result<FastaRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Read every record of a FASTA file.
pub fn read_fasta_file<S, G>(path: impl AsRef<Path>, generator: G) -> Result<Vec<FastaRecord<S>>>
where
    G: Fn(&str) -> Result<S>,
{
    FastaReader::from_path(path, generator)?
        .read(0)
        .map_err(|partial| partial.source)
}

/// Output settings for [`FastaWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastaWriterOptions {
    /// Wrap sequence lines at this many symbols; `0` writes one line.
    pub line_width: usize,
}

pub struct FastaWriter<W: Write> {
    writer: W,
    options: FastaWriterOptions,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, FastaWriterOptions::default())
    }

    pub fn with_options(writer: W, options: FastaWriterOptions) -> Self {
        Self { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write up to `n` records (`0` writes all), revalidating each sequence
    /// through `generator`. Failure semantics match
    /// [`FastqWriter::write`](crate::fastq::FastqWriter::write).
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
        I: IntoIterator<Item = &'a FastaRecord<S>>,
    {
        let mut written = 0;
        for record in records {
            if n != 0 && written == n {
                break;
            }
            if let Err(source) = self.write_record(record, &generator) {
                let _ = self.writer.flush();
                return Err(PartialWrite { written, source });
            }
            written += 1;
        }
        self.writer.flush().map_err(|e| PartialWrite {
            written,
            source: e.into(),
        })?;
        debug!("wrote {written} FASTA records");
        Ok(written)
    }

    fn write_record<S, T, G>(&mut self, record: &FastaRecord<S>, generator: &G) -> Result<()>
    where
        S: Sequence,
        T: Sequence,
        G: Fn(&str) -> Result<T>,
    {
        let text = std::str::from_utf8(record.sequence.as_bytes())
            .map_err(|e| BioseqError::InvalidInput(format!("sequence is not UTF-8: {e}")))?;
        let sequence = generator(text)?;
        let bytes = sequence.as_bytes();

        self.writer.write_all(b">")?;
        self.writer.write_all(record.header.as_bytes())?;
        self.writer.write_all(b"\n")?;
        let width = self.options.line_width;
        if width == 0 || bytes.is_empty() {
            self.writer.write_all(bytes)?;
            self.writer.write_all(b"\n")?;
        } else {
            for chunk in bytes.chunks(width) {
                self.writer.write_all(chunk)?;
                self.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
