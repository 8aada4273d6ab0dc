//! Generic validated sequence type.
//!
//! [`ValidatedSeq<K>`] is a newtype over `Vec<u8>` parameterized by a
//! [`SequenceKind`] marker. Construction checks every byte against the kind's
//! alphabet, so the inner data always satisfies it and `Deref<Target=[u8]>`
//! is safe to hand to downstream `&[u8]` APIs. Every operation borrows the
//! receiver and returns a fresh value.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;
use std::str::FromStr;

use bioseq_core::{BioseqError, Result, Sequence, Summarizable};

use crate::alphabet::{Alphabet, SequenceKind};

/// A validated biological sequence parameterized by its kind.
///
/// `ValidatedSeq<Dna>` is a DNA sequence, `ValidatedSeq<RnaIupac>` is
/// ambiguous RNA, etc.
#[derive(Clone)]
pub struct ValidatedSeq<K: SequenceKind> {
    data: Vec<u8>,
    _kind: PhantomData<K>,
}

impl<K: SequenceKind> ValidatedSeq<K> {
    /// Create a new validated sequence from raw bytes.
    ///
    /// Fails with [`BioseqError::AlphabetViolation`] naming the first byte
    /// that is not in the kind's alphabet. Empty input is valid.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = bytes.as_ref();
        K::alphabet().validate(bytes)?;
        Ok(Self::from_validated(bytes.to_vec()))
    }

    /// Validate an owned buffer without copying it.
    pub(crate) fn from_checked(data: Vec<u8>) -> Result<Self> {
        K::alphabet().validate(&data)?;
        Ok(Self::from_validated(data))
    }

    /// Create a sequence from pre-validated bytes, skipping validation.
    ///
    /// Caller must guarantee all bytes are members of `K`'s alphabet.
    pub(crate) fn from_validated(data: Vec<u8>) -> Self {
        Self {
            data,
            _kind: PhantomData,
        }
    }

    /// The canonical alphabet of this sequence kind.
    pub fn alphabet(&self) -> &'static Alphabet {
        K::alphabet()
    }

    /// The sequence as text. Alphabets are ASCII, so this never allocates.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap_or_default()
    }

    /// Consume the sequence and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Symbol at zero-based position `n`.
    pub fn position(&self, n: usize) -> Result<u8> {
        self.data.get(n).copied().ok_or(BioseqError::Position {
            position: n,
            len: self.data.len(),
        })
    }

    /// Half-open subsequence `[start, stop)`.
    ///
    /// `stop == len` always reaches the end of the sequence (as long as
    /// `start <= len`). Any other `stop` requires `start < stop < len`.
    pub fn range(&self, start: usize, stop: usize) -> Result<Self> {
        let len = self.data.len();
        let in_bounds = if stop == len {
            start <= len
        } else {
            start < stop && stop < len
        };
        if !in_bounds {
            return Err(BioseqError::Range { start, stop, len });
        }
        Ok(Self::from_validated(self.data[start..stop].to_vec()))
    }

    /// The sequence with symbol order reversed.
    pub fn reverse(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Self::from_validated(data)
    }

    /// Occurrence count of each symbol present in the sequence.
    pub fn letter_count(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for &b in &self.data {
            *counts.entry(b).or_insert(0) += 1;
        }
        counts
    }
}

impl<K: SequenceKind> Deref for ValidatedSeq<K> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl<K: SequenceKind> AsRef<[u8]> for ValidatedSeq<K> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<K: SequenceKind> Sequence for ValidatedSeq<K> {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl<K: SequenceKind> Summarizable for ValidatedSeq<K> {
    fn summary(&self) -> String {
        let preview_len = self.data.len().min(20);
        let preview = &self.as_str()[..preview_len];
        if self.data.len() > 20 {
            format!("{} sequence ({} bp): {}...", K::NAME, self.data.len(), preview)
        } else {
            format!("{} sequence ({} bp): {}", K::NAME, self.data.len(), preview)
        }
    }
}

impl<K: SequenceKind> FromStr for ValidatedSeq<K> {
    type Err = BioseqError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<K: SequenceKind> fmt::Debug for ValidatedSeq<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", K::NAME, self.as_str())
    }
}

impl<K: SequenceKind> fmt::Display for ValidatedSeq<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<K: SequenceKind> PartialEq for ValidatedSeq<K> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<K: SequenceKind> Eq for ValidatedSeq<K> {}

impl<K: SequenceKind> Hash for ValidatedSeq<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

#[cfg(feature = "serde")]
impl<K: SequenceKind> serde::Serialize for ValidatedSeq<K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de, K: SequenceKind> serde::Deserialize<'de> for ValidatedSeq<K> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
