//! Alphabet definitions for biological sequence validation.
//!
//! An [`Alphabet`] is an immutable set of single-byte symbols backed by a
//! 256-entry membership table, so lookups are total over every byte value.
//! The six canonical alphabets are `static` data built at compile time.
//!
//! Each sequence kind is a zero-sized marker type implementing
//! [`SequenceKind`], which binds it to its canonical alphabet. Kind-specific
//! behaviour is opted into through capability traits:
//!
//! | kind              | [`Complementable`] | [`Transcribable`] | [`ReverseTranscribable`] | [`Translatable`] |
//! |-------------------|:---:|:---:|:---:|:---:|
//! | [`Dna`]           | x | x |   | x |
//! | [`DnaIupac`]      | x | x |   | x |
//! | [`Rna`]           | x |   | x | x |
//! | [`RnaIupac`]      | x |   | x | x |
//! | [`Protein`]       |   |   |   |   |
//! | [`ProteinGapped`] |   |   |   |   |

use std::fmt;

use bioseq_core::{BioseqError, Result};

/// A finite set of valid one-byte symbols.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    name: &'static str,
    members: [bool; 256],
    len: usize,
}

impl Alphabet {
    /// Build an alphabet from the distinct bytes of `symbols`.
    ///
    /// Duplicates are collapsed. Never fails; an empty string yields an empty
    /// alphabet that rejects everything.
    pub const fn new(symbols: &str) -> Self {
        Self::named("custom", symbols)
    }

    /// Like [`Alphabet::new`], with a display name used in error messages.
    pub const fn named(name: &'static str, symbols: &str) -> Self {
        let bytes = symbols.as_bytes();
        let mut members = [false; 256];
        let mut len = 0;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i] as usize;
            if !members[b] {
                members[b] = true;
                len += 1;
            }
            i += 1;
        }
        Self { name, members, len }
    }

    /// Name used when reporting violations.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct symbols.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Membership of a single byte.
    #[inline]
    pub const fn contains_symbol(&self, b: u8) -> bool {
        self.members[b as usize]
    }

    /// Membership of every byte in `candidates`, position by position.
    pub fn contains(&self, candidates: &[u8]) -> Vec<bool> {
        candidates.iter().map(|&b| self.contains_symbol(b)).collect()
    }

    /// Symbols in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains_symbol(b))
    }

    /// Check every byte of `text`, failing on the first non-member.
    pub fn validate(&self, text: &[u8]) -> Result<()> {
        match text.iter().position(|&b| !self.contains_symbol(b)) {
            None => Ok(()),
            Some(position) => Err(BioseqError::AlphabetViolation {
                symbol: symbol_at(text, position),
                position,
                alphabet: self.name,
            }),
        }
    }
}

/// The character starting at byte `position`, decoding multi-byte UTF-8.
///
/// Bytes that do not start a valid UTF-8 sequence map to U+FFFD.
fn symbol_at(text: &[u8], position: usize) -> char {
    let tail = &text[position..text.len().min(position + 4)];
    let valid = match std::str::from_utf8(tail) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&tail[..e.valid_up_to()]).unwrap_or_default(),
    };
    valid.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.symbols() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({}: \"{}\")", self.name, self)
    }
}

/// Unambiguous DNA: `ATGC`.
pub static DNA: Alphabet = Alphabet::named("DNA", "ATGC");

/// IUPAC DNA with ambiguity codes and gap: `ATGC RYSWKM BDHVN -`.
pub static DNA_IUPAC: Alphabet = Alphabet::named("DNA IUPAC", "ATGCRYSWKMBDHVN-");

/// Unambiguous RNA: `AUGC`.
pub static RNA: Alphabet = Alphabet::named("RNA", "AUGC");

/// IUPAC RNA with ambiguity codes and gap: `AUGC RYSWKM BDHVN -`.
pub static RNA_IUPAC: Alphabet = Alphabet::named("RNA IUPAC", "AUGCRYSWKMBDHVN-");

/// The 20 standard amino acids plus the `*` translation terminator.
pub static PROTEIN: Alphabet = Alphabet::named("Protein", "ACDEFGHIKLMNPQRSTVWY*");

/// [`PROTEIN`] plus the gap symbol `-`.
pub static PROTEIN_GAPPED: Alphabet =
    Alphabet::named("Protein gapped", "ACDEFGHIKLMNPQRSTVWY*-");

/// Symbol emitted by complement tables for bytes they do not map.
///
/// It is a member of no nucleotide alphabet, so revalidation rejects it.
pub const UNKNOWN_COMPLEMENT: u8 = b'X';

/// A sequence kind bound to its canonical alphabet.
pub trait SequenceKind: Clone + 'static {
    /// Human-readable name (e.g. "DNA").
    const NAME: &'static str;

    /// The canonical alphabet sequences of this kind are validated against.
    fn alphabet() -> &'static Alphabet;

    /// Check whether a byte is a member of the kind's alphabet.
    fn is_valid(b: u8) -> bool {
        Self::alphabet().contains_symbol(b)
    }
}

/// Kinds whose symbols have a base-pairing complement.
pub trait Complementable: SequenceKind {
    /// Complement of one symbol; unmapped bytes become [`UNKNOWN_COMPLEMENT`].
    fn complement_symbol(b: u8) -> u8;
}

/// DNA kinds that transcribe into an RNA kind.
pub trait Transcribable: SequenceKind {
    type Transcript: SequenceKind;
}

/// RNA kinds that reverse-transcribe into a DNA kind.
pub trait ReverseTranscribable: SequenceKind {
    type Template: SequenceKind;
}

/// Nucleotide kinds that can be read codon by codon.
pub trait Translatable: SequenceKind {}

macro_rules! sequence_kind {
    ($(#[$doc:meta])* $kind:ident, $name:literal, $alphabet:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl SequenceKind for $kind {
            const NAME: &'static str = $name;

            fn alphabet() -> &'static Alphabet {
                &$alphabet
            }
        }
    };
}

sequence_kind!(
    /// Strict DNA (`ATGC`).
    Dna, "DNA", DNA
);
sequence_kind!(
    /// DNA with IUPAC ambiguity codes and gaps.
    DnaIupac, "DNA IUPAC", DNA_IUPAC
);
sequence_kind!(
    /// Strict RNA (`AUGC`).
    Rna, "RNA", RNA
);
sequence_kind!(
    /// RNA with IUPAC ambiguity codes and gaps.
    RnaIupac, "RNA IUPAC", RNA_IUPAC
);
sequence_kind!(
    /// Amino acid sequence.
    Protein, "Protein", PROTEIN
);
sequence_kind!(
    /// Amino acid sequence that may contain alignment gaps.
    ProteinGapped, "Protein gapped", PROTEIN_GAPPED
);

// ---------------------------------------------------------------------------
// Complement tables
// ---------------------------------------------------------------------------

const fn complement_table(pairs: &[(u8, u8)]) -> [u8; 256] {
    let mut table = [UNKNOWN_COMPLEMENT; 256];
    let mut i = 0;
    while i < pairs.len() {
        let (a, b) = pairs[i];
        table[a as usize] = b;
        table[b as usize] = a;
        i += 1;
    }
    table
}

static DNA_COMPLEMENT: [u8; 256] = complement_table(&[(b'A', b'T'), (b'G', b'C')]);

static RNA_COMPLEMENT: [u8; 256] = complement_table(&[(b'A', b'U'), (b'G', b'C')]);

// S, W, N and gap pair with themselves.
static DNA_IUPAC_COMPLEMENT: [u8; 256] = complement_table(&[
    (b'A', b'T'),
    (b'G', b'C'),
    (b'Y', b'R'),
    (b'K', b'M'),
    (b'B', b'V'),
    (b'D', b'H'),
    (b'S', b'S'),
    (b'W', b'W'),
    (b'N', b'N'),
    (b'-', b'-'),
]);

static RNA_IUPAC_COMPLEMENT: [u8; 256] = complement_table(&[
    (b'A', b'U'),
    (b'G', b'C'),
    (b'Y', b'R'),
    (b'K', b'M'),
    (b'B', b'V'),
    (b'D', b'H'),
    (b'S', b'S'),
    (b'W', b'W'),
    (b'N', b'N'),
    (b'-', b'-'),
]);

impl Complementable for Dna {
    fn complement_symbol(b: u8) -> u8 {
        DNA_COMPLEMENT[b as usize]
    }
}

impl Complementable for DnaIupac {
    fn complement_symbol(b: u8) -> u8 {
        DNA_IUPAC_COMPLEMENT[b as usize]
    }
}

impl Complementable for Rna {
    fn complement_symbol(b: u8) -> u8 {
        RNA_COMPLEMENT[b as usize]
    }
}

impl Complementable for RnaIupac {
    fn complement_symbol(b: u8) -> u8 {
        RNA_IUPAC_COMPLEMENT[b as usize]
    }
}

impl Transcribable for Dna {
    type Transcript = Rna;
}

impl Transcribable for DnaIupac {
    type Transcript = RnaIupac;
}

impl ReverseTranscribable for Rna {
    type Template = Dna;
}

impl ReverseTranscribable for RnaIupac {
    type Template = DnaIupac;
}

impl Translatable for Dna {}
impl Translatable for DnaIupac {}
impl Translatable for Rna {}
impl Translatable for RnaIupac {}
