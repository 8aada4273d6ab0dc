//! Concrete sequence type aliases and biologically meaningful operations.
//!
//! Operations are gated on the capability traits of [`crate::alphabet`], so
//! `transcribe` only exists on DNA kinds and `complement` never on proteins:
//!
//! - [`Complementable`]: complement, reverse complement, GC content
//! - [`Transcribable`]: DNA -> RNA
//! - [`ReverseTranscribable`]: RNA -> DNA
//! - [`Translatable`]: codon translation to [`ProteinSequence`]

use bioseq_core::Result;

use crate::alphabet::{
    Complementable, Dna, DnaIupac, Protein, ProteinGapped, ReverseTranscribable, Rna, RnaIupac,
    Transcribable, Translatable,
};
use crate::codon::{self, CodonTable};
use crate::seq::ValidatedSeq;

/// A validated DNA sequence (`ATGC`).
pub type DnaSequence = ValidatedSeq<Dna>;

/// A validated DNA sequence with IUPAC ambiguity codes and gaps.
pub type DnaIupacSequence = ValidatedSeq<DnaIupac>;

/// A validated RNA sequence (`AUGC`).
pub type RnaSequence = ValidatedSeq<Rna>;

/// A validated RNA sequence with IUPAC ambiguity codes and gaps.
pub type RnaIupacSequence = ValidatedSeq<RnaIupac>;

/// A validated protein/amino acid sequence.
pub type ProteinSequence = ValidatedSeq<Protein>;

/// A validated protein sequence that may contain gaps.
pub type ProteinGappedSequence = ValidatedSeq<ProteinGapped>;

// ---------------------------------------------------------------------------
// Nucleotide methods
// ---------------------------------------------------------------------------

impl<K: Complementable> ValidatedSeq<K> {
    /// Replace each symbol with its base-pairing partner.
    ///
    /// The result is revalidated: a symbol without a partner becomes
    /// [`UNKNOWN_COMPLEMENT`](crate::alphabet::UNKNOWN_COMPLEMENT) and fails.
    pub fn complement(&self) -> Result<Self> {
        let data: Vec<u8> = self.iter().map(|&b| K::complement_symbol(b)).collect();
        Self::from_checked(data)
    }

    /// Reverse complement, computed in one pass from both ends inward.
    pub fn reverse_complement(&self) -> Result<Self> {
        let mut data = self.to_vec();
        let len = data.len();
        for i in 0..len / 2 {
            let j = len - 1 - i;
            let (front, back) = (K::complement_symbol(data[i]), K::complement_symbol(data[j]));
            data[i] = back;
            data[j] = front;
        }
        if len % 2 == 1 {
            data[len / 2] = K::complement_symbol(data[len / 2]);
        }
        Self::from_checked(data)
    }

    /// GC content as a fraction in [0.0, 1.0].
    ///
    /// Counts G, C and the strong ambiguity code S. Returns 0.0 for empty
    /// sequences.
    pub fn gc_content(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let gc = self
            .iter()
            .filter(|&&b| matches!(b, b'G' | b'C' | b'S'))
            .count();
        gc as f64 / self.len() as f64
    }
}

impl<K: Transcribable> ValidatedSeq<K> {
    /// Transcribe DNA to RNA (T -> U). Length is preserved.
    pub fn transcribe(&self) -> ValidatedSeq<K::Transcript> {
        let rna: Vec<u8> = self
            .iter()
            .map(|&b| match b {
                b'T' => b'U',
                b't' => b'u',
                other => other,
            })
            .collect();
        ValidatedSeq::from_validated(rna)
    }
}

impl<K: ReverseTranscribable> ValidatedSeq<K> {
    /// Reverse-transcribe RNA to DNA (U -> T).
    pub fn reverse_transcribe(&self) -> ValidatedSeq<K::Template> {
        let dna: Vec<u8> = self
            .iter()
            .map(|&b| match b {
                b'U' => b'T',
                b'u' => b't',
                other => other,
            })
            .collect();
        ValidatedSeq::from_validated(dna)
    }
}

impl<K: Translatable> ValidatedSeq<K> {
    /// Translate consecutive codons into a protein.
    ///
    /// Yields exactly `len / 3` residues; trailing bases that do not fill a
    /// codon are dropped. Stop codons become `stop_symbol`, which must itself
    /// be a protein symbol (`*` is). Fails if a non-stop codon is unmapped in
    /// `table`.
    pub fn translate<T: CodonTable + ?Sized>(
        &self,
        table: &T,
        stop_symbol: u8,
    ) -> Result<ProteinSequence> {
        let protein = codon::translate_bytes(table, self, stop_symbol)?;
        ProteinSequence::from_checked(protein)
    }
}
