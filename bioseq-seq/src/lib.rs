//! Alphabet-validated biological sequences and FASTQ/FASTA streaming.
//!
//! - **Alphabets**: [`Alphabet`] membership tables and the static [`DNA`],
//!   [`DNA_IUPAC`], [`RNA`], [`RNA_IUPAC`], [`PROTEIN`], [`PROTEIN_GAPPED`]
//! - **Sequences**: [`ValidatedSeq`] with the aliases [`DnaSequence`],
//!   [`RnaSequence`], [`ProteinSequence`] and their IUPAC/gapped variants
//! - **Codon translation**: the [`CodonTable`] trait and NCBI [`GeneticCode`]s
//! - **Quality scores**: [`QualityEncoding`] decoders and [`QualityScores`]
//! - **FASTQ / FASTA**: streaming readers and writers driven by a sequence
//!   generator callback
//!
//! # Example
//!
//! ```
//! use bioseq::{DnaSequence, GeneticCode};
//!
//! let dna = DnaSequence::new("ATGAAATAG").unwrap();
//! assert_eq!(dna.reverse_complement().unwrap().as_str(), "CTATTTCAT");
//!
//! let rna = dna.transcribe();
//! assert_eq!(rna.as_str(), "AUGAAAUAG");
//!
//! let protein = dna.translate(GeneticCode::standard(), b'*').unwrap();
//! assert_eq!(protein.as_str(), "MK*");
//! ```

pub mod alphabet;
pub mod codon;
pub mod fasta;
pub mod fastq;
pub mod quality;
pub mod seq;
pub mod types;

pub use alphabet::{
    Alphabet, Complementable, Dna, DnaIupac, Protein, ProteinGapped, ReverseTranscribable, Rna,
    RnaIupac, SequenceKind, Transcribable, Translatable, DNA, DNA_IUPAC, PROTEIN, PROTEIN_GAPPED,
    RNA, RNA_IUPAC,
};
pub use codon::{translate_bytes, CodonTable, GeneticCode, GeneticCodeId};
pub use fasta::{read_fasta_file, FastaReader, FastaRecord, FastaWriter, FastaWriterOptions};
pub use fastq::{
    read_fastq_file, FastqReader, FastqRecord, FastqWriter, FastqWriterOptions, ReaderState,
};
pub use quality::{QualityEncoding, QualityScores};
pub use seq::ValidatedSeq;
pub use types::{
    DnaIupacSequence, DnaSequence, ProteinGappedSequence, ProteinSequence, RnaIupacSequence,
    RnaSequence,
};

pub use bioseq_core::{BioseqError, PartialRead, PartialWrite, Result};
