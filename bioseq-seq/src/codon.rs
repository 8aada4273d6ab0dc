//! Codon translation tables.
//!
//! [`CodonTable`] is the lookup contract consumed by sequence translation.
//! [`GeneticCode`] implements it for the NCBI genetic codes whose stop codons
//! are unambiguous. Every table is `static` data derived at compile time from
//! the standard code plus a short list of reassigned codons.

use std::fmt;

use bioseq_core::{BioseqError, Result};

/// Amino acid symbol stored for stop codons.
pub const STOP: u8 = b'*';

// ---------------------------------------------------------------------------
// Base encoding: A=0, C=1, G=2, T/U=3
// ---------------------------------------------------------------------------

const fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// Convert a 3-base codon to an index in [0, 64).
fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let b1 = base_index(codon[0])?;
    let b2 = base_index(codon[1])?;
    let b3 = base_index(codon[2])?;
    Some(b1 * 16 + b2 * 4 + b3)
}

/// Compile-time variant of [`codon_index`] for table literals.
const fn literal_index(codon: &[u8; 3]) -> usize {
    let mut idx = 0;
    let mut i = 0;
    while i < 3 {
        idx = match base_index(codon[i]) {
            Some(b) => idx * 4 + b,
            None => panic!("codon literal contains a non-ACGT base"),
        };
        i += 1;
    }
    idx
}

/// Convert an index in [0, 64) back to a codon (as DNA: A/C/G/T).
fn index_to_codon(idx: usize) -> [u8; 3] {
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]]
}

/// Uppercase DNA spelling of a codon, or `None` if it is not three bases.
fn normalize_codon(codon: &[u8]) -> Option<[u8; 3]> {
    codon_index(codon).map(index_to_codon)
}

// ---------------------------------------------------------------------------
// Lookup contract
// ---------------------------------------------------------------------------

/// Maps nucleotide triplets to amino acids.
///
/// Stop codons are ordinary entries (mapped to [`STOP`] by [`GeneticCode`]);
/// `translate_codon` returns `None` only for triplets the table does not know.
pub trait CodonTable {
    /// Human-readable table name.
    fn name(&self) -> &str;

    /// Amino acid for a triplet, `None` if the triplet is unmapped.
    fn translate_codon(&self, codon: &[u8]) -> Option<u8>;

    /// Start codons, spelled with DNA letters.
    fn start_codons(&self) -> Vec<[u8; 3]>;

    /// Stop codons, spelled with DNA letters.
    fn stop_codons(&self) -> Vec<[u8; 3]>;

    /// Whether `codon` (DNA or RNA letters, any case) is one of [`stop_codons`](Self::stop_codons).
    fn is_stop(&self, codon: &[u8]) -> bool {
        match normalize_codon(codon) {
            Some(c) => self.stop_codons().contains(&c),
            None => false,
        }
    }

    /// Whether `codon` is one of [`start_codons`](Self::start_codons).
    fn is_start(&self, codon: &[u8]) -> bool {
        match normalize_codon(codon) {
            Some(c) => self.start_codons().contains(&c),
            None => false,
        }
    }
}

/// Translate whole codons of `seq`, emitting `stop_symbol` for stop codons.
///
/// Trailing bases that do not fill a codon are dropped. An unmapped codon
/// fails the whole translation.
pub fn translate_bytes<T: CodonTable + ?Sized>(
    table: &T,
    seq: &[u8],
    stop_symbol: u8,
) -> Result<Vec<u8>> {
    let mut protein = Vec::with_capacity(seq.len() / 3);
    for codon in seq.chunks_exact(3) {
        if table.is_stop(codon) {
            protein.push(stop_symbol);
            continue;
        }
        match table.translate_codon(codon) {
            Some(aa) => protein.push(aa),
            None => {
                return Err(BioseqError::Translation {
                    codon: String::from_utf8_lossy(codon).into_owned(),
                    table: table.name().to_string(),
                })
            }
        }
    }
    Ok(protein)
}

// ---------------------------------------------------------------------------
// Genetic code table identifier
// ---------------------------------------------------------------------------

/// NCBI genetic code table identifier.
///
/// Tables with context-dependent stop codons (27, 28, 31) are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneticCodeId {
    Standard = 1,
    VertebrateMitochondrial = 2,
    YeastMitochondrial = 3,
    MoldMitochondrial = 4,
    InvertebrateMitochondrial = 5,
    CiliateNuclear = 6,
    EchinodermMitochondrial = 9,
    EuplotidNuclear = 10,
    BacterialPlastid = 11,
    AlternativeYeastNuclear = 12,
    AscidianMitochondrial = 13,
    AlternativeFlatwormMitochondrial = 14,
    ChlorophyceanMitochondrial = 16,
    TrematodeMitochondrial = 21,
    ScenedesmusMitochondrial = 22,
    ThraustochytriumMitochondrial = 23,
    RhabdopleuridaeMitochondrial = 24,
    Gracilibacteria = 25,
    PachysolenNuclear = 26,
    MesodiniumNuclear = 29,
    PeritrichNuclear = 30,
    CephalodiscidaeMitochondrial = 33,
}

impl GeneticCodeId {
    /// The NCBI `transl_table` number.
    pub fn ncbi_id(self) -> u8 {
        self as u8
    }

    /// Position of this code in `GENETIC_CODES`.
    const fn table_index(self) -> usize {
        match self {
            GeneticCodeId::Standard => 0,
            GeneticCodeId::VertebrateMitochondrial => 1,
            GeneticCodeId::YeastMitochondrial => 2,
            GeneticCodeId::MoldMitochondrial => 3,
            GeneticCodeId::InvertebrateMitochondrial => 4,
            GeneticCodeId::CiliateNuclear => 5,
            GeneticCodeId::EchinodermMitochondrial => 6,
            GeneticCodeId::EuplotidNuclear => 7,
            GeneticCodeId::BacterialPlastid => 8,
            GeneticCodeId::AlternativeYeastNuclear => 9,
            GeneticCodeId::AscidianMitochondrial => 10,
            GeneticCodeId::AlternativeFlatwormMitochondrial => 11,
            GeneticCodeId::ChlorophyceanMitochondrial => 12,
            GeneticCodeId::TrematodeMitochondrial => 13,
            GeneticCodeId::ScenedesmusMitochondrial => 14,
            GeneticCodeId::ThraustochytriumMitochondrial => 15,
            GeneticCodeId::RhabdopleuridaeMitochondrial => 16,
            GeneticCodeId::Gracilibacteria => 17,
            GeneticCodeId::PachysolenNuclear => 18,
            GeneticCodeId::MesodiniumNuclear => 19,
            GeneticCodeId::PeritrichNuclear => 20,
            GeneticCodeId::CephalodiscidaeMitochondrial => 21,
        }
    }

    /// Look up an identifier by NCBI `transl_table` number.
    pub fn from_ncbi_id(id: u8) -> Result<Self> {
        GENETIC_CODES
            .iter()
            .map(|code| code.id)
            .find(|code_id| code_id.ncbi_id() == id)
            .ok_or_else(|| {
                BioseqError::InvalidInput(format!("no genetic code with NCBI id {}", id))
            })
    }
}

// ---------------------------------------------------------------------------
// Genetic code tables (const arrays)
// ---------------------------------------------------------------------------

// Codon order: AAA, AAC, AAG, AAT, ACA, ACC, ACG, ACT, AGA, AGC, AGG, AGT,
//              ATA, ATC, ATG, ATT, CAA, CAC, CAG, CAT, CCA, CCC, CCG, CCT,
//              CGA, CGC, CGG, CGT, CTA, CTC, CTG, CTT, GAA, GAC, GAG, GAT,
//              GCA, GCC, GCG, GCT, GGA, GGC, GGG, GGT, GTA, GTC, GTG, GTT,
//              TAA, TAC, TAG, TAT, TCA, TCC, TCG, TCT, TGA, TGC, TGG, TGT,
//              TTA, TTC, TTG, TTT

/// Standard genetic code (NCBI Table 1).
const STANDARD_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

const fn reassign(overrides: &[(&[u8; 3], u8)]) -> [u8; 64] {
    let mut table = STANDARD_AA;
    let mut i = 0;
    while i < overrides.len() {
        let (codon, aa) = overrides[i];
        table[literal_index(codon)] = aa;
        i += 1;
    }
    table
}

const fn starts(codons: &[&[u8; 3]]) -> [bool; 64] {
    let mut mask = [false; 64];
    let mut i = 0;
    while i < codons.len() {
        mask[literal_index(codons[i])] = true;
        i += 1;
    }
    mask
}

/// A genetic code translation table.
///
/// Wraps a 64-element amino acid lookup array and a 64-element start codon
/// mask. Obtain one with [`GeneticCode::from_id`] or [`GeneticCode::standard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneticCode {
    id: GeneticCodeId,
    name: &'static str,
    table: [u8; 64],
    starts: [bool; 64],
}

macro_rules! genetic_code {
    ($id:ident, $name:literal, [$($codon:literal => $aa:literal),*], [$($start:literal),*]) => {
        GeneticCode {
            id: GeneticCodeId::$id,
            name: $name,
            table: reassign(&[$(($codon, $aa)),*]),
            starts: starts(&[$($start),*]),
        }
    };
}

static GENETIC_CODES: [GeneticCode; 22] = [
    genetic_code!(Standard, "Standard", [], [b"TTG", b"CTG", b"ATG"]),
    genetic_code!(
        VertebrateMitochondrial,
        "Vertebrate Mitochondrial",
        [b"AGA" => b'*', b"AGG" => b'*', b"ATA" => b'M', b"TGA" => b'W'],
        [b"ATT", b"ATC", b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        YeastMitochondrial,
        "Yeast Mitochondrial",
        [
            b"ATA" => b'M', b"CTT" => b'T', b"CTC" => b'T', b"CTA" => b'T',
            b"CTG" => b'T', b"TGA" => b'W'
        ],
        [b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        MoldMitochondrial,
        "Mold, Protozoan, and Coelenterate Mitochondrial and Mycoplasma/Spiroplasma",
        [b"TGA" => b'W'],
        [b"TTA", b"TTG", b"CTG", b"ATT", b"ATC", b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        InvertebrateMitochondrial,
        "Invertebrate Mitochondrial",
        [b"AGA" => b'S', b"AGG" => b'S', b"ATA" => b'M', b"TGA" => b'W'],
        [b"TTG", b"ATT", b"ATC", b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        CiliateNuclear,
        "Ciliate, Dasycladacean and Hexamita Nuclear",
        [b"TAA" => b'Q', b"TAG" => b'Q'],
        [b"ATG"]
    ),
    genetic_code!(
        EchinodermMitochondrial,
        "Echinoderm and Flatworm Mitochondrial",
        [b"AAA" => b'N', b"AGA" => b'S', b"AGG" => b'S', b"TGA" => b'W'],
        [b"ATG", b"GTG"]
    ),
    genetic_code!(EuplotidNuclear, "Euplotid Nuclear", [b"TGA" => b'C'], [b"ATG"]),
    genetic_code!(
        BacterialPlastid,
        "Bacterial, Archaeal and Plant Plastid",
        [],
        [b"TTG", b"CTG", b"ATT", b"ATC", b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        AlternativeYeastNuclear,
        "Alternative Yeast Nuclear",
        [b"CTG" => b'S'],
        [b"CTG", b"ATG"]
    ),
    genetic_code!(
        AscidianMitochondrial,
        "Ascidian Mitochondrial",
        [b"AGA" => b'G', b"AGG" => b'G', b"ATA" => b'M', b"TGA" => b'W'],
        [b"TTG", b"ATA", b"ATG", b"GTG"]
    ),
    genetic_code!(
        AlternativeFlatwormMitochondrial,
        "Alternative Flatworm Mitochondrial",
        [
            b"AAA" => b'N', b"AGA" => b'S', b"AGG" => b'S', b"TAA" => b'Y',
            b"TGA" => b'W'
        ],
        [b"ATG"]
    ),
    genetic_code!(
        ChlorophyceanMitochondrial,
        "Chlorophycean Mitochondrial",
        [b"TAG" => b'L'],
        [b"ATG"]
    ),
    genetic_code!(
        TrematodeMitochondrial,
        "Trematode Mitochondrial",
        [
            b"TGA" => b'W', b"ATA" => b'M', b"AGA" => b'S', b"AGG" => b'S',
            b"AAA" => b'N'
        ],
        [b"ATG", b"GTG"]
    ),
    genetic_code!(
        ScenedesmusMitochondrial,
        "Scenedesmus obliquus Mitochondrial",
        [b"TCA" => b'*', b"TAG" => b'L'],
        [b"ATG"]
    ),
    genetic_code!(
        ThraustochytriumMitochondrial,
        "Thraustochytrium Mitochondrial",
        [b"TTA" => b'*'],
        [b"ATT", b"ATG", b"GTG"]
    ),
    genetic_code!(
        RhabdopleuridaeMitochondrial,
        "Rhabdopleuridae Mitochondrial",
        [b"AGA" => b'S', b"AGG" => b'K', b"TGA" => b'W'],
        [b"TTG", b"CTG", b"ATG", b"GTG"]
    ),
    genetic_code!(
        Gracilibacteria,
        "Candidate Division SR1 and Gracilibacteria",
        [b"TGA" => b'G'],
        [b"TTG", b"ATG", b"GTG"]
    ),
    genetic_code!(
        PachysolenNuclear,
        "Pachysolen tannophilus Nuclear",
        [b"CTG" => b'A'],
        [b"CTG", b"ATG"]
    ),
    genetic_code!(
        MesodiniumNuclear,
        "Mesodinium Nuclear",
        [b"TAA" => b'Y', b"TAG" => b'Y'],
        [b"ATG"]
    ),
    genetic_code!(
        PeritrichNuclear,
        "Peritrich Nuclear",
        [b"TAA" => b'E', b"TAG" => b'E'],
        [b"ATG"]
    ),
    genetic_code!(
        CephalodiscidaeMitochondrial,
        "Cephalodiscidae Mitochondrial",
        [b"TAA" => b'Y', b"TGA" => b'W', b"AGA" => b'S', b"AGG" => b'K'],
        [b"TTG", b"CTG", b"ATG", b"GTG"]
    ),
];

impl GeneticCode {
    /// The shared table for an NCBI identifier.
    pub fn from_id(id: GeneticCodeId) -> &'static Self {
        &GENETIC_CODES[id.table_index()]
    }

    /// The shared table for an NCBI `transl_table` number.
    pub fn from_ncbi_id(id: u8) -> Result<&'static Self> {
        GeneticCodeId::from_ncbi_id(id).map(Self::from_id)
    }

    /// The standard genetic code (NCBI Table 1).
    pub fn standard() -> &'static Self {
        &GENETIC_CODES[0]
    }

    /// Every available table, in NCBI id order.
    pub fn all() -> &'static [GeneticCode] {
        &GENETIC_CODES
    }

    /// Table identifier.
    pub fn id(&self) -> GeneticCodeId {
        self.id
    }
}

impl CodonTable for GeneticCode {
    fn name(&self) -> &str {
        self.name
    }

    fn translate_codon(&self, codon: &[u8]) -> Option<u8> {
        codon_index(codon).map(|idx| self.table[idx])
    }

    fn start_codons(&self) -> Vec<[u8; 3]> {
        (0..64)
            .filter(|&i| self.starts[i])
            .map(index_to_codon)
            .collect()
    }

    fn stop_codons(&self) -> Vec<[u8; 3]> {
        (0..64)
            .filter(|&i| self.table[i] == STOP)
            .map(index_to_codon)
            .collect()
    }

    fn is_stop(&self, codon: &[u8]) -> bool {
        codon_index(codon).map_or(false, |idx| self.table[idx] == STOP)
    }

    fn is_start(&self, codon: &[u8]) -> bool {
        codon_index(codon).map_or(false, |idx| self.starts[idx])
    }
}

impl fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_all_64_codons() {
        let code = GeneticCode::standard();
        let translated: Vec<u8> = (0..64)
            .map(|i| code.translate_codon(&index_to_codon(i)).unwrap())
            .collect();
        assert_eq!(translated, STANDARD_AA.to_vec());
        assert_eq!(code.translate_codon(b"ATG"), Some(b'M'));
        assert_eq!(code.translate_codon(b"TGG"), Some(b'W'));
    }

    #[test]
    fn stops_are_ordinary_entries() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate_codon(b"TAA"), Some(STOP));
        assert_eq!(
            code.stop_codons(),
            vec![*b"TAA", *b"TAG", *b"TGA"]
        );
    }

    #[test]
    fn unmapped_triplets() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate_codon(b"NNN"), None);
        assert_eq!(code.translate_codon(b"A-G"), None);
        assert_eq!(code.translate_codon(b"AT"), None);
        assert!(!code.is_stop(b"TRA"));
    }

    #[test]
    fn rna_and_lowercase_codons_work() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate_codon(b"AUG"), Some(b'M'));
        assert_eq!(code.translate_codon(b"uuu"), Some(b'F'));
        assert!(code.is_stop(b"UGA"));
        assert!(code.is_start(b"AUG"));
    }

    #[test]
    fn vertebrate_mito_differences() {
        let code = GeneticCode::from_id(GeneticCodeId::VertebrateMitochondrial);
        assert_eq!(code.translate_codon(b"TGA"), Some(b'W'));
        assert_eq!(code.translate_codon(b"ATA"), Some(b'M'));
        assert!(code.is_stop(b"AGA"));
        assert!(code.is_stop(b"AGG"));
        assert_eq!(code.stop_codons().len(), 4);
    }

    #[test]
    fn yeast_mito_reassigns_all_ctn() {
        let code = GeneticCode::from_id(GeneticCodeId::YeastMitochondrial);
        for codon in [b"CTT", b"CTC", b"CTA", b"CTG"] {
            assert_eq!(code.translate_codon(codon), Some(b'T'));
        }
    }

    #[test]
    fn ciliate_has_single_stop() {
        let code = GeneticCode::from_id(GeneticCodeId::CiliateNuclear);
        assert_eq!(code.stop_codons(), vec![*b"TGA"]);
        assert_eq!(code.translate_codon(b"TAA"), Some(b'Q'));
    }

    #[test]
    fn start_codons_listed_in_index_order() {
        let code = GeneticCode::standard();
        assert_eq!(code.start_codons(), vec![*b"ATG", *b"CTG", *b"TTG"]);
        let bacterial = GeneticCode::from_id(GeneticCodeId::BacterialPlastid);
        assert_eq!(bacterial.start_codons().len(), 7);
    }

    #[test]
    fn ncbi_id_round_trip() {
        for code in GeneticCode::all() {
            let id = code.id().ncbi_id();
            assert_eq!(GeneticCode::from_ncbi_id(id).unwrap().id(), code.id());
        }
        assert!(GeneticCode::from_ncbi_id(7).is_err());
        assert!(GeneticCode::from_ncbi_id(27).is_err());
    }

    #[test]
    fn every_id_resolves_to_its_own_table() {
        let ids = [
            GeneticCodeId::Standard,
            GeneticCodeId::VertebrateMitochondrial,
            GeneticCodeId::YeastMitochondrial,
            GeneticCodeId::MoldMitochondrial,
            GeneticCodeId::InvertebrateMitochondrial,
            GeneticCodeId::CiliateNuclear,
            GeneticCodeId::EchinodermMitochondrial,
            GeneticCodeId::EuplotidNuclear,
            GeneticCodeId::BacterialPlastid,
            GeneticCodeId::AlternativeYeastNuclear,
            GeneticCodeId::AscidianMitochondrial,
            GeneticCodeId::AlternativeFlatwormMitochondrial,
            GeneticCodeId::ChlorophyceanMitochondrial,
            GeneticCodeId::TrematodeMitochondrial,
            GeneticCodeId::ScenedesmusMitochondrial,
            GeneticCodeId::ThraustochytriumMitochondrial,
            GeneticCodeId::RhabdopleuridaeMitochondrial,
            GeneticCodeId::Gracilibacteria,
            GeneticCodeId::PachysolenNuclear,
            GeneticCodeId::MesodiniumNuclear,
            GeneticCodeId::PeritrichNuclear,
            GeneticCodeId::CephalodiscidaeMitochondrial,
        ];
        assert_eq!(ids.len(), GeneticCode::all().len());
        for id in ids {
            assert_eq!(GeneticCode::from_id(id).id(), id);
            assert_eq!(GeneticCode::from_ncbi_id(id.ncbi_id()).unwrap().id(), id);
        }
    }

    #[test]
    fn every_table_has_stops_and_starts() {
        for code in GeneticCode::all() {
            assert!(!code.start_codons().is_empty(), "{}", code);
            assert!(!code.stop_codons().is_empty(), "{}", code);
        }
    }

    #[test]
    fn display_is_name() {
        assert_eq!(GeneticCode::standard().to_string(), "Standard");
    }

    #[test]
    fn translate_bytes_emits_stop_symbol() {
        let protein = translate_bytes(GeneticCode::standard(), b"ATGAAATAG", b'*').unwrap();
        assert_eq!(protein, b"MK*");
        let protein = translate_bytes(GeneticCode::standard(), b"ATGTAAGC", b'.').unwrap();
        assert_eq!(protein, b"M.");
    }

    #[test]
    fn translate_bytes_fails_on_unmapped_codon() {
        let err = translate_bytes(GeneticCode::standard(), b"ATGNNN", b'*').unwrap_err();
        match err {
            BioseqError::Translation { codon, table } => {
                assert_eq!(codon, "NNN");
                assert_eq!(table, "Standard");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    struct PartialTable;

    impl CodonTable for PartialTable {
        fn name(&self) -> &str {
            "partial"
        }

        fn translate_codon(&self, codon: &[u8]) -> Option<u8> {
            match codon {
                b"ATG" => Some(b'M'),
                b"TAA" => Some(STOP),
                _ => None,
            }
        }

        fn start_codons(&self) -> Vec<[u8; 3]> {
            vec![*b"ATG"]
        }

        fn stop_codons(&self) -> Vec<[u8; 3]> {
            vec![*b"TAA"]
        }
    }

    #[test]
    fn provided_stop_check_normalizes_rna() {
        let table = PartialTable;
        assert!(table.is_stop(b"UAA"));
        assert!(table.is_start(b"atg"));
        let protein = translate_bytes(&table, b"ATGUAA", b'*').unwrap();
        assert_eq!(protein, b"M*");
        assert!(translate_bytes(&table, b"GGG", b'*').is_err());
    }
}
