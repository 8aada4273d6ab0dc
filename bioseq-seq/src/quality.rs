//! Quality-score encodings and decoded score vectors for sequencing reads.
//!
//! A [`QualityEncoding`] maps each quality character to a signed score and
//! back, rejecting characters outside the range its instrument generation
//! emits. [`QualityScores`] holds the decoded values of a whole read.

use bioseq_core::{BioseqError, Result, Scored};

/// ASCII quality encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityEncoding {
    /// Phred+33, `!`..`I` (Q0-Q40).
    Sanger,
    /// Phred+33, `!`..`J` (Q0-Q41). Most common modern encoding.
    Illumina18,
    /// Phred+64, `@`..`h` (Q0-Q40).
    Illumina13,
    /// Phred+64, `B`..`h` (Q2-Q40). Q2 (`B`) doubles as the read-segment marker.
    Illumina15,
    /// Solexa+64, `;`..`h` (Q-5-Q40). Scores are log-odds, not Phred.
    Solexa,
}

impl QualityEncoding {
    /// ASCII offset subtracted from each character.
    pub fn offset(self) -> u8 {
        match self {
            QualityEncoding::Sanger | QualityEncoding::Illumina18 => 33,
            QualityEncoding::Illumina13 | QualityEncoding::Illumina15 | QualityEncoding::Solexa => {
                64
            }
        }
    }

    /// Inclusive range of valid quality characters.
    pub fn char_range(self) -> (u8, u8) {
        match self {
            QualityEncoding::Sanger => (b'!', b'I'),
            QualityEncoding::Illumina18 => (b'!', b'J'),
            QualityEncoding::Illumina13 => (b'@', b'h'),
            QualityEncoding::Illumina15 => (b'B', b'h'),
            QualityEncoding::Solexa => (b';', b'h'),
        }
    }

    /// Inclusive range of valid decoded scores.
    pub fn score_range(self) -> (i8, i8) {
        let (lo, hi) = self.char_range();
        (self.to_score(lo), self.to_score(hi))
    }

    /// Display name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            QualityEncoding::Sanger => "Sanger",
            QualityEncoding::Illumina18 => "Illumina 1.8+",
            QualityEncoding::Illumina13 => "Illumina 1.3+",
            QualityEncoding::Illumina15 => "Illumina 1.5+",
            QualityEncoding::Solexa => "Solexa",
        }
    }

    fn to_score(self, byte: u8) -> i8 {
        (byte as i16 - self.offset() as i16) as i8
    }

    /// Decode one quality character to its score.
    pub fn decode(self, byte: u8) -> Result<i8> {
        let (lo, hi) = self.char_range();
        if !(lo..=hi).contains(&byte) {
            return Err(BioseqError::Quality {
                value: byte as i32,
                encoding: self.name(),
            });
        }
        Ok(self.to_score(byte))
    }

    /// Encode a score back to its quality character.
    pub fn encode(self, score: i8) -> Result<u8> {
        let (lo, hi) = self.score_range();
        if !(lo..=hi).contains(&score) {
            return Err(BioseqError::Quality {
                value: score as i32,
                encoding: self.name(),
            });
        }
        Ok((score as i16 + self.offset() as i16) as u8)
    }

    /// Probability that the base call with this score is wrong.
    ///
    /// Phred encodings use `10^(-Q/10)`; Solexa scores are odds, so
    /// `p / (1 - p) = 10^(-Q/10)`.
    pub fn error_probability(self, score: i8) -> f64 {
        let odds = 10.0_f64.powf(-(score as f64) / 10.0);
        match self {
            QualityEncoding::Solexa => odds / (1.0 + odds),
            _ => odds,
        }
    }
}

/// Decoded quality scores of one read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityScores {
    scores: Vec<i8>,
    encoding: QualityEncoding,
}

impl QualityScores {
    /// Wrap already decoded scores, checking each against the encoding's range.
    pub fn from_raw(scores: Vec<i8>, encoding: QualityEncoding) -> Result<Self> {
        for &q in &scores {
            encoding.encode(q)?;
        }
        Ok(Self { scores, encoding })
    }

    /// Decode a quality line. Fails on the first out-of-range character.
    pub fn from_ascii(ascii: &[u8], encoding: QualityEncoding) -> Result<Self> {
        let scores = ascii
            .iter()
            .map(|&b| encoding.decode(b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scores, encoding })
    }

    /// Encode back to ASCII.
    pub fn to_ascii(&self) -> Vec<u8> {
        let offset = self.encoding.offset() as i16;
        self.scores.iter().map(|&q| (q as i16 + offset) as u8).collect()
    }

    pub fn encoding(&self) -> QualityEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.scores
    }

    /// Mean score, 0.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.scores.iter().map(|&q| q as i64).sum();
        sum as f64 / self.scores.len() as f64
    }

    pub fn min(&self) -> Option<i8> {
        self.scores.iter().copied().min()
    }

    pub fn max(&self) -> Option<i8> {
        self.scores.iter().copied().max()
    }

    /// Fraction of scores at or above `threshold`.
    pub fn fraction_above(&self, threshold: i8) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let count = self.scores.iter().filter(|&&q| q >= threshold).count();
        count as f64 / self.scores.len() as f64
    }

    /// Per-base error probabilities under this read's encoding.
    pub fn error_probabilities(&self) -> Vec<f64> {
        self.scores
            .iter()
            .map(|&q| self.encoding.error_probability(q))
            .collect()
    }

    /// Phred error probability for a single score: 10^(-Q/10).
    pub fn error_probability(phred: i8) -> f64 {
        QualityEncoding::Sanger.error_probability(phred)
    }
}

impl Scored for QualityScores {
    fn score(&self) -> f64 {
        self.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [QualityEncoding; 5] = [
        QualityEncoding::Sanger,
        QualityEncoding::Illumina18,
        QualityEncoding::Illumina13,
        QualityEncoding::Illumina15,
        QualityEncoding::Solexa,
    ];

    #[test]
    fn decode_bounds() {
        assert_eq!(QualityEncoding::Sanger.decode(b'!').unwrap(), 0);
        assert_eq!(QualityEncoding::Sanger.decode(b'I').unwrap(), 40);
        assert!(QualityEncoding::Sanger.decode(b'J').is_err());

        assert_eq!(QualityEncoding::Illumina18.decode(b'J').unwrap(), 41);
        assert!(QualityEncoding::Illumina18.decode(b' ').is_err());

        assert_eq!(QualityEncoding::Illumina13.decode(b'@').unwrap(), 0);
        assert_eq!(QualityEncoding::Illumina13.decode(b'h').unwrap(), 40);
        assert!(QualityEncoding::Illumina13.decode(b'?').is_err());

        assert_eq!(QualityEncoding::Illumina15.decode(b'B').unwrap(), 2);
        assert!(QualityEncoding::Illumina15.decode(b'A').is_err());

        assert_eq!(QualityEncoding::Solexa.decode(b';').unwrap(), -5);
        assert!(QualityEncoding::Solexa.decode(b':').is_err());
        assert!(QualityEncoding::Solexa.decode(b'i').is_err());
    }

    #[test]
    fn decode_error_carries_encoding() {
        let err = QualityEncoding::Illumina15.decode(b'A').unwrap_err();
        assert!(matches!(
            err,
            BioseqError::Quality {
                value: 65,
                encoding: "Illumina 1.5+"
            }
        ));
    }

    #[test]
    fn every_valid_char_encodes_back() {
        for enc in ALL {
            let (lo, hi) = enc.char_range();
            for b in lo..=hi {
                let q = enc.decode(b).unwrap();
                assert_eq!(enc.encode(q).unwrap(), b, "{enc:?} {}", b as char);
            }
        }
    }

    #[test]
    fn encode_rejects_out_of_range() {
        assert!(QualityEncoding::Sanger.encode(41).is_err());
        assert!(QualityEncoding::Sanger.encode(-1).is_err());
        assert!(QualityEncoding::Illumina15.encode(1).is_err());
        assert_eq!(QualityEncoding::Solexa.encode(-5).unwrap(), b';');
    }

    #[test]
    fn from_ascii_sanger() {
        let q = QualityScores::from_ascii(b"!I", QualityEncoding::Sanger).unwrap();
        assert_eq!(q.as_slice(), &[0, 40]);
        assert_eq!(q.to_ascii(), b"!I");
    }

    #[test]
    fn from_ascii_rejects_bad_char() {
        assert!(QualityScores::from_ascii(b"II#K", QualityEncoding::Sanger).is_err());
    }

    #[test]
    fn from_raw_checks_range() {
        assert!(QualityScores::from_raw(vec![0, 41], QualityEncoding::Illumina18).is_ok());
        assert!(QualityScores::from_raw(vec![0, 41], QualityEncoding::Sanger).is_err());
    }

    #[test]
    fn stats() {
        let q = QualityScores::from_raw(vec![10, 20, 30, 40], QualityEncoding::Sanger).unwrap();
        assert!((q.mean() - 25.0).abs() < 1e-10);
        assert_eq!(q.min(), Some(10));
        assert_eq!(q.max(), Some(40));
        assert!((q.fraction_above(20) - 0.75).abs() < 1e-10);
        assert!((q.fraction_above(30) - 0.5).abs() < 1e-10);
        assert!((q.score() - 25.0).abs() < 1e-10);
    }

    #[test]
    fn empty_stats() {
        let q = QualityScores::from_ascii(b"", QualityEncoding::Sanger).unwrap();
        assert!(q.is_empty());
        assert_eq!(q.mean(), 0.0);
        assert_eq!(q.min(), None);
        assert_eq!(q.fraction_above(10), 0.0);
    }

    #[test]
    fn error_probability() {
        assert!((QualityScores::error_probability(10) - 0.1).abs() < 1e-10);
        assert!((QualityScores::error_probability(20) - 0.01).abs() < 1e-10);
        // Solexa Q0 is even odds.
        assert!((QualityEncoding::Solexa.error_probability(0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn per_base_error_probabilities() {
        let q = QualityScores::from_ascii(b"+5", QualityEncoding::Sanger).unwrap();
        let p = q.error_probabilities();
        assert!((p[0] - 0.1).abs() < 1e-10);
        assert!((p[1] - 0.01).abs() < 1e-10);
    }
}
