//! FASTA reading and the nucleotide W-curve walk.
//!
//! The walk is a chaos-game representation on a square: each nucleotide
//! owns a corner, and every base moves the current point halfway toward its
//! corner. The resulting `(x, y)` trail, one record per base, is the curve
//! the builder stacks along z.

use super::record::{Curve, CurveRecord};
use crate::error::WCurveError;

/// One FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header line without the leading `>`.
    pub header: String,
    /// Concatenated sequence, whitespace removed.
    pub sequence: String,
}

/// Parse FASTA text into its entries.
///
/// Lines starting with `;` are comments. Sequence data before the first
/// header is an error.
///
/// # Errors
///
/// Returns [`WCurveError::Fasta`] if sequence data precedes any header or
/// the input contains no entries.
pub fn parse_fasta(text: &str) -> Result<Vec<FastaRecord>, WCurveError> {
    let mut records: Vec<FastaRecord> = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord {
                header: header.trim().to_owned(),
                sequence: String::new(),
            });
            continue;
        }
        let Some(current) = records.last_mut() else {
            return Err(WCurveError::Fasta(format!(
                "line {}: sequence data before the first '>' header",
                line_no + 1
            )));
        };
        current
            .sequence
            .extend(line.chars().filter(|c| !c.is_whitespace()));
    }

    if records.is_empty() {
        return Err(WCurveError::Fasta("no FASTA entries found".into()));
    }
    Ok(records)
}

/// Corner and display color for a nucleotide, or `None` for ambiguity codes
/// and gaps.
fn nucleotide(base: char) -> Option<([f32; 2], [f32; 3])> {
    match base.to_ascii_uppercase() {
        'A' => Some(([-1.0, 1.0], [0.0, 0.8, 0.0])),
        'C' => Some(([-1.0, -1.0], [0.0, 0.0, 1.0])),
        'G' => Some(([1.0, -1.0], [1.0, 0.7, 0.0])),
        'T' | 'U' => Some(([1.0, 1.0], [1.0, 0.0, 0.0])),
        _ => None,
    }
}

/// Gray used for bases that do not move the walk.
const UNKNOWN_BASE_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Walk a nucleotide sequence into a w-curve, one record per base.
///
/// Unrecognized bases repeat the previous point so the record index stays
/// aligned with the sequence position.
#[must_use]
pub fn sequence_to_curve(sequence: &str) -> Curve {
    let mut point = [0.0f32, 0.0];
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|base| {
            let color = match nucleotide(base) {
                Some((corner, color)) => {
                    point[0] = (point[0] + corner[0]) * 0.5;
                    point[1] = (point[1] + corner[1]) * 0.5;
                    color
                }
                None => UNKNOWN_BASE_COLOR,
            };
            CurveRecord::new(point[0], point[1], color[0], color[1], color[2])
        })
        .collect()
}

/// Parse FASTA text and walk its first entry into a w-curve.
///
/// # Errors
///
/// Returns [`WCurveError::Fasta`] if the text is not valid FASTA.
pub fn fasta_to_curve(text: &str) -> Result<Curve, WCurveError> {
    let records = parse_fasta(text)?;
    let first = records
        .first()
        .ok_or_else(|| WCurveError::Fasta("no FASTA entries".into()))?;
    log::info!(
        "FASTA entry '{}': {} bases",
        first.header,
        first.sequence.len()
    );
    Ok(sequence_to_curve(&first.sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_entries_and_skips_comments() {
        let text = "; comment\n>seq1 first\nACGT\nAC GT\n\n>seq2\nTTTT\n";
        let records = parse_fasta(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "seq1 first");
        assert_eq!(records[0].sequence, "ACGTACGT");
        assert_eq!(records[1].sequence, "TTTT");
    }

    #[test]
    fn rejects_sequence_before_header() {
        assert!(matches!(
            parse_fasta("ACGT\n>late\nA"),
            Err(WCurveError::Fasta(_))
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_fasta("\n; nothing\n").is_err());
    }

    #[test]
    fn walk_halves_distance_to_corner() {
        let curve = sequence_to_curve("AAT");
        let r = curve.records();
        assert_eq!((r[0].x, r[0].y), (-0.5, 0.5));
        assert_eq!((r[1].x, r[1].y), (-0.75, 0.75));
        // T corner is (1, 1): halfway from (-0.75, 0.75).
        assert_eq!((r[2].x, r[2].y), (0.125, 0.875));
    }

    #[test]
    fn lowercase_and_rna_are_accepted() {
        let upper = sequence_to_curve("ACGT");
        let lower = sequence_to_curve("acgu");
        assert_eq!(upper, lower);
    }

    #[test]
    fn unknown_bases_hold_position() {
        let curve = sequence_to_curve("CNG");
        let r = curve.records();
        assert_eq!(curve.len(), 3);
        assert_eq!((r[1].x, r[1].y), (r[0].x, r[0].y));
        assert_eq!(r[1].color(), UNKNOWN_BASE_COLOR);
    }

    #[test]
    fn fasta_to_curve_uses_first_entry() {
        let curve = fasta_to_curve(">a\nACG\n>b\nT\n").unwrap();
        assert_eq!(curve.len(), 3);
    }
}
