//! Curve records and the strict JSON curve parser.

use serde::{Deserialize, Serialize};

use crate::error::WCurveError;

/// One point along a w-curve.
///
/// Serialized positionally as `[x, y, red, green, blue]`, the shape curve
/// JSON files use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 5]", into = "[f32; 5]")]
pub struct CurveRecord {
    /// Horizontal coordinate in curve-local space.
    pub x: f32,
    /// Vertical coordinate in curve-local space.
    pub y: f32,
    /// Red color weight.
    pub red: f32,
    /// Green color weight.
    pub green: f32,
    /// Blue color weight.
    pub blue: f32,
}

impl CurveRecord {
    /// Record at `(x, y)` with the given color weights.
    #[must_use]
    pub const fn new(x: f32, y: f32, red: f32, green: f32, blue: f32) -> Self {
        Self {
            x,
            y,
            red,
            green,
            blue,
        }
    }

    /// The color weights as an `[r, g, b]` triple.
    #[must_use]
    pub const fn color(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[f32; 5]> for CurveRecord {
    fn from([x, y, red, green, blue]: [f32; 5]) -> Self {
        Self::new(x, y, red, green, blue)
    }
}

impl From<CurveRecord> for [f32; 5] {
    fn from(r: CurveRecord) -> Self {
        [r.x, r.y, r.red, r.green, r.blue]
    }
}

/// An ordered sequence of curve records.
///
/// Index order is significant: it drives the z progression and the
/// line-strip connectivity (record `i` connects to record `i + 1`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    records: Vec<CurveRecord>,
}

impl Curve {
    /// Empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse curve JSON: an array of 5-element numeric arrays.
    ///
    /// Anything else (wrong arity, non-numeric fields, objects, trailing
    /// content) is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Parse`] if `text` is not a well-formed curve.
    pub fn from_json(text: &str) -> Result<Self, WCurveError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize back to the positional JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, WCurveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the curve holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of line segments the curve produces (`len - 1`, or 0).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    /// Read access to the records.
    #[must_use]
    pub fn records(&self) -> &[CurveRecord] {
        &self.records
    }

    /// Append a record.
    pub fn push(&mut self, record: CurveRecord) {
        self.records.push(record);
    }
}

impl From<Vec<CurveRecord>> for Curve {
    fn from(records: Vec<CurveRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<CurveRecord> for Curve {
    fn from_iter<I: IntoIterator<Item = CurveRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a CurveRecord;
    type IntoIter = std::slice::Iter<'a, CurveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
