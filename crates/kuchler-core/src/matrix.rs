//! The physiognomic matrix of one plot.
//!
//! Cells are keyed by [`CellKey`] (`<form><height>`, e.g. `D4`) and hold a
//! coverage code, or a leaf-trait code for the `F` row. The matrix is kept
//! in canonical order (form precedence, then tallest height first) no matter
//! how it was filled. On the wire it is the plain `{"D4": "p"}` string map
//! used by the field application.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codes::{CoverageClass, GrowthForm, HeightClass, LeafTrait};

/// Errors raised while turning raw cells into a [`PhysiognomicMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("invalid cell key '{key}': expected a growth form letter followed by a height digit")]
    InvalidKey { key: String },

    #[error("cell {key}: '{code}' is not a coverage code (c, i, p, r, b, a)")]
    InvalidCoverage { key: String, code: String },

    #[error("cell {key}: '{code}' is not a leaf trait code (h, w, k, l, s)")]
    InvalidLeafTrait { key: String, code: String },

    #[error("cell {key} given more than once")]
    DuplicateCell { key: String },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

// ---------------------------------------------------------------------------
// Cell key
// ---------------------------------------------------------------------------

/// Coordinates of a matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub form: GrowthForm,
    pub height: HeightClass,
}

impl CellKey {
    pub fn new(form: GrowthForm, height: HeightClass) -> Self {
        Self { form, height }
    }
}

/// Canonical order: form precedence, then tallest height first.
impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.form
            .cmp(&other.form)
            .then_with(|| other.height.cmp(&self.height))
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.form, self.height)
    }
}

impl FromStr for CellKey {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MatrixError::InvalidKey { key: s.to_owned() };
        let mut chars = s.chars();
        let (Some(form), Some(height), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let form = GrowthForm::from_char(form).ok_or_else(invalid)?;
        let height = HeightClass::from_char(height).ok_or_else(invalid)?;
        Ok(Self { form, height })
    }
}

// ---------------------------------------------------------------------------
// Cell value
// ---------------------------------------------------------------------------

/// Content of a matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellValue {
    Coverage(CoverageClass),
    Leaf(LeafTrait),
}

impl CellValue {
    pub fn as_char(self) -> char {
        match self {
            Self::Coverage(c) => c.as_char(),
            Self::Leaf(l) => l.as_char(),
        }
    }

    /// Parses a raw code for the given cell; the `F` row takes leaf traits.
    pub fn parse_for(key: CellKey, code: &str) -> Result<Self> {
        if key.form.is_leaf_row() {
            code.parse().map(Self::Leaf).map_err(|_| MatrixError::InvalidLeafTrait {
                key: key.to_string(),
                code: code.to_owned(),
            })
        } else {
            code.parse().map(Self::Coverage).map_err(|_| MatrixError::InvalidCoverage {
                key: key.to_string(),
                code: code.to_owned(),
            })
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

/// Sparse (form, height) → code table describing one plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysiognomicMatrix {
    cells: BTreeMap<CellKey, CellValue>,
}

impl PhysiognomicMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from raw `(key, code)` pairs.
    ///
    /// Every key and code is checked; the first offending cell is reported.
    /// A key appearing twice is rejected rather than silently overwritten.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut matrix = Self::new();
        for (key, code) in pairs {
            let key: CellKey = key.as_ref().trim().parse()?;
            let value = CellValue::parse_for(key, code.as_ref().trim())?;
            if matrix.cells.insert(key, value).is_some() {
                return Err(MatrixError::DuplicateCell {
                    key: key.to_string(),
                });
            }
        }
        Ok(matrix)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when no cell at all is filled, leaf row included.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, CellValue)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    /// Coverage cells only (the `F` row skipped), in canonical order.
    pub fn coverage_cells(&self) -> impl Iterator<Item = (CellKey, CoverageClass)> + '_ {
        self.cells.iter().filter_map(|(k, v)| match v {
            CellValue::Coverage(c) => Some((*k, *c)),
            CellValue::Leaf(_) => None,
        })
    }

    /// Leaf-trait cells of the `F` row, tallest first.
    pub fn leaf_cells(&self) -> impl Iterator<Item = (HeightClass, LeafTrait)> + '_ {
        self.cells.iter().filter_map(|(k, v)| match v {
            CellValue::Leaf(l) => Some((k.height, *l)),
            CellValue::Coverage(_) => None,
        })
    }

    /// The raw string map, keyed by cell key in lexicographic order.
    pub fn to_raw(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> TryFrom<BTreeMap<K, V>> for PhysiognomicMatrix {
    type Error = MatrixError;

    fn try_from(raw: BTreeMap<K, V>) -> Result<Self> {
        Self::from_pairs(raw)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> TryFrom<std::collections::HashMap<K, V>> for PhysiognomicMatrix {
    type Error = MatrixError;

    fn try_from(raw: std::collections::HashMap<K, V>) -> Result<Self> {
        Self::from_pairs(raw)
    }
}

impl Serialize for PhysiognomicMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhysiognomicMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> CellKey {
        s.parse().unwrap()
    }

    #[test]
    fn cell_key_parse() {
        assert_eq!(key("D4"), CellKey::new(GrowthForm::D, HeightClass::H4));
        assert_eq!(key("F8").to_string(), "F8");
    }

    #[test]
    fn cell_key_rejects_malformed() {
        for bad in ["", "D", "D44", "Z4", "D9", "4D", "d4"] {
            let err = bad.parse::<CellKey>().unwrap_err();
            assert_eq!(err, MatrixError::InvalidKey { key: bad.into() }, "input {bad:?}");
        }
    }

    #[test]
    fn canonical_order_is_form_then_tallest() {
        let m = PhysiognomicMatrix::from_pairs([
            ("K3", "p"),
            ("D2", "i"),
            ("D4", "p"),
            ("B1", "c"),
            ("D3", "i"),
        ])
        .unwrap();
        let keys: Vec<String> = m.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["B1", "D4", "D3", "D2", "K3"]);
    }

    #[test]
    fn leaf_row_takes_leaf_traits() {
        let m = PhysiognomicMatrix::from_pairs([("F3", "h"), ("D3", "c")]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.coverage_cells().count(), 1);
        let leaves: Vec<_> = m.leaf_cells().collect();
        assert_eq!(leaves, vec![(HeightClass::H3, LeafTrait::Sclerophyll)]);
    }

    #[test]
    fn rejects_wrong_code_kind() {
        let err = PhysiognomicMatrix::from_pairs([("F3", "c")]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidLeafTrait { key: "F3".into(), code: "c".into() }
        );
        let err = PhysiognomicMatrix::from_pairs([("D3", "h")]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidCoverage { key: "D3".into(), code: "h".into() }
        );
    }

    #[test]
    fn rejects_duplicate_pairs() {
        let err = PhysiognomicMatrix::from_pairs([("D3", "c"), ("D3", "i")]).unwrap_err();
        assert_eq!(err, MatrixError::DuplicateCell { key: "D3".into() });
    }

    #[test]
    fn serde_uses_raw_string_map() {
        let m: PhysiognomicMatrix =
            serde_json::from_str(r#"{"D4": "p", "F2": "s", "B8": "c"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"B8":"c","D4":"p","F2":"s"}"#
        );
        assert!(serde_json::from_str::<PhysiognomicMatrix>(r#"{"D4": "x"}"#).is_err());
    }
}
