//! Code tables of the Küchler (1988) notation.
//!
//! Each table is a closed enum whose declaration order is its canonical
//! order. Every enum has:
//! - `ALL` in canonical order
//! - `as_char()` / `from_char()` for the single-character code
//! - `label()` with the Portuguese field-sheet label
//! - `Display`, `FromStr`, and string Serialize/Deserialize

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a character is not part of a code table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code '{code}'")]
pub struct UnknownCode {
    /// Which table was consulted (e.g. "coverage").
    pub kind: &'static str,
    /// The rejected input.
    pub code: String,
}

// ---------------------------------------------------------------------------
// Macro: defines a closed single-character code table.
// ---------------------------------------------------------------------------
macro_rules! define_code {
    (
        $(#[$meta:meta])*
        $name:ident, kind = $kind:literal,
        variants: [
            $( ($variant:ident, $code:literal, $label:literal) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// All codes in canonical order.
            pub const ALL: &'static [$name] = &[ $( Self::$variant, )+ ];

            /// The single-character code.
            pub fn as_char(self) -> char {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            /// The field-sheet label.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// Looks up a code by its character.
            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_char())
            }
        }

        impl TryFrom<char> for $name {
            type Error = UnknownCode;

            fn try_from(c: char) -> Result<Self, Self::Error> {
                Self::from_char(c).ok_or_else(|| UnknownCode {
                    kind: $kind,
                    code: c.to_string(),
                })
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::try_from(c),
                    _ => Err(UnknownCode {
                        kind: $kind,
                        code: s.to_owned(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut buf = [0u8; 4];
                serializer.serialize_str(self.as_char().encode_utf8(&mut buf))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Growth form
// ---------------------------------------------------------------------------

define_code! {
    /// Life-form category, declared in formula precedence order.
    ///
    /// `F` is the leaf-characteristic row: it carries [`LeafTrait`] codes
    /// and never contributes to the formula or the description.
    GrowthForm, kind = "growth form",
    variants: [
        (B, 'B', "folhas sempreverdes"),
        (D, 'D', "folhas decíduas"),
        (E, 'E', "acículas sempreverdes"),
        (N, 'N', "acículas decíduas"),
        (O, 'O', "áfilas"),
        (S, 'S', "semidecíduas"),
        (M, 'M', "mistas"),
        (G, 'G', "graminoides"),
        (H, 'H', "ervas comuns"),
        (L, 'L', "musgos e líquens"),
        (C, 'C', "lianas"),
        (K, 'K', "caule suculento"),
        (T, 'T', "plantas tufadas"),
        (V, 'V', "bambus"),
        (X, 'X', "epífitas"),
        (F, 'F', "folhas especiais"),
    ]
}

impl GrowthForm {
    /// Returns `true` for the leaf-characteristic row.
    pub fn is_leaf_row(self) -> bool {
        self == Self::F
    }

    /// The label with its first letter upper-cased ("Folhas decíduas").
    pub fn capitalized_label(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Height class
// ---------------------------------------------------------------------------

define_code! {
    /// Vegetation stratum, from `1` (shortest) to `8` (tallest).
    ///
    /// Declared shortest first, so the derived `Ord` is numeric. Presentation
    /// always runs tallest first; see [`HeightClass::tallest_first`].
    HeightClass, kind = "height",
    variants: [
        (H1, '1', "abaixo de 0,1m"),
        (H2, '2', "entre 0,1-0,5m"),
        (H3, '3', "entre 0,5-2m"),
        (H4, '4', "entre 2-5m"),
        (H5, '5', "entre 5-10m"),
        (H6, '6', "entre 10-20m"),
        (H7, '7', "entre 20-35m"),
        (H8, '8', "acima de 35m"),
    ]
}

impl HeightClass {
    /// Compact metric range shown on the field sheet.
    pub fn range(self) -> &'static str {
        match self {
            Self::H1 => "<0.1m",
            Self::H2 => "0.1-0.5m",
            Self::H3 => "0.5-2m",
            Self::H4 => "2-5m",
            Self::H5 => "5-10m",
            Self::H6 => "10-20m",
            Self::H7 => "20-35m",
            Self::H8 => ">35m",
        }
    }

    /// All height classes in presentation order (8 down to 1).
    pub fn tallest_first() -> impl Iterator<Item = HeightClass> {
        Self::ALL.iter().rev().copied()
    }
}

// ---------------------------------------------------------------------------
// Coverage class
// ---------------------------------------------------------------------------

define_code! {
    /// Canopy cover density within one stratum.
    CoverageClass, kind = "coverage",
    variants: [
        (Continuous, 'c', "contínua (>75%)"),
        (Interrupted, 'i', "interrompida (51-75%)"),
        (Porous, 'p', "porosa (26-50%)"),
        (Rare, 'r', "rara (6-25%)"),
        (Low, 'b', "baixa (1-5%)"),
        (Absent, 'a', "ausente (<1%)"),
    ]
}

impl CoverageClass {
    /// The label without its parenthetical percentage range.
    pub fn name(self) -> &'static str {
        let label = self.label();
        label.split_once(" (").map_or(label, |(name, _)| name)
    }

    /// Continuous cover is the implicit default of the notation.
    pub fn is_implicit(self) -> bool {
        self == Self::Continuous
    }
}

// ---------------------------------------------------------------------------
// Leaf trait
// ---------------------------------------------------------------------------

define_code! {
    /// Leaf texture/size attribute recorded in the `F` row.
    LeafTrait, kind = "leaf trait",
    variants: [
        (Sclerophyll, 'h', "rígida (esclerófila)"),
        (Soft, 'w', "maleável"),
        (Succulent, 'k', "suculenta"),
        (Large, 'l', "grande (>400 cm²)"),
        (Small, 's', "pequena (<4 cm²)"),
    ]
}
