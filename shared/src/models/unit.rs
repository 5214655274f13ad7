//! Package Unit Model

use serde::{Deserialize, Serialize};

/// Normalized package unit
///
/// Known units serialize as the store symbols found in the snapshot
/// files ("l", "ml", "kg", "g", "buc"). Anything the parser does not
/// recognize is carried through trimmed as [`PackageUnit::Other`] so
/// an odd unit never breaks an import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageUnit {
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    /// Per-piece unit ("buc" in the source data)
    #[serde(rename = "buc")]
    Piece,
    #[serde(untagged)]
    Other(String),
}

impl PackageUnit {
    /// Parse a raw unit field from a snapshot row.
    ///
    /// The literal "role" (a recurring typo in the source feeds) is
    /// normalized to [`PackageUnit::Piece`]. This never fails: unknown
    /// units pass through trimmed.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "l" => Self::Liter,
            "ml" => Self::Milliliter,
            "kg" => Self::Kilogram,
            "g" => Self::Gram,
            "buc" | "role" => Self::Piece,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Wire symbol for this unit
    pub fn symbol(&self) -> &str {
        match self {
            Self::Liter => "l",
            Self::Milliliter => "ml",
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Piece => "buc",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PackageUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
