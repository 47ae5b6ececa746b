//! Balance-sheet categories
//!
//! The asset and liability sides of the book are closed sets. Their
//! declaration order is the display order used by every report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset category held by the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetCategory {
    /// Central bank reserves and vault cash (never haircut)
    Cash,
    /// High-quality liquid assets (government securities)
    #[serde(rename = "HQLA", alias = "Hqla", alias = "hqla")]
    Hqla,
    /// Loan book
    Loans,
    /// Real estate holdings
    #[serde(alias = "real_estate")]
    RealEstate,
}

impl AssetCategory {
    /// All asset categories in display order
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::Cash,
        AssetCategory::Hqla,
        AssetCategory::Loans,
        AssetCategory::RealEstate,
    ];

    /// Canonical label (matches the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "Cash",
            AssetCategory::Hqla => "HQLA",
            AssetCategory::Loans => "Loans",
            AssetCategory::RealEstate => "RealEstate",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a category name cannot be recognised
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown asset category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for AssetCategory {
    type Err = UnknownCategory;

    /// Case-insensitive; accepts `RealEstate`, `real_estate` and `real-estate`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "cash" => Ok(AssetCategory::Cash),
            "hqla" => Ok(AssetCategory::Hqla),
            "loans" | "loan" => Ok(AssetCategory::Loans),
            "realestate" | "re" => Ok(AssetCategory::RealEstate),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Liability category funding the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiabilityCategory {
    /// Retail and corporate deposits (subject to withdrawal shocks)
    Deposits,
    /// Wholesale funding
    Wholesale,
}

impl LiabilityCategory {
    /// All liability categories in display order
    pub const ALL: [LiabilityCategory; 2] = [LiabilityCategory::Deposits, LiabilityCategory::Wholesale];

    pub fn label(&self) -> &'static str {
        match self {
            LiabilityCategory::Deposits => "Deposits",
            LiabilityCategory::Wholesale => "Wholesale",
        }
    }
}

impl fmt::Display for LiabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset_category_variants() {
        assert_eq!("Cash".parse::<AssetCategory>(), Ok(AssetCategory::Cash));
        assert_eq!("hqla".parse::<AssetCategory>(), Ok(AssetCategory::Hqla));
        assert_eq!("real_estate".parse::<AssetCategory>(), Ok(AssetCategory::RealEstate));
        assert_eq!("Real-Estate".parse::<AssetCategory>(), Ok(AssetCategory::RealEstate));
        assert!("gold".parse::<AssetCategory>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&AssetCategory::Hqla).unwrap();
        assert_eq!(json, "\"HQLA\"");
        let parsed: AssetCategory = serde_json::from_str("\"RealEstate\"").unwrap();
        assert_eq!(parsed, AssetCategory::RealEstate);
    }
}
