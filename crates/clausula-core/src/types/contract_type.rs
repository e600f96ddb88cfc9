//! Contract categories produced by classification.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Category of a contract document.
///
/// `Unknown` is the result when no category keyword appears in the text,
/// and also the category of documents whose text could not be extracted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Loans, credit agreements, mortgages.
    Financing,
    /// Property leases.
    Rental,
    /// Insurance policies.
    Insurance,
    /// No category keyword found.
    #[default]
    Unknown,
}

impl ContractType {
    /// Categories that can win classification, in table order.
    pub fn categories() -> Vec<ContractType> {
        Self::iter().filter(|t| *t != ContractType::Unknown).collect()
    }

    /// Returns a vector of all contract type names as static strings.
    pub fn all_names() -> Vec<&'static str> {
        Self::iter().map(|t| t.into()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn is_known(&self) -> bool {
        *self != ContractType::Unknown
    }
}

/// Per-category keyword score from classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub contract_type: ContractType,
    pub score: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_contract_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContractType::Financing).unwrap(),
            "\"financing\""
        );
        let parsed: ContractType = serde_json::from_str("\"insurance\"").unwrap();
        assert_eq!(parsed, ContractType::Insurance);
    }

    #[test]
    fn test_contract_type_from_str() {
        assert_eq!(ContractType::from_str("rental").unwrap(), ContractType::Rental);
        assert_eq!(ContractType::from_str("unknown").unwrap(), ContractType::Unknown);
        assert!(ContractType::from_str("employment").is_err());
    }

    #[test]
    fn test_categories_exclude_unknown() {
        assert_eq!(
            ContractType::categories(),
            vec![ContractType::Financing, ContractType::Rental, ContractType::Insurance]
        );
        assert_eq!(
            ContractType::all_names(),
            vec!["financing", "rental", "insurance", "unknown"]
        );
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(ContractType::default(), ContractType::Unknown);
        assert!(!ContractType::Unknown.is_known());
        assert_eq!(ContractType::Rental.as_str(), "rental");
    }
}
