//! Regex-driven structured field extraction.

pub mod patterns;
mod rules;

pub use rules::{FieldRule, FieldRuleConfig, RuleBook, Selection};

use crate::types::{ContractType, StructuredData};

/// Applies the rule book for a category to document text.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    rules: RuleBook,
}

impl FieldExtractor {
    pub fn new(rules: RuleBook) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Extract the fields defined for `contract_type`.
    ///
    /// Rules run in order, so a later rule with the same field name
    /// replaces an earlier value. Fields with no match are left out.
    pub fn extract_fields(&self, text: &str, contract_type: ContractType) -> StructuredData {
        let mut data = StructuredData::new();
        for rule in self.rules.rules_for(contract_type) {
            if let Some(value) = rule.apply(text) {
                data.insert(rule.field.clone(), value);
            }
        }
        tracing::debug!(
            contract_type = %contract_type,
            fields = data.len(),
            "Extracted structured fields"
        );
        data
    }
}
