//! Field rules: which pattern feeds which field, and which match to keep.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::patterns::{
    AMORTIZATION_RE, COVERAGE_RE, DATE_RE, DEDUCTIBLE_RE, INSTALLMENTS_RE, MONEY_RE, PENALTY_RE,
    PERCENT_RE, RATE_RE, TERM_RE,
};
use crate::error::{ClausulaError, ClausulaResult};
use crate::types::{ContractType, FieldValue};

/// Which matches of a pattern a field keeps.
///
/// `Nth` is zero-based, so `Nth(1)` is the second match. The labels this
/// produces (first amount is the principal, second the installment) are a
/// positional heuristic and can be wrong for unusual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every match, as a list.
    #[default]
    All,
    /// The first match.
    First,
    /// The match at this zero-based position.
    Nth(usize),
}

/// A compiled rule producing one structured field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub pattern: Regex,
    /// Capture group holding the value; 0 is the whole match.
    pub group: usize,
    pub selection: Selection,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, pattern: &Regex, selection: Selection) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.clone(),
            group: 0,
            selection,
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    /// Apply the rule. `None` means the pattern produced nothing to keep.
    pub fn apply(&self, text: &str) -> Option<FieldValue> {
        let mut values = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string());

        match self.selection {
            Selection::All => {
                let all: Vec<String> = values.collect();
                (!all.is_empty()).then_some(FieldValue::List(all))
            }
            Selection::First => values.next().map(FieldValue::Text),
            Selection::Nth(n) => values.nth(n).map(FieldValue::Text),
        }
    }
}

/// User-supplied rule, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRuleConfig {
    /// Category the rule applies to; `unknown` targets the general rules.
    pub contract_type: ContractType,
    pub field: String,
    pub pattern: String,
    #[serde(default)]
    pub group: usize,
    #[serde(default)]
    pub selection: Selection,
}

impl FieldRuleConfig {
    /// Compile into a [`FieldRule`].
    pub fn compile(&self) -> ClausulaResult<FieldRule> {
        let pattern = Regex::new(&self.pattern)
            .map_err(|e| ClausulaError::invalid_pattern(&self.field, e.to_string()))?;
        if self.group >= pattern.captures_len() {
            return Err(ClausulaError::invalid_pattern(
                &self.field,
                format!(
                    "group {} requested but pattern has {} capture group(s)",
                    self.group,
                    pattern.captures_len() - 1
                ),
            ));
        }
        Ok(FieldRule {
            field: self.field.clone(),
            pattern,
            group: self.group,
            selection: self.selection,
        })
    }
}

/// Ordered field rules per contract category.
///
/// `unknown` holds the general rules used when no category matched.
#[derive(Debug, Clone)]
pub struct RuleBook {
    rules: BTreeMap<ContractType, Vec<FieldRule>>,
}

impl RuleBook {
    /// An empty rule book.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Compile a rule book holding only the given rules.
    pub fn from_configs(rules: &[FieldRuleConfig]) -> ClausulaResult<Self> {
        let mut book = Self::empty();
        book.extend_from_configs(rules)?;
        Ok(book)
    }

    /// Compile and append rules after the existing ones of their category.
    ///
    /// Nothing is added if any rule fails to compile.
    pub fn extend_from_configs(&mut self, rules: &[FieldRuleConfig]) -> ClausulaResult<()> {
        let compiled = rules
            .iter()
            .map(|c| c.compile().map(|rule| (c.contract_type, rule)))
            .collect::<ClausulaResult<Vec<_>>>()?;
        for (contract_type, rule) in compiled {
            self.push(contract_type, rule);
        }
        Ok(())
    }

    pub fn push(&mut self, contract_type: ContractType, rule: FieldRule) {
        self.rules.entry(contract_type).or_default().push(rule);
    }

    /// Rules for a category, in application order.
    pub fn rules_for(&self, contract_type: ContractType) -> &[FieldRule] {
        self.rules
            .get(&contract_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        use Selection::{All, First, Nth};

        let mut book = Self::empty();

        for rule in [
            FieldRule::new("valores_monetarios", &MONEY_RE, All),
            FieldRule::new("valor_financiado", &MONEY_RE, First),
            FieldRule::new("valor_parcela", &MONEY_RE, Nth(1)),
            FieldRule::new("taxas_juros", &RATE_RE, All),
            FieldRule::new("numero_parcelas", &INSTALLMENTS_RE, First).with_group(1),
            FieldRule::new("datas", &DATE_RE, All),
            FieldRule::new("sistema_amortizacao", &AMORTIZATION_RE, First),
        ] {
            book.push(ContractType::Financing, rule);
        }

        for rule in [
            FieldRule::new("valores_monetarios", &MONEY_RE, All),
            FieldRule::new("valor_aluguel", &MONEY_RE, First),
            FieldRule::new("valor_caucao", &MONEY_RE, Nth(1)),
            FieldRule::new("prazo_locacao", &TERM_RE, First).with_group(1),
            FieldRule::new("datas", &DATE_RE, All),
            FieldRule::new("multa_rescisao", &PENALTY_RE, First).with_group(1),
        ] {
            book.push(ContractType::Rental, rule);
        }

        for rule in [
            FieldRule::new("valores_monetarios", &MONEY_RE, All),
            FieldRule::new("premio_seguro", &MONEY_RE, First),
            FieldRule::new("valor_cobertura", &COVERAGE_RE, First).with_group(1),
            FieldRule::new("franquia", &DEDUCTIBLE_RE, First).with_group(1),
        ] {
            book.push(ContractType::Insurance, rule);
        }

        for rule in [
            FieldRule::new("valores_monetarios", &MONEY_RE, All),
            FieldRule::new("datas", &DATE_RE, All),
            FieldRule::new("percentuais", &PERCENT_RE, All),
        ] {
            book.push(ContractType::Unknown, rule);
        }

        book
    }
}
