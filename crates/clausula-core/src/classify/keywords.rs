//! Category vocabularies used by the keyword classifier.

use serde::{Deserialize, Serialize};

use crate::error::{ClausulaError, ClausulaResult};
use crate::types::ContractType;

/// One category and the phrases that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub contract_type: ContractType,
    pub keywords: Vec<String>,
}

impl CategoryKeywords {
    /// Keywords are stored lower-cased and blank entries are dropped.
    pub fn new<I, S>(contract_type: ContractType, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            contract_type,
            keywords,
        }
    }
}

const FINANCING: &[&str] = &[
    "financiamento",
    "empréstimo",
    "crédito",
    "parcela",
    "juros",
    "amortização",
    "sac",
    "price",
    "cet",
    "taxa",
    "prestação",
    "mutuário",
    "credor",
    "garantia",
    "hipoteca",
    "alienação fiduciária",
    "banco",
    "instituição financeira",
];

const RENTAL: &[&str] = &[
    "locação",
    "aluguel",
    "locador",
    "locatário",
    "inquilino",
    "imóvel",
    "aluguer",
    "arrendamento",
    "caução",
    "depósito",
    "fiador",
    "avalista",
    "vistoria",
    "benfeitorias",
    "iptu",
    "condomínio",
    "rescisão",
];

const INSURANCE: &[&str] = &[
    "seguro",
    "apólice",
    "segurado",
    "segurador",
    "prêmio",
    "sinistro",
    "cobertura",
    "franquia",
    "indenização",
    "beneficiário",
    "vigência",
    "renovação",
    "exclusão",
    "risco",
    "dano",
    "ressarcimento",
];

/// Ordered category vocabularies. Order decides ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<CategoryKeywords>,
}

impl KeywordTable {
    /// Build a table from explicit entries.
    ///
    /// `unknown` cannot carry keywords and a category may appear only once.
    /// Keywords are normalized the same way [`CategoryKeywords::new`] does.
    pub fn new(entries: Vec<CategoryKeywords>) -> ClausulaResult<Self> {
        let entries: Vec<CategoryKeywords> = entries
            .into_iter()
            .map(|e| CategoryKeywords::new(e.contract_type, e.keywords))
            .collect();
        let mut seen = Vec::with_capacity(entries.len());
        for entry in &entries {
            if !entry.contract_type.is_known() {
                return Err(ClausulaError::configuration(
                    "keyword table cannot assign keywords to 'unknown'",
                ));
            }
            if seen.contains(&entry.contract_type) {
                return Err(ClausulaError::configuration(format!(
                    "category '{}' listed twice in keyword table",
                    entry.contract_type
                )));
            }
            seen.push(entry.contract_type);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CategoryKeywords] {
        &self.entries
    }

    pub fn keywords_for(&self, contract_type: ContractType) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.contract_type == contract_type)
            .map(|e| e.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            entries: vec![
                CategoryKeywords::new(ContractType::Financing, FINANCING),
                CategoryKeywords::new(ContractType::Rental, RENTAL),
                CategoryKeywords::new(ContractType::Insurance, INSURANCE),
            ],
        }
    }
}
