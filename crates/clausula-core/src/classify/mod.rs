//! Keyword-frequency contract classification.
//!
//! Each category scores the number of non-overlapping occurrences of its
//! keywords in the lower-cased text. The strictly highest score wins; a
//! tie goes to the category listed first in the table; zero everywhere
//! means `unknown`.

mod keywords;

pub use keywords::{CategoryKeywords, KeywordTable};

use crate::types::{CategoryScore, ContractType};

/// Scores text against an ordered keyword table.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: KeywordTable,
}

impl Classifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Score every category, in table order.
    pub fn scores(&self, text: &str) -> Vec<CategoryScore> {
        let lowered = text.to_lowercase();
        self.table
            .entries()
            .iter()
            .map(|entry| CategoryScore {
                contract_type: entry.contract_type,
                score: entry
                    .keywords
                    .iter()
                    .map(|k| lowered.matches(k.as_str()).count())
                    .sum(),
            })
            .collect()
    }

    /// Pick the winning category for `text`.
    pub fn classify(&self, text: &str) -> ContractType {
        let winner = self
            .scores(text)
            .into_iter()
            .fold(None::<CategoryScore>, |best, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            });

        match winner {
            Some(best) if best.score > 0 => {
                tracing::debug!(
                    contract_type = %best.contract_type,
                    score = best.score,
                    "Classified document"
                );
                best.contract_type
            }
            _ => ContractType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unknown() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(""), ContractType::Unknown);
        assert_eq!(classifier.classify("Lorem ipsum dolor sit amet"), ContractType::Unknown);
    }

    #[test]
    fn test_financing_text() {
        let classifier = Classifier::default();
        let text = "Contrato de financiamento: o mutuário pagará juros ao banco credor.";
        assert_eq!(classifier.classify(text), ContractType::Financing);
    }

    #[test]
    fn test_rental_and_insurance() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("O LOCADOR cede ao LOCATÁRIO o imóvel mediante aluguel mensal."),
            ContractType::Rental
        );
        assert_eq!(
            classifier.classify("Apólice de seguro: em caso de sinistro o segurado recebe indenização."),
            ContractType::Insurance
        );
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("SEGURO E APÓLICE"), ContractType::Insurance);
    }

    #[test]
    fn test_scores_are_monotonic() {
        let classifier = Classifier::default();
        let base = "aluguel do imóvel";
        let before = classifier.scores(base);
        let after = classifier.scores(&format!("{base} e aluguel"));
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.contract_type, a.contract_type);
            assert!(a.score >= b.score);
        }
        assert!(after[1].score > before[1].score);
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let classifier = Classifier::default();
        // one financing keyword, one rental keyword
        let text = "juros e aluguel";
        let scores = classifier.scores(text);
        assert_eq!(scores[0].score, scores[1].score);
        assert_eq!(classifier.classify(text), ContractType::Financing);

        let reversed = Classifier::new(
            KeywordTable::new(vec![
                CategoryKeywords::new(ContractType::Rental, ["aluguel"]),
                CategoryKeywords::new(ContractType::Financing, ["juros"]),
            ])
            .unwrap(),
        );
        assert_eq!(reversed.classify(text), ContractType::Rental);
    }

    #[test]
    fn test_substring_counting() {
        let classifier = Classifier::new(
            KeywordTable::new(vec![CategoryKeywords::new(ContractType::Financing, ["taxa"])]).unwrap(),
        );
        let scores = classifier.scores("taxa, taxas e sobretaxa");
        assert_eq!(scores[0].score, 3);
    }
}
