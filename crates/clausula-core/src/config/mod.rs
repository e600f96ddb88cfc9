//! Configuration system for clausula.

use serde::{Deserialize, Serialize};

use crate::classify::{CategoryKeywords, KeywordTable};
use crate::error::{ClausulaError, ClausulaResult};
use crate::fields::{FieldRuleConfig, RuleBook};
use crate::queue::QueueConfig;

/// OCR and page rasterization settings.
pub type OcrSettings = clausula_extractors::OcrConfig;

/// Classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Replaces the built-in keyword table when set. Entry order decides ties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<CategoryKeywords>>,
}

impl ClassifierSettings {
    /// Resolve the keyword table to use.
    pub fn table(&self) -> ClausulaResult<KeywordTable> {
        match &self.keywords {
            Some(entries) => KeywordTable::new(entries.clone()),
            None => Ok(KeywordTable::default()),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Extra rules appended after the built-in rules of their category.
    pub custom_rules: Vec<FieldRuleConfig>,
}

impl FieldSettings {
    /// Build the rule book: defaults plus compiled custom rules.
    pub fn rule_book(&self) -> ClausulaResult<RuleBook> {
        let mut book = RuleBook::default();
        book.extend_from_configs(&self.custom_rules)?;
        Ok(book)
    }
}

/// Main clausula configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClausulaConfig {
    /// OCR configuration.
    pub ocr: OcrSettings,
    /// Classifier configuration.
    pub classifier: ClassifierSettings,
    /// Field extraction configuration.
    pub fields: FieldSettings,
    /// Processing queue configuration.
    pub queue: QueueConfig,
}

impl ClausulaConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ClausulaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ClausulaError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ClausulaError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ClausulaError::Configuration(e.to_string())),
            _ => Err(ClausulaError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables. Unparsable numbers are
    /// ignored with a warning.
    pub fn apply_env(&mut self) {
        // OCR configuration
        if let Ok(language) = std::env::var("CLAUSULA_OCR_LANGUAGE") {
            self.ocr.language = language;
        }
        if let Some(dpi) = env_number::<u32>("CLAUSULA_OCR_DPI") {
            self.ocr.dpi = dpi.max(72);
        }
        if let Ok(command) = std::env::var("CLAUSULA_PDFTOPPM") {
            self.ocr.pdftoppm_command = command;
        }

        // Queue configuration
        if let Some(workers) = env_number::<usize>("CLAUSULA_WORKERS") {
            self.queue.workers = workers;
        }
        if let Some(capacity) = env_number::<usize>("CLAUSULA_QUEUE_CAPACITY") {
            self.queue.capacity = capacity;
        }
        if let Some(attempts) = env_number::<u32>("CLAUSULA_MAX_ATTEMPTS") {
            self.queue.max_attempts = attempts;
        }
        if let Some(retain) = env_number::<usize>("CLAUSULA_RETAIN_COMPLETED") {
            self.queue.retain_completed = retain;
        }
    }

    /// Check that the configuration can build a processor and a queue.
    pub fn validate(&self) -> ClausulaResult<()> {
        self.classifier.table()?;
        self.fields.rule_book()?;
        self.queue.validate()
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ClausulaConfigBuilder {
        ClausulaConfigBuilder::default()
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

/// Builder for ClausulaConfig.
#[derive(Default)]
pub struct ClausulaConfigBuilder {
    config: ClausulaConfig,
}

impl ClausulaConfigBuilder {
    /// Set OCR configuration.
    pub fn ocr(mut self, config: OcrSettings) -> Self {
        self.config.ocr = config;
        self
    }

    /// Replace the classifier keyword table.
    pub fn keywords(mut self, keywords: Vec<CategoryKeywords>) -> Self {
        self.config.classifier.keywords = Some(keywords);
        self
    }

    /// Add a custom field rule.
    pub fn custom_rule(mut self, rule: FieldRuleConfig) -> Self {
        self.config.fields.custom_rules.push(rule);
        self
    }

    /// Set queue configuration.
    pub fn queue(mut self, config: QueueConfig) -> Self {
        self.config.queue = config;
        self
    }

    /// Set the number of queue workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.queue.workers = workers;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClausulaConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Selection;
    use crate::types::ContractType;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClausulaConfig::default();
        assert_eq!(config.ocr.language, "por");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.queue.workers, 2);
        assert!(config.classifier.keywords.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[ocr]
language = "por+eng"

[queue]
workers = 4

[[classifier.keywords]]
contract_type = "rental"
keywords = ["aluguel", "locação"]

[[fields.custom_rules]]
contract_type = "rental"
field = "valor_iptu"
pattern = 'IPTU[^\n]*?(R\$\s*\d+(?:\.\d{{3}})*(?:,\d{{1,2}})?)'
group = 1
selection = "first"
"#
        )
        .unwrap();

        let config = ClausulaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ocr.language, "por+eng");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.queue.workers, 4);
        assert_eq!(config.queue.capacity, QueueConfig::default().capacity);

        let table = config.classifier.table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].contract_type, ContractType::Rental);

        let rule = &config.fields.custom_rules[0];
        assert_eq!(rule.selection, Selection::First);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_and_yaml() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"queue": {{"max_attempts": 3}}}}"#).unwrap();
        let config = ClausulaConfig::from_file(json.path()).unwrap();
        assert_eq!(config.queue.max_attempts, 3);

        let mut yaml = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(yaml, "ocr:\n  dpi: 200\n").unwrap();
        let config = ClausulaConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.ocr.dpi, 200);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = ClausulaConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ClausulaError::Configuration(_)));
    }

    #[test]
    fn test_invalid_custom_rule_fails_validation() {
        let config = ClausulaConfig::builder()
            .custom_rule(FieldRuleConfig {
                contract_type: ContractType::Insurance,
                field: "carencia".to_string(),
                pattern: "(".to_string(),
                group: 0,
                selection: Selection::All,
            })
            .build();
        assert!(matches!(
            config.validate(),
            Err(ClausulaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = ClausulaConfig::builder()
            .ocr(OcrSettings::default().with_language("eng"))
            .workers(8)
            .keywords(vec![CategoryKeywords::new(ContractType::Insurance, ["seguro"])])
            .build();
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.queue.workers, 8);
        assert_eq!(config.classifier.table().unwrap().len(), 1);
    }
}
