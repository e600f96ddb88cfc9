//! clausula-core - Contract document understanding.
//!
//! Turns an uploaded contract (PDF, Word, image or plain text) into its
//! text, a contract category and a set of structured fields.
//!
//! # Example
//!
//! ```ignore
//! use clausula_core::{ClausulaConfig, DocumentProcessor};
//!
//! let processor = DocumentProcessor::from_config(&ClausulaConfig::from_env())?;
//! let (text, contract_type, fields) = processor.process("contrato.pdf", "pdf").into_parts();
//!
//! println!("{contract_type}: {}", fields.to_json()?);
//! ```
//!
//! For background processing, wrap the processor in an `Arc` and hand it
//! to [`ProcessingQueue::start`].

pub mod classify;
pub mod config;
pub mod error;
pub mod fields;
pub mod pipeline;
pub mod queue;
pub mod types;

// Re-export commonly used types
pub use classify::{CategoryKeywords, Classifier, KeywordTable};
pub use config::{ClassifierSettings, ClausulaConfig, FieldSettings, OcrSettings};
pub use error::{ClausulaError, ClausulaResult, ErrorCode};
pub use fields::{FieldExtractor, FieldRule, FieldRuleConfig, RuleBook, Selection};
pub use pipeline::DocumentProcessor;
pub use queue::{
    FailureReason, JobEvent, JobId, JobRecord, JobState, JobSubscriber, ProcessingQueue,
    QueueConfig, QueueStats,
};
pub use types::{
    CategoryScore, ContractType, FieldValue, ProcessedDocument, RawDocument, StructuredData,
};

pub use clausula_extractors::{ExtractionPipeline, FileType};
