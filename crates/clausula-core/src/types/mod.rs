//! Core types for clausula.

mod contract_type;
mod document;
mod structured;

pub use contract_type::{CategoryScore, ContractType};
pub use document::{ProcessedDocument, RawDocument};
pub use structured::{FieldValue, StructuredData};
