//! Shared regular expressions for Brazilian contract text.
//!
//! Money and percentage fragments are defined once and spliced into the
//! context patterns (penalty, coverage, deductible) so every field agrees
//! on what a value looks like.

use once_cell::sync::Lazy;
use regex::Regex;

/// `R$ 1.234,56` style amounts.
pub const MONEY: &str = r"R\$\s*\d+(?:\.\d{3})*(?:,\d{1,2})?";

/// Bare percentage such as `1,5%`.
pub const PERCENT: &str = r"\d+(?:,\d+)?%";

pub static MONEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(MONEY).unwrap());

/// Percentage with an optional yearly or monthly qualifier.
pub static RATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:,\d+)?%(?:\s*(?:a\.a\.|ao ano|a\.m\.|ao mês))?").unwrap()
});

pub static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PERCENT).unwrap());

/// `dd/mm/yyyy` or `dd-mm-yyyy`, one or two digit day and month.
pub static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b").unwrap());

/// Installment count; the number is capture group 1.
pub static INSTALLMENTS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(?:parcelas?|prestaç(?:ão|ões))\b").unwrap()
});

/// Term length such as `30 meses` or `2 anos`; the number is capture group 1.
pub static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*(?:meses|mês|anos?)\b").unwrap());

pub static AMORTIZATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:SAC|Tabela Price|PRICE)\b").unwrap());

/// Penalty on the same line as `multa`; the value is group 1.
pub static PENALTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)multa[^\n]*?({PERCENT}|{MONEY})")).unwrap()
});

/// Coverage ceiling on the same line as `cobertura`; the amount is group 1.
pub static COVERAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)cobertura[^\n]*?(?:até|máximo)[^\n]*?({MONEY})")).unwrap()
});

/// Deductible on the same line as `franquia`; the value is group 1.
pub static DEDUCTIBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)franquia[^\n]*?({MONEY}|{PERCENT})")).unwrap()
});
