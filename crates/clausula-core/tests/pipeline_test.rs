//! End-to-end tests for document processing: file in, category and fields out.

use std::io::Write;

use clausula_core::{
    ClausulaConfig, ContractType, DocumentProcessor, FieldRuleConfig, RawDocument, Selection,
    StructuredData,
};
use tempfile::NamedTempFile;

fn write_fixture(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_financing_sentence() {
    let file = write_fixture(
        ".txt",
        "Financiamento no valor de R$ 50.000,00 em 48 parcelas com taxa de 1,5% a.m., \
         vencimento 10/05/2025"
            .as_bytes(),
    );

    let processor = DocumentProcessor::default();
    let (text, contract_type, data) = processor.process(file.path(), "txt").into_parts();

    assert!(text.starts_with("Financiamento"));
    assert_eq!(contract_type, ContractType::Financing);
    assert_eq!(data.text("numero_parcelas"), Some("48"));
    assert_eq!(data.text("valor_financiado"), Some("R$ 50.000,00"));
    assert!(data.get("datas").unwrap().contains("10/05/2025"));
    assert!(!data.contains_key("valor_parcela"));
}

#[test]
fn test_unrelated_text_is_unknown_with_no_fields() {
    let file = write_fixture(".txt", b"Lorem ipsum dolor sit amet");

    let processed = DocumentProcessor::default().process(file.path(), "txt");
    assert_eq!(processed.contract_type, ContractType::Unknown);
    assert!(processed.structured_data.is_empty());
    assert_eq!(processed.structured_data.to_json().unwrap(), "{}");
}

#[test]
fn test_rental_docx() {
    use docx_rs::{Docx, Paragraph, Run};

    let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("CONTRATO DE LOCAÇÃO RESIDENCIAL")))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(
            "O LOCATÁRIO pagará ao LOCADOR aluguel de R$ 2.000,00 e caução de R$ 6.000,00.",
        )))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(
            "Prazo de 30 meses contados de 01/03/2024.",
        )))
        .build()
        .pack(file.reopen().unwrap())
        .unwrap();

    let processed = DocumentProcessor::default().process_document(&RawDocument::from_path(file.path()));
    assert_eq!(processed.contract_type, ContractType::Rental);
    let data = &processed.structured_data;
    assert_eq!(data.text("valor_aluguel"), Some("R$ 2.000,00"));
    assert_eq!(data.text("valor_caucao"), Some("R$ 6.000,00"));
    assert_eq!(data.text("prazo_locacao"), Some("30"));
    assert!(!data.contains_key("multa_rescisao"));
}

#[test]
fn test_empty_and_unsupported_inputs() {
    let processor = DocumentProcessor::default();

    let empty = write_fixture(".txt", b"");
    let (text, contract_type, data) = processor.process(empty.path(), "txt").into_parts();
    assert_eq!(text, "");
    assert_eq!(contract_type, ContractType::Unknown);
    assert!(data.is_empty());

    let whitespace = write_fixture(".txt", b"   \n\n\t");
    assert_eq!(processor.process(whitespace.path(), "txt").text, "");

    let spreadsheet = write_fixture(".xlsx", b"seguro apolice");
    assert_eq!(processor.process(spreadsheet.path(), "xlsx").contract_type, ContractType::Unknown);

    let corrupt = write_fixture(".pdf", b"%PDF-1.4 truncated");
    assert_eq!(processor.process(corrupt.path(), "pdf").text, "");
}

#[test]
fn test_declared_type_wins_over_extension() {
    let file = write_fixture(".bin", "Apólice de seguro com cobertura até R$ 10.000,00".as_bytes());
    let processed = DocumentProcessor::default().process(file.path(), "TXT");
    assert_eq!(processed.contract_type, ContractType::Insurance);
    assert_eq!(processed.structured_data.text("valor_cobertura"), Some("R$ 10.000,00"));
}

#[test]
fn test_transport_round_trip_of_processed_fields() {
    let file = write_fixture(
        ".txt",
        "Seguro residencial. Prêmio de R$ 1.200,00.\nCobertura até o limite de R$ 500.000,00.\n\
         Franquia de R$ 2.000,00."
            .as_bytes(),
    );
    let data = DocumentProcessor::default().process(file.path(), "txt").structured_data;

    assert_eq!(data.text("premio_seguro"), Some("R$ 1.200,00"));
    assert_eq!(data.text("valor_cobertura"), Some("R$ 500.000,00"));
    assert_eq!(data.text("franquia"), Some("R$ 2.000,00"));

    let json = data.to_json().unwrap();
    assert_eq!(StructuredData::from_json(&json).unwrap(), data);
}

#[test]
fn test_configured_processor_applies_custom_rules() {
    let config = ClausulaConfig::builder()
        .custom_rule(FieldRuleConfig {
            contract_type: ContractType::Rental,
            field: "valor_iptu".to_string(),
            pattern: r"(?i)iptu[^\n]*?(R\$\s*\d+(?:\.\d{3})*(?:,\d{1,2})?)".to_string(),
            group: 1,
            selection: Selection::First,
        })
        .build();
    let processor = DocumentProcessor::from_config(&config).unwrap();

    let file = write_fixture(
        ".txt",
        "Aluguel de R$ 900,00 ao locador.\nIPTU anual de R$ 450,00 por conta do locatário.".as_bytes(),
    );
    let processed = processor.process(file.path(), "txt");
    assert_eq!(processed.contract_type, ContractType::Rental);
    assert_eq!(processed.structured_data.text("valor_iptu"), Some("R$ 450,00"));
    assert_eq!(processed.structured_data.text("valor_aluguel"), Some("R$ 900,00"));
}

#[test]
fn test_processing_is_deterministic() {
    let file = write_fixture(
        ".txt",
        "Empréstimo com juros de 2% a.m. pela Tabela Price em 24 prestações de R$ 800,00".as_bytes(),
    );
    let processor = DocumentProcessor::default();
    let a = processor.process(file.path(), "txt");
    let b = processor.process(file.path(), "txt");
    assert_eq!(a, b);
    assert_eq!(
        a.structured_data.to_json().unwrap(),
        b.structured_data.to_json().unwrap()
    );
    assert_eq!(a.structured_data.text("sistema_amortizacao"), Some("Tabela Price"));
    assert_eq!(a.structured_data.text("numero_parcelas"), Some("24"));
}
