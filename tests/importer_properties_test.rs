// ==========================================
// 导入层行为测试
// ==========================================
// 覆盖: 单位推断层级 / 校验完整性 / is_valid 不变量
// ==========================================


use catalog_ingest::domain::{ProductDraft, Unit};
use catalog_ingest::importer::{
    CatalogImporterImpl, ProductValidator, ProductValidatorImpl, UnitClassifier,
    UnitClassifierImpl,
};
use test_helpers::text_row;

#[test]
fn test_classifier_tiers() {
    let classifier = UnitClassifierImpl;

    assert_eq!(classifier.classify("rice"), (Unit::Kg, 100));
    assert_eq!(classifier.classify("cumin seeds"), (Unit::Gram, 100));
    assert_eq!(classifier.classify("good quality powder"), (Unit::Gram, 90));
    assert_eq!(classifier.classify("xyz unknown item"), (Unit::Piece, 60));
}

#[test]
fn test_exact_match_never_falls_through() {
    let classifier = UnitClassifierImpl;

    assert_eq!(classifier.classify("milk"), (Unit::Liter, 100));
    assert_eq!(classifier.classify("  MILK "), (Unit::Liter, 100));
}

#[test]
fn test_same_tier_conflict_resolved_by_declaration_order() {
    // "milk powder" 同时命中 gram("powder") 与 liter("milk")，gram 声明在前
    let classifier = UnitClassifierImpl;
    assert_eq!(classifier.classify("milk powder"), (Unit::Gram, 90));
}

#[test]
fn test_validator_reports_all_violations() {
    let validator = ProductValidatorImpl;

    let errors = validator.validate(&ProductDraft {
        name: Some(String::new()),
        price: Some(-5.0),
        category: Some("x".to_string()),
    });

    assert_eq!(
        errors,
        vec![
            "Product name is required (minimum 2 characters)".to_string(),
            "Valid price is required (must be greater than 0)".to_string(),
        ]
    );
}

#[test]
fn test_is_valid_matches_name_and_price_only() {
    let long_name = "b".repeat(150);
    let rows = vec![
        text_row(&["Item", "Amount", "Group"]),
        text_row(&["Sugar", "45", "Grocery"]),
        text_row(&["A", "10", "Misc"]),
        text_row(&[long_name.as_str(), "10", "Misc"]),
        text_row(&["Salt", "-3", "Grocery"]),
        text_row(&["Pepper", "abc", "Spices"]),
        text_row(&["Tea", "12.5kg", "Beverages"]),
    ];

    let preview = CatalogImporterImpl::default().preview_rows(&rows).unwrap();
    assert_eq!(preview.candidates.len(), 6);

    for candidate in &preview.candidates {
        let expected = !candidate.name.trim().is_empty() && candidate.price > 0.0;
        assert_eq!(candidate.is_valid, expected, "row {}", candidate.row_number);
    }

    // 前导数字宽松解析
    assert_eq!(preview.candidates[5].price, 12.5);

    let eligible: Vec<&str> = preview.eligible().map(|c| c.name.as_str()).collect();
    assert_eq!(eligible, vec!["Sugar", "Tea"]);
}
