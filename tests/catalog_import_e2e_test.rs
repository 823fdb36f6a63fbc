// ==========================================
// 端到端测试: 表格行 → 预览 → 上传 → 汇总
// ==========================================


use catalog_ingest::api::{ApiError, CatalogImportApi};
use catalog_ingest::domain::{CellValue, Unit};
use catalog_ingest::importer::ImportError;
use catalog_ingest::logging;
use catalog_ingest::upload::UploadError;
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;
use test_helpers::{text_row, BatchScript, MockConfig, MockIngestClient};

fn scenario_rows() -> Vec<Vec<CellValue>> {
    vec![
        text_row(&["Name", "Price", "Category"]),
        text_row(&["Basmati Rice", "120", "Grains"]),
        text_row(&["", "50", "Grains"]),
        text_row(&["Mystery Gadget", "0", "Electronics"]),
    ]
}

fn api_with(client: Arc<MockIngestClient>, config: MockConfig) -> CatalogImportApi {
    CatalogImportApi::with_client(Arc::new(config), client)
}

#[tokio::test]
async fn test_scenario_single_eligible_product() {
    logging::init_test();

    let client = Arc::new(MockIngestClient::accepting());
    let api = api_with(client.clone(), MockConfig::default());

    let preview = api.preview_rows(&scenario_rows()).unwrap();

    assert_eq!(preview.mapping.name_index, 0);
    assert_eq!(preview.mapping.price_index, 1);
    assert_eq!(preview.mapping.category_index, Some(2));

    // 空名称行在解析阶段丢弃
    assert_eq!(preview.candidates.len(), 2);
    assert_eq!(preview.skipped_rows, 1);

    let rice = &preview.candidates[0];
    assert_eq!(rice.name, "Basmati Rice");
    assert_eq!(rice.price, 120.0);
    assert_eq!(rice.category, "Grains");
    assert_eq!(rice.unit, Unit::Kg);
    assert_eq!(rice.unit_confidence, 100);
    assert!(rice.is_eligible());

    let gadget = &preview.candidates[1];
    assert!(!gadget.is_valid);
    assert_eq!(
        gadget.errors,
        vec!["Valid price is required (must be greater than 0)".to_string()]
    );

    assert_eq!(preview.eligible_count(), 1);

    let report = api
        .upload(&preview.candidates, "shop-42", |_| {}, None)
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].name, "Basmati Rice");
    assert_eq!(calls[0][0].shop_id, "shop-42");

    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.success, 1);
    assert_eq!(report.summary.failure, 0);
    assert_eq!(report.summary.remaining_failures, 0);
}

#[test]
fn test_preview_is_idempotent() {
    let api = api_with(Arc::new(MockIngestClient::accepting()), MockConfig::default());
    let rows = scenario_rows();

    let first = api.preview_rows(&rows).unwrap();
    let second = api.preview_rows(&rows).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.candidates).unwrap(),
        serde_json::to_string(&second.candidates).unwrap()
    );
}

#[test]
fn test_fatal_import_errors() {
    let api = api_with(Arc::new(MockIngestClient::accepting()), MockConfig::default());

    let err = api.preview_rows(&[text_row(&["Name", "Price"])]).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Import(ImportError::InsufficientData { rows: 1 })
    ));

    let err = api
        .preview_rows(&[text_row(&["Item", "Category"]), text_row(&["Rice", "Grains"])])
        .unwrap_err();
    assert!(matches!(err, ApiError::Import(ImportError::MissingColumn(ref c)) if c == "price"));
}

#[tokio::test]
async fn test_no_eligible_products_is_fatal() {
    let client = Arc::new(MockIngestClient::accepting());
    let api = api_with(client.clone(), MockConfig::default());

    let preview = api
        .preview_rows(&[
            text_row(&["Name", "Price"]),
            text_row(&["Mystery Gadget", "0"]),
        ])
        .unwrap();

    let err = api
        .upload(&preview.candidates, "shop-1", |_| {}, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Upload(UploadError::NoEligibleProducts)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_summary_truncates_failures_with_configured_limit() {
    let client = Arc::new(MockIngestClient::new(vec![BatchScript::PartialFailure(12)]));
    let api = api_with(client, MockConfig::with_sample_limit(5));

    let mut rows = vec![text_row(&["Product Name", "MRP"])];
    for i in 0..20 {
        let name = format!("Item {:02}", i);
        rows.push(text_row(&[name.as_str(), "15"]));
    }
    let preview = api.preview_rows(&rows).unwrap();

    let report = api
        .upload(&preview.candidates, "shop-1", |_| {}, None)
        .await
        .unwrap();

    assert_eq!(report.result.failures.len(), 12);
    assert_eq!(report.summary.failure, 12);
    assert_eq!(report.summary.success, 8);
    assert_eq!(report.summary.failures_shown.len(), 5);
    assert_eq!(report.summary.remaining_failures, 7);
}

#[tokio::test]
async fn test_csv_file_end_to_end() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Product Name,Rate,Department").unwrap();
    writeln!(file, "Toor Dal,140,Pulses").unwrap();
    writeln!(file, "Amul Milk,28,").unwrap();
    writeln!(file, ",,").unwrap();
    writeln!(file, "Surf Excel 1kg,\"210.50\",Household").unwrap();
    writeln!(file, "X,10,Misc").unwrap();
    file.flush().unwrap();

    let client = Arc::new(MockIngestClient::accepting());
    let api = api_with(client.clone(), MockConfig::default());

    let preview = api.preview_file(file.path()).unwrap();

    assert_eq!(preview.candidates.len(), 4);
    assert_eq!(preview.candidates[1].category, "General Items");
    assert_eq!(preview.candidates[2].price, 210.5);
    assert_eq!(preview.candidates[2].unit, Unit::Kg);
    assert_eq!(preview.eligible_count(), 3);

    let mut progress = Vec::new();
    let report = api
        .upload(&preview.candidates, "shop-7", |p| progress.push(p), None)
        .await
        .unwrap();

    assert_eq!(progress, vec![100]);
    assert_eq!(report.summary.total, 3);
    assert_eq!(client.batch_sizes(), vec![3]);
}
