// ==========================================
// 商品目录导入系统 - 命令行入口
// ==========================================
// 用法:
//   catalog-ingest <file> <shop_id> [db_path]
//
// Ctrl-C 在当前批次完成后停止上传，并输出已提交部分的汇总
// ==========================================

use catalog_ingest::api::{get_default_db_path, ApiError, CatalogImportApi, UploadReport};
use catalog_ingest::config::ConfigManager;
use catalog_ingest::domain::ImportPreview;
use catalog_ingest::logging;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const USAGE: &str = "usage: catalog-ingest <file> <shop_id> [db_path]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (file_path, shop_id) = match (args.next(), args.next()) {
        (Some(file), Some(shop)) => (file, shop),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };
    let db_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(get_default_db_path);

    tracing::info!("{} v{}", catalog_ingest::APP_NAME, catalog_ingest::VERSION);
    tracing::info!("使用配置库: {}", db_path);

    let config = Arc::new(ConfigManager::new(&db_path)?);
    let api = CatalogImportApi::new(config);

    // === 预览 ===
    let preview = api.preview_file(&file_path).unwrap_or_else(|e| fail(e));
    print_preview(&preview);

    // === 上传 ===
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("收到 Ctrl-C，当前批次完成后停止");
                cancel.cancel();
            }
        });
    }

    let report = api
        .upload(
            &preview.candidates,
            &shop_id,
            |percent| println!("Uploading... {}%", percent),
            Some(&cancel),
        )
        .await
        .unwrap_or_else(|e| fail(e));

    print_report(&report);
    Ok(())
}

fn fail(err: ApiError) -> ! {
    tracing::error!(error = %err, "导入中止");
    eprintln!("Error: {}", err.user_message());
    std::process::exit(1);
}

fn print_preview(preview: &ImportPreview) {
    println!(
        "Parsed {} products: {} ready to upload, {} need correction, {} empty rows skipped",
        preview.candidates.len(),
        preview.eligible_count(),
        preview.invalid_count(),
        preview.skipped_rows
    );

    for candidate in preview.candidates.iter().filter(|c| !c.is_eligible()) {
        let reasons = if candidate.errors.is_empty() {
            "invalid price".to_string()
        } else {
            candidate.errors.join("; ")
        };
        println!("  row {}: {} ({})", candidate.row_number, candidate.name, reasons);
    }
}

fn print_report(report: &UploadReport) {
    let summary = &report.summary;
    if summary.cancelled {
        println!(
            "Upload cancelled after {} of {} batches",
            report.result.batches_completed, report.result.batches_total
        );
    }
    println!(
        "Upload complete: {} total, {} succeeded, {} failed ({} ms)",
        summary.total, summary.success, summary.failure, report.elapsed_ms
    );

    for failure in &summary.failures_shown {
        println!("  - {}: {}", failure.product_label(), failure.error);
    }
    if summary.remaining_failures > 0 {
        println!("  ... and {} more", summary.remaining_failures);
    }
}
