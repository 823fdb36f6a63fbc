// ==========================================
// 商品目录导入系统 - 上传层
// ==========================================
// 职责: 候选商品 → 目录服务（分批顺序提交）→ 汇总
// ==========================================

pub mod aggregator;
pub mod error;
pub mod ingest_client;
pub mod orchestrator;

pub use aggregator::{ResultAggregator, DEFAULT_FAILURE_SAMPLE_LIMIT};
pub use error::{IngestResult, UploadError};
pub use ingest_client::{HttpIngestClient, IngestClient};
pub use orchestrator::{
    progress_percent, BatchUploadOrchestrator, BATCH_FAILURE_MESSAGE, DEFAULT_BATCH_TIMEOUT,
};
