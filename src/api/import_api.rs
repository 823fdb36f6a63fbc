// ==========================================
// 商品目录导入API
// ==========================================
// 职责: 串联 文件解析 → 预览 → 分批上传 → 汇总
// 调用方: CLI / 集成测试
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::UploadConfigReader;
use crate::domain::product::{CandidateProduct, ImportPreview, RawRow};
use crate::domain::upload::{UploadResult, UploadSummary};
use crate::importer::CatalogImporterImpl;
use crate::upload::{BatchUploadOrchestrator, HttpIngestClient, IngestClient, ResultAggregator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// 上传API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReport {
    /// 完整结果（失败列表不截断）
    pub result: UploadResult,
    /// 展示用汇总
    pub summary: UploadSummary,
    /// 上传耗时（毫秒）
    pub elapsed_ms: i64,
}

pub struct CatalogImportApi {
    config: Arc<dyn UploadConfigReader>,
    importer: CatalogImporterImpl,
    client: Option<Arc<dyn IngestClient>>,
}

impl CatalogImportApi {
    /// 创建实例（上传时按配置创建 HTTP 客户端）
    pub fn new(config: Arc<dyn UploadConfigReader>) -> Self {
        Self {
            config,
            importer: CatalogImporterImpl::default(),
            client: None,
        }
    }

    /// 使用指定的写入客户端（忽略 ingest_endpoint 配置）
    pub fn with_client(config: Arc<dyn UploadConfigReader>, client: Arc<dyn IngestClient>) -> Self {
        Self {
            config,
            importer: CatalogImporterImpl::default(),
            client: Some(client),
        }
    }

    /// 解析文件并生成预览
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn preview_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ImportPreview> {
        Ok(self.importer.preview_file(file_path)?)
    }

    /// 由已解码的行生成预览
    pub fn preview_rows(&self, rows: &[RawRow]) -> ApiResult<ImportPreview> {
        Ok(self.importer.preview_rows(rows)?)
    }

    /// 上传候选商品并汇总
    ///
    /// # 参数
    /// - candidates: 预览得到的候选商品（不可上传项会被过滤）
    /// - shop_id: 目标店铺
    /// - on_progress: 每批完成后的进度回调
    /// - cancel: 可选取消信号
    ///
    /// # 返回
    /// - Ok(UploadReport): 即使部分或全部批次失败也返回完整汇总
    /// - Err(ApiError): 前置条件失败 / 配置读取失败
    #[instrument(skip_all, fields(shop_id = %shop_id, candidates = candidates.len()))]
    pub async fn upload<F>(
        &self,
        candidates: &[CandidateProduct],
        shop_id: &str,
        on_progress: F,
        cancel: Option<&CancellationToken>,
    ) -> ApiResult<UploadReport>
    where
        F: FnMut(u32) + Send,
    {
        let start = Instant::now();

        // === 步骤 1: 读取配置 ===
        let timeout_secs = self
            .config
            .get_batch_timeout_secs()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let sample_limit = self
            .config
            .get_failure_sample_limit()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let batch_timeout = Duration::from_secs(timeout_secs);

        // === 步骤 2: 准备客户端 ===
        let client = match &self.client {
            Some(client) => Arc::clone(client),
            None => {
                let endpoint = self
                    .config
                    .get_ingest_endpoint()
                    .await
                    .map_err(|e| ApiError::ConfigError(e.to_string()))?;
                info!(endpoint = %endpoint, timeout_secs, "使用 HTTP 写入客户端");
                Arc::new(HttpIngestClient::new(endpoint, batch_timeout)?) as Arc<dyn IngestClient>
            }
        };

        // === 步骤 3: 分批上传 ===
        let orchestrator = BatchUploadOrchestrator::new(client, batch_timeout);
        let result = orchestrator
            .run(candidates, shop_id, on_progress, cancel)
            .await?;

        // === 步骤 4: 汇总 ===
        let summary = ResultAggregator::new(sample_limit).summarize(&result);

        Ok(UploadReport {
            result,
            summary,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 CATALOG_INGEST_DB_PATH（非空时）
/// - 用户数据目录/catalog-ingest/catalog_ingest.db
/// - 取不到数据目录时: ./catalog_ingest.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("CATALOG_INGEST_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./catalog_ingest.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("catalog-ingest");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog_ingest.db");
        }
    }

    path.to_string_lossy().to_string()
}
