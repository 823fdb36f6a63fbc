// ==========================================
// 商品目录导入系统 - 批量上传编排器
// ==========================================
// 流程: 前置检查 → 过滤可上传商品 → 按 50 条分批 → 顺序提交 → 汇总
// 红线:
// - 批次严格顺序提交，不得并发（进度由已完成批次数决定）
// - 单批失败不中断整体流程，不重试
// - 取消信号仅在批次之间检查
// ==========================================

use crate::domain::product::{CandidateProduct, ProductPayload, BATCH_SIZE};
use crate::domain::upload::{BatchOutcome, UploadFailure, UploadResult};
use crate::upload::error::{IngestResult, UploadError};
use crate::upload::ingest_client::IngestClient;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 传输失败时写入每条商品的通用错误信息
pub const BATCH_FAILURE_MESSAGE: &str = "Batch upload failed";

/// 默认单批超时
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(60);

// ==========================================
// BatchUploadOrchestrator
// ==========================================
pub struct BatchUploadOrchestrator {
    client: Arc<dyn IngestClient>,
    batch_timeout: Duration,
}

impl BatchUploadOrchestrator {
    pub fn new(client: Arc<dyn IngestClient>, batch_timeout: Duration) -> Self {
        Self {
            client,
            batch_timeout,
        }
    }

    pub fn with_default_timeout(client: Arc<dyn IngestClient>) -> Self {
        Self::new(client, DEFAULT_BATCH_TIMEOUT)
    }

    /// 执行批量上传
    ///
    /// # 参数
    /// - candidates: 候选商品（保持原始顺序，内部过滤不可上传项）
    /// - shop_id: 目标店铺
    /// - on_progress: 每批完成后回调百分比（0-100）
    /// - cancel: 可选取消信号，批次之间检查
    ///
    /// # 返回
    /// - Ok(UploadResult): 完整（或取消后的部分）汇总
    /// - Err(MissingTarget / NoEligibleProducts): 前置条件失败，未发起任何网络请求
    #[instrument(
        skip_all,
        fields(run_id = %Uuid::new_v4(), shop_id = %shop_id, candidates = candidates.len())
    )]
    pub async fn run<F>(
        &self,
        candidates: &[CandidateProduct],
        shop_id: &str,
        mut on_progress: F,
        cancel: Option<&CancellationToken>,
    ) -> IngestResult<UploadResult>
    where
        F: FnMut(u32) + Send,
    {
        // === 步骤 1: 前置检查 ===
        let shop_id = shop_id.trim();
        if shop_id.is_empty() {
            warn!("未指定目标店铺，拒绝上传");
            return Err(UploadError::MissingTarget);
        }

        let payloads: Vec<ProductPayload> = candidates
            .iter()
            .filter(|c| c.is_eligible())
            .map(|c| c.to_payload(shop_id))
            .collect();

        if payloads.is_empty() {
            warn!("无可上传商品，拒绝上传");
            return Err(UploadError::NoEligibleProducts);
        }

        // === 步骤 2: 分批 ===
        let batches_total = payloads.len().div_ceil(BATCH_SIZE);
        info!(
            eligible = payloads.len(),
            skipped = candidates.len() - payloads.len(),
            batches_total,
            "开始批量上传"
        );

        let mut result = UploadResult {
            batches_total,
            ..Default::default()
        };

        // === 步骤 3: 顺序提交 ===
        for (index, batch) in payloads.chunks(BATCH_SIZE).enumerate() {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                warn!(
                    batches_completed = result.batches_completed,
                    batches_total, "收到取消信号，停止提交剩余批次"
                );
                result.cancelled = true;
                break;
            }

            let batch_no = index + 1;
            result.total += batch.len();

            match self.submit_with_timeout(batch).await {
                Ok(outcome) => {
                    debug!(
                        batch_no,
                        size = batch.len(),
                        success = outcome.success_count,
                        failures = outcome.failures.len(),
                        "批次完成"
                    );
                    if !outcome.failures.is_empty() {
                        warn!(batch_no, failures = outcome.failures.len(), "批次存在失败商品");
                    }
                    result.success += outcome.success_count;
                    result.failure += outcome.failures.len();
                    result.failures.extend(outcome.failures);
                }
                Err(e) => {
                    error!(batch_no, size = batch.len(), error = %e, "批次提交失败，整批计为失败");
                    result.failure += batch.len();
                    result.failures.extend(synthesize_failures(batch, &e));
                }
            }

            result.batches_completed += 1;
            on_progress(progress_percent(result.batches_completed, batches_total));
        }

        info!(
            total = result.total,
            success = result.success,
            failure = result.failure,
            cancelled = result.cancelled,
            "批量上传结束"
        );

        Ok(result)
    }

    async fn submit_with_timeout(&self, batch: &[ProductPayload]) -> IngestResult<BatchOutcome> {
        match tokio::time::timeout(self.batch_timeout, self.client.submit_batch(batch)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(UploadError::Timeout {
                secs: self.batch_timeout.as_secs(),
            }),
        }
    }
}

/// 进度百分比（向上取整，最后一批必为 100）
///
/// 注意: 取整方式为 ceil 而非四舍五入。3 批时依次为 34、67、100；
/// 7 批时第 1 批为 15（100/7 ≈ 14.29）。
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    ((100 * completed).div_ceil(total)) as u32
}

/// 为整批传输失败生成逐条失败记录
fn synthesize_failures(batch: &[ProductPayload], err: &UploadError) -> Vec<UploadFailure> {
    let message = format!("{}: {}", BATCH_FAILURE_MESSAGE, err);
    batch
        .iter()
        .map(|payload| UploadFailure {
            product: serde_json::to_value(payload)
                .unwrap_or_else(|_| serde_json::Value::String(payload.name.clone())),
            error: message.clone(),
        })
        .collect()
}
