// ==========================================
// 商品目录导入系统 - 目录服务批量写入客户端
// ==========================================
// 契约:
// - 请求: POST { products: [ <载荷>, ... ] }（≤ 50 条）
// - 成功: { success: true, data: { successCount, failures?: [{product, error}] } }
// - 非 2xx / 网络错误 / success=false: 整批失败
// ==========================================

use crate::domain::product::ProductPayload;
use crate::domain::upload::{BatchOutcome, UploadFailure};
use crate::upload::error::{IngestResult, UploadError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// ==========================================
// IngestClient Trait
// ==========================================
// 实现者: HttpIngestClient（测试中可替换为脚本化客户端）
#[async_trait]
pub trait IngestClient: Send + Sync {
    /// 提交单个批次
    ///
    /// # 返回
    /// - Ok(BatchOutcome): 服务端受理（可能含逐条失败）
    /// - Err(UploadError): 整批传输失败
    async fn submit_batch(&self, products: &[ProductPayload]) -> IngestResult<BatchOutcome>;
}

// ==========================================
// 线上格式
// ==========================================
#[derive(Debug, Serialize)]
struct IngestRequest<'a> {
    products: &'a [ProductPayload],
}

#[derive(Debug, Deserialize)]
struct IngestResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<IngestResponseData>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngestResponseData {
    #[serde(default)]
    success_count: Option<usize>,
    #[serde(default)]
    failures: Option<Vec<IngestFailureEntry>>,
}

/// 服务端逐条失败记录（字段缺失或类型不符时仍按条目计入失败）
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngestFailureEntry {
    Detailed {
        #[serde(default)]
        product: serde_json::Value,
        #[serde(default)]
        error: serde_json::Value,
        #[serde(default)]
        message: serde_json::Value,
    },
    // 非对象条目: 整体视为 product
    Bare(serde_json::Value),
}

/// 失败条目未给出原因时的默认文案
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown error";

impl From<IngestFailureEntry> for UploadFailure {
    fn from(entry: IngestFailureEntry) -> Self {
        match entry {
            IngestFailureEntry::Detailed {
                product,
                error,
                message,
            } => UploadFailure {
                product,
                // 优先 error，其次 message
                error: reason_text(error)
                    .or_else(|| reason_text(message))
                    .unwrap_or_else(|| UNKNOWN_FAILURE_MESSAGE.to_string()),
            },
            IngestFailureEntry::Bare(product) => UploadFailure {
                product,
                error: UNKNOWN_FAILURE_MESSAGE.to_string(),
            },
        }
    }
}

fn reason_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ==========================================
// HttpIngestClient - reqwest 实现
// ==========================================
pub struct HttpIngestClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIngestClient {
    /// 创建客户端
    ///
    /// # 参数
    /// - endpoint: 批量写入接口完整 URL
    /// - timeout: 单次请求超时
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> IngestResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Transport(format!("HTTP 客户端创建失败: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IngestClient for HttpIngestClient {
    async fn submit_batch(&self, products: &[ProductPayload]) -> IngestResult<BatchOutcome> {
        debug!(endpoint = %self.endpoint, count = products.len(), "提交批次");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&IngestRequest { products })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret_response(status, &body, products.len())
    }
}

/// 解释服务端响应
///
/// # 规则
/// - 非 2xx → HttpStatus
/// - 无法解析 → InvalidResponse
/// - success=false → Rejected
/// - successCount 缺失 → 视为整批成功
/// - 失败条目缺 product / error → 仍计为该条失败（product 为 null，原因取 message 或默认文案）
pub fn interpret_response(status: u16, body: &str, batch_len: usize) -> IngestResult<BatchOutcome> {
    if !(200..300).contains(&status) {
        return Err(UploadError::HttpStatus {
            status,
            body: truncate(body, 200),
        });
    }

    let parsed: IngestResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

    if !parsed.success {
        let reason = parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| "success=false".to_string());
        return Err(UploadError::Rejected(reason));
    }

    let data = parsed.data.unwrap_or(IngestResponseData {
        success_count: None,
        failures: None,
    });

    Ok(BatchOutcome {
        success_count: data.success_count.unwrap_or(batch_len),
        failures: data
            .failures
            .unwrap_or_default()
            .into_iter()
            .map(UploadFailure::from)
            .collect(),
    })
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let mut s: String = body.chars().take(max_chars).collect();
        s.push('…');
        s
    }
}
