// ==========================================
// 商品目录导入系统 - 上传结果模型
// ==========================================
// 职责: 单批结果 / 整体上传结果 / 展示用汇总
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// UploadFailure - 单条失败记录
// ==========================================
// product: 服务端返回的原值；传输失败时为本地载荷的 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFailure {
    pub product: serde_json::Value,
    pub error: String,
}

impl UploadFailure {
    /// 展示用商品标识（优先取 name 字段）
    pub fn product_label(&self) -> String {
        match &self.product {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(map) => match map.get("name") {
                Some(serde_json::Value::String(name)) => name.clone(),
                Some(other) => other.to_string(),
                None => self.product.to_string(),
            },
            other => other.to_string(),
        }
    }
}

// ==========================================
// BatchOutcome - 单批成功响应
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failures: Vec<UploadFailure>,
}

// ==========================================
// UploadResult - 整体上传结果
// ==========================================
// 不变量: success + failure == total（服务端计数自洽时）
// total 仅统计实际提交过的商品（取消后未提交的批次不计入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    pub failures: Vec<UploadFailure>,

    // 运行信息
    pub batches_total: usize,
    pub batches_completed: usize,
    pub cancelled: bool,
}

// ==========================================
// UploadSummary - 展示用汇总
// ==========================================
// failures_shown 仅为展示截断，UploadResult.failures 保持完整
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    pub failures_shown: Vec<UploadFailure>,
    pub remaining_failures: usize,
    pub cancelled: bool,
    pub completed_at: DateTime<Utc>,
}
