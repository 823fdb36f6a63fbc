// ==========================================
// 商品目录导入系统 - 上传结果汇总
// ==========================================
// 展示策略: 计数原样保留，失败列表只展示前 N 条
// 原始 UploadResult.failures 不做截断
// ==========================================

use crate::domain::upload::{UploadResult, UploadSummary};
use chrono::Utc;

/// 默认展示的失败条数
pub const DEFAULT_FAILURE_SAMPLE_LIMIT: usize = 10;

pub struct ResultAggregator {
    sample_limit: usize,
}

impl ResultAggregator {
    pub fn new(sample_limit: usize) -> Self {
        Self { sample_limit }
    }

    pub fn sample_limit(&self) -> usize {
        self.sample_limit
    }

    /// 生成展示用汇总
    pub fn summarize(&self, result: &UploadResult) -> UploadSummary {
        UploadSummary {
            total: result.total,
            success: result.success,
            failure: result.failure,
            failures_shown: result
                .failures
                .iter()
                .take(self.sample_limit)
                .cloned()
                .collect(),
            remaining_failures: result.failures.len().saturating_sub(self.sample_limit),
            cancelled: result.cancelled,
            completed_at: Utc::now(),
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_SAMPLE_LIMIT)
    }
}
