// ==========================================
// 商品目录导入系统 - 上传模块错误类型
// ==========================================
// 分类:
// - 前置条件错误: 网络调用前直接返回给调用方
// - 传输错误: 仅在单批内部出现，由编排器转换为逐条失败记录
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    // ===== 前置条件错误 =====
    #[error("没有可上传的有效商品")]
    NoEligibleProducts,

    #[error("未指定上传目标店铺")]
    MissingTarget,

    // ===== 传输错误 =====
    #[error("网络请求失败: {0}")]
    Transport(String),

    #[error("服务端返回异常状态 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("服务端拒绝批次: {0}")]
    Rejected(String),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("批次上传超时（{secs} 秒）")]
    Timeout { secs: u64 },
}

impl UploadError {
    /// 是否为前置条件错误（致命）
    pub fn is_precondition(&self) -> bool {
        matches!(self, UploadError::NoEligibleProducts | UploadError::MissingTarget)
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UploadError::InvalidResponse(err.to_string())
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

/// Result 类型别名
pub type IngestResult<T> = Result<T, UploadError>;
