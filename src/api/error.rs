// ==========================================
// 商品目录导入系统 - API层错误类型
// ==========================================
// 职责: 汇总导入层 / 上传层 / 配置层错误，供调用方统一处理
// 所有错误信息必须包含显式原因
// ==========================================

use crate::importer::error::ImportError;
use crate::upload::error::UploadError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 导入错误（表头 / 行数 / 文件）
    // ==========================================
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // 上传前置条件错误
    // ==========================================
    #[error("上传失败: {0}")]
    Upload(#[from] UploadError),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 面向用户的简短提示（替代弹窗文案）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Import(ImportError::MissingColumn(column)) => format!(
                "Could not find a '{}' column. Please check your file headers.",
                column
            ),
            ApiError::Import(ImportError::InsufficientData { .. }) => {
                "The file needs a header row and at least one data row.".to_string()
            }
            ApiError::Upload(UploadError::NoEligibleProducts) => {
                "No valid products to upload.".to_string()
            }
            ApiError::Upload(UploadError::MissingTarget) => {
                "No shop selected for upload.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_preconditions() {
        let err = ApiError::from(ImportError::MissingColumn("price".to_string()));
        assert!(err.user_message().contains("'price'"));

        let err = ApiError::from(UploadError::NoEligibleProducts);
        assert_eq!(err.user_message(), "No valid products to upload.");

        let err = ApiError::ConfigError("db locked".to_string());
        assert_eq!(err.user_message(), "配置读取失败: db locked");
    }
}
