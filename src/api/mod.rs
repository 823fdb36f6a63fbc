// ==========================================
// 商品目录导入系统 - API 层
// ==========================================
// 职责: 提供导入与上传的业务接口，供 CLI 调用
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{get_default_db_path, CatalogImportApi, UploadReport};
