// ==========================================
// 商品目录导入系统 - 核心库
// ==========================================
// 流程: 表格行 → 候选商品（列映射 / 单位推断 / 校验）→ 分批上传 → 汇总
// 技术栈: Rust + tokio + reqwest + SQLite（配置）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 表格数据
pub mod importer;

// 上传层 - 目录服务
pub mod upload;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CellValue, ConfidenceTier, Unit};

// 领域实体
pub use domain::{
    CandidateProduct, ColumnMapping, ImportPreview, ProductPayload, RawRow, UploadFailure,
    UploadResult, UploadSummary,
};

// 导入与上传
pub use importer::{CatalogImporterImpl, ImportError};
pub use upload::{BatchUploadOrchestrator, IngestClient, ResultAggregator, UploadError};

// API
pub use api::{ApiError, CatalogImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品目录导入系统";
