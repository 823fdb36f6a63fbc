// ==========================================
// 商品目录导入系统 - 领域模型层
// ==========================================
// 职责: 定义导入流程中的实体与类型
// 红线: 不含 I/O，不含网络逻辑
// ==========================================

pub mod product;
pub mod types;
pub mod upload;

// 重导出核心类型
pub use product::{
    CandidateProduct, ColumnMapping, ImportPreview, ProductDraft, ProductPayload, RawRow,
    BATCH_SIZE, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, DEFAULT_STOCK_QUANTITY, DEFAULT_TAGS,
};
pub use types::{CellValue, ConfidenceTier, Unit};
pub use upload::{BatchOutcome, UploadFailure, UploadResult, UploadSummary};
