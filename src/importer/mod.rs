// ==========================================
// 商品目录导入系统 - 导入层
// ==========================================
// 职责: 外部表格数据 → 候选商品
// 支持: Excel、CSV、已解码的二维数组
// ==========================================

// 模块声明
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod column_mapper;
pub mod error;
pub mod file_parser;
pub mod product_validator;
pub mod unit_classifier;

// 重导出核心类型
pub use catalog_importer_impl::CatalogImporterImpl;
pub use column_mapper::ColumnMapper as ColumnMapperImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use product_validator::ProductValidator as ProductValidatorImpl;
pub use unit_classifier::{UnitClassifier as UnitClassifierImpl, UnitMatch};

// 重导出 Trait 接口
pub use catalog_importer_trait::{ColumnMapper, FileParser, ProductValidator, UnitClassifier};
