// ==========================================
// 商品目录导入系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 文件解析 → 列映射 → 单位推断 → 校验
// ==========================================

use crate::domain::product::{ColumnMapping, ProductDraft, RawRow};
use crate::domain::types::{ConfidenceTier, Unit};
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解码（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行（第一行为表头）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 表头 + 数据行，完全空白的行已剔除
    /// - Err: 文件不存在 / 格式错误
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// ColumnMapper Trait
// ==========================================
// 用途: 表头 → 语义列索引（阶段 1）
// 实现者: ColumnMapperImpl
pub trait ColumnMapper: Send + Sync {
    /// 解析表头行
    ///
    /// # 返回
    /// - Ok(ColumnMapping): name/price 必定命中，category 可缺失
    /// - Err(ImportError::MissingColumn): name 或 price 无法识别
    fn map_header(&self, header: &RawRow) -> ImportResult<ColumnMapping>;
}

// ==========================================
// UnitClassifier Trait
// ==========================================
// 用途: 商品名称 → 计量单位（阶段 2）
// 实现者: UnitClassifierImpl
pub trait UnitClassifier: Send + Sync {
    /// 推断计量单位
    ///
    /// # 返回
    /// - (Unit, confidence): confidence ∈ {0, 60, 80, 90, 100}
    fn classify(&self, name: &str) -> (Unit, u8) {
        match self.classify_with_tier(name) {
            Some((unit, tier)) => (unit, tier.confidence()),
            None => (Unit::Piece, 0),
        }
    }

    /// 推断计量单位并返回命中层级
    ///
    /// # 返回
    /// - None: 名称为空
    /// - Some((Unit, ConfidenceTier)): 命中的层级
    fn classify_with_tier(&self, name: &str) -> Option<(Unit, ConfidenceTier)>;
}

// ==========================================
// ProductValidator Trait
// ==========================================
// 用途: 业务规则校验（阶段 3）
// 实现者: ProductValidatorImpl
pub trait ProductValidator: Send + Sync {
    /// 校验候选商品
    ///
    /// # 返回
    /// - Vec<String>: 全部违规信息（规则不短路，顺序固定）
    fn validate(&self, draft: &ProductDraft) -> Vec<String>;
}
