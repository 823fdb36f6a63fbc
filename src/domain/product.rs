// ==========================================
// 商品目录导入系统 - 商品领域模型
// ==========================================
// 职责: 原始行 / 列映射 / 候选商品 / 上传载荷
// 生命周期: 仅在一次导入流程内，不落库
// ==========================================

use crate::domain::types::{CellValue, Unit};
use serde::{Deserialize, Serialize};

// ==========================================
// 约定常量（与目录服务契约一致，不可配置）
// ==========================================

/// 单批最大商品数
pub const BATCH_SIZE: usize = 50;

/// 默认库存数量
pub const DEFAULT_STOCK_QUANTITY: u32 = 1000;

/// 默认标签
pub const DEFAULT_TAGS: [&str; 1] = ["Fresh"];

/// 默认描述
pub const DEFAULT_DESCRIPTION: &str = ".";

/// 缺失分类列时的默认分类
pub const DEFAULT_CATEGORY: &str = "General Items";

/// 原始行：单元格按列顺序排列
pub type RawRow = Vec<CellValue>;

// ==========================================
// ColumnMapping - 语义列索引
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub name_index: usize,
    pub price_index: usize,
    pub category_index: Option<usize>, // None → DEFAULT_CATEGORY
}

// ==========================================
// ProductDraft - 校验器输入
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

// ==========================================
// CandidateProduct - 候选商品
// ==========================================
// 不变量: is_valid == (name 非空 && price > 0)
// errors 由校验器独立计算，is_valid 为 true 时也可能非空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProduct {
    pub name: String,
    pub price: f64,
    pub original_price: f64,
    pub discount: f64,
    pub category: String,
    pub description: String,
    pub stock_quantity: u32,
    pub in_stock: bool,
    pub tags: Vec<String>,
    pub unit: Unit,
    pub unit_confidence: u8,
    pub is_valid: bool,
    pub errors: Vec<String>,

    // 元信息
    #[serde(skip)]
    pub row_number: usize, // 原始文件行号（表头为第 1 行）
}

impl CandidateProduct {
    /// 按默认值创建候选商品
    pub fn new(
        name: String,
        price: f64,
        category: String,
        unit: Unit,
        unit_confidence: u8,
        errors: Vec<String>,
        row_number: usize,
    ) -> Self {
        let is_valid = !name.is_empty() && price > 0.0;
        Self {
            name,
            price,
            original_price: price,
            discount: 0.0,
            category,
            description: DEFAULT_DESCRIPTION.to_string(),
            stock_quantity: DEFAULT_STOCK_QUANTITY,
            in_stock: true,
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            unit,
            unit_confidence,
            is_valid,
            errors,
            row_number,
        }
    }

    /// 是否可上传（is_valid 且无校验错误）
    pub fn is_eligible(&self) -> bool {
        self.is_valid && self.errors.is_empty()
    }

    /// 转换为上传载荷
    pub fn to_payload(&self, shop_id: &str) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            stock_quantity: self.stock_quantity,
            in_stock: self.in_stock,
            unit: self.unit,
            tags: self.tags.clone(),
            shop_id: shop_id.to_string(),
        }
    }
}

// ==========================================
// ProductPayload - 上传载荷（线上格式）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub original_price: f64,
    pub discount: f64,
    pub stock_quantity: u32,
    pub in_stock: bool,
    pub unit: Unit,
    pub tags: Vec<String>,
    pub shop_id: String,
}

// ==========================================
// ImportPreview - 行处理结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub mapping: ColumnMapping,
    pub candidates: Vec<CandidateProduct>,
    pub skipped_rows: usize, // 名称为空而丢弃的数据行
}

impl ImportPreview {
    pub fn eligible(&self) -> impl Iterator<Item = &CandidateProduct> {
        self.candidates.iter().filter(|c| c.is_eligible())
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    pub fn invalid_count(&self) -> usize {
        self.candidates.len() - self.eligible_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_defaults() {
        let c = CandidateProduct::new(
            "Rice".to_string(),
            120.0,
            "Grains".to_string(),
            Unit::Kg,
            100,
            vec![],
            2,
        );

        assert_eq!(c.original_price, 120.0);
        assert_eq!(c.discount, 0.0);
        assert_eq!(c.description, ".");
        assert_eq!(c.stock_quantity, 1000);
        assert!(c.in_stock);
        assert_eq!(c.tags, vec!["Fresh".to_string()]);
        assert!(c.is_valid);
        assert!(c.is_eligible());
    }

    #[test]
    fn test_valid_but_not_eligible() {
        // 单字符名称: is_valid 为真，但校验器报错
        let c = CandidateProduct::new(
            "X".to_string(),
            10.0,
            DEFAULT_CATEGORY.to_string(),
            Unit::Piece,
            60,
            vec!["Product name is required (minimum 2 characters)".to_string()],
            3,
        );

        assert!(c.is_valid);
        assert!(!c.is_eligible());
    }

    #[test]
    fn test_payload_wire_format() {
        let c = CandidateProduct::new(
            "Milk".to_string(),
            30.0,
            "Dairy".to_string(),
            Unit::Liter,
            100,
            vec![],
            2,
        );
        let json = serde_json::to_value(c.to_payload("shop-1")).unwrap();

        assert_eq!(json["originalPrice"], 30.0);
        assert_eq!(json["stockQuantity"], 1000);
        assert_eq!(json["inStock"], true);
        assert_eq!(json["unit"], "liter");
        assert_eq!(json["shopId"], "shop-1");
        assert_eq!(json["tags"][0], "Fresh");
    }
}
