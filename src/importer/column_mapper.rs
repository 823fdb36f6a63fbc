// ==========================================
// 商品目录导入系统 - 列映射器实现
// ==========================================
// 职责: 表头归一化（小写 + TRIM）→ name/price/category 列索引
// 规则: 别名按优先级外层遍历，表头按从左到右内层遍历，包含即命中
// ==========================================

use crate::domain::product::{ColumnMapping, RawRow};
use crate::importer::catalog_importer_trait::ColumnMapper as ColumnMapperTrait;
use crate::importer::error::{ImportError, ImportResult};
use tracing::debug;

/// 名称列别名（按优先级）
pub const NAME_ALIASES: [&str; 4] = ["name", "product name", "product", "item"];

/// 价格列别名（按优先级）
pub const PRICE_ALIASES: [&str; 5] = ["price", "mrp", "cost", "rate", "amount"];

/// 分类列别名（按优先级）
pub const CATEGORY_ALIASES: [&str; 4] = ["category", "type", "group", "department"];

pub struct ColumnMapper;

impl ColumnMapperTrait for ColumnMapper {
    fn map_header(&self, header: &RawRow) -> ImportResult<ColumnMapping> {
        let normalized: Vec<String> = header
            .iter()
            .map(|cell| cell.as_text().trim().to_lowercase())
            .collect();

        let name_index = find_column(&normalized, &NAME_ALIASES)
            .ok_or_else(|| ImportError::MissingColumn("name".to_string()))?;
        let price_index = find_column(&normalized, &PRICE_ALIASES)
            .ok_or_else(|| ImportError::MissingColumn("price".to_string()))?;
        let category_index = find_column(&normalized, &CATEGORY_ALIASES);

        debug!(
            name_index,
            price_index,
            category_index = ?category_index,
            "表头映射完成"
        );

        Ok(ColumnMapping {
            name_index,
            price_index,
            category_index,
        })
    }
}

/// 查找第一个包含任一别名的表头
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h.contains(alias)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn header(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    #[test]
    fn test_map_header_basic() {
        let mapping = ColumnMapper
            .map_header(&header(&["Name", "Price", "Category"]))
            .unwrap();

        assert_eq!(mapping.name_index, 0);
        assert_eq!(mapping.price_index, 1);
        assert_eq!(mapping.category_index, Some(2));
    }

    #[test]
    fn test_map_header_trim_and_case() {
        let mapping = ColumnMapper
            .map_header(&header(&["  MRP (INR) ", " Item Description", "SKU"]))
            .unwrap();

        assert_eq!(mapping.name_index, 1);
        assert_eq!(mapping.price_index, 0);
        assert_eq!(mapping.category_index, None);
    }

    #[test]
    fn test_alias_priority_beats_column_order() {
        // "product" 出现在左侧，但 "name" 优先级更高
        let mapping = ColumnMapper
            .map_header(&header(&["Product Code", "Display Name", "Cost", "Price"]))
            .unwrap();

        assert_eq!(mapping.name_index, 1);
        assert_eq!(mapping.price_index, 3);
    }

    #[test]
    fn test_leftmost_header_wins_for_same_alias() {
        let mapping = ColumnMapper
            .map_header(&header(&["Name", "Brand Name", "Price"]))
            .unwrap();

        assert_eq!(mapping.name_index, 0);
    }

    #[test]
    fn test_missing_name_column() {
        let err = ColumnMapper
            .map_header(&header(&["Title", "Price"]))
            .unwrap_err();

        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "name"));
    }

    #[test]
    fn test_missing_price_column() {
        let err = ColumnMapper
            .map_header(&header(&["Name", "Category"]))
            .unwrap_err();

        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "price"));
    }

    #[test]
    fn test_numeric_and_empty_header_cells() {
        let row = vec![
            CellValue::Number(2024.0),
            CellValue::Empty,
            CellValue::from("name"),
            CellValue::from("rate"),
        ];
        let mapping = ColumnMapper.map_header(&row).unwrap();

        assert_eq!(mapping.name_index, 2);
        assert_eq!(mapping.price_index, 3);
    }
}
