// ==========================================
// 商品目录导入系统 - 行处理管道实现
// ==========================================
// 职责: 整合导入流程，从原始行到候选商品
// 流程: 行数检查 → 表头映射 → 逐行取值 → 单位推断 → 校验
// 红线: 纯计算，无网络 / 无随机 / 无时间依赖（同输入同输出）
// ==========================================

use crate::domain::product::{
    CandidateProduct, ColumnMapping, ImportPreview, ProductDraft, RawRow, DEFAULT_CATEGORY,
};
use crate::domain::types::CellValue;
use crate::importer::catalog_importer_trait::{
    ColumnMapper, FileParser, ProductValidator, UnitClassifier,
};
use crate::importer::column_mapper::ColumnMapper as ColumnMapperImpl;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::product_validator::ProductValidator as ProductValidatorImpl;
use crate::importer::unit_classifier::UnitClassifier as UnitClassifierImpl;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// CatalogImporterImpl - 行处理管道
// ==========================================
pub struct CatalogImporterImpl {
    file_parser: Box<dyn FileParser>,
    column_mapper: Box<dyn ColumnMapper>,
    unit_classifier: Box<dyn UnitClassifier>,
    product_validator: Box<dyn ProductValidator>,
}

impl CatalogImporterImpl {
    /// 使用自定义组件创建
    pub fn new(
        file_parser: Box<dyn FileParser>,
        column_mapper: Box<dyn ColumnMapper>,
        unit_classifier: Box<dyn UnitClassifier>,
        product_validator: Box<dyn ProductValidator>,
    ) -> Self {
        Self {
            file_parser,
            column_mapper,
            unit_classifier,
            product_validator,
        }
    }

    /// 从文件生成导入预览
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn preview_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportPreview> {
        let rows = self.file_parser.parse_to_rows(file_path.as_ref())?;
        info!(total_rows = rows.len(), "文件解析完成");
        self.preview_rows(&rows)
    }

    /// 从原始行生成导入预览
    ///
    /// # 返回
    /// - Ok(ImportPreview): 候选商品（保持原始行顺序）+ 跳过行数
    /// - Err(InsufficientData): 行数 < 2
    /// - Err(MissingColumn): 缺少 name / price 列
    pub fn preview_rows(&self, rows: &[RawRow]) -> ImportResult<ImportPreview> {
        // === 步骤 1: 行数检查 ===
        if rows.len() < 2 {
            warn!(rows = rows.len(), "数据行不足，拒绝导入");
            return Err(ImportError::InsufficientData { rows: rows.len() });
        }

        // === 步骤 2: 表头映射 ===
        let mapping = self.column_mapper.map_header(&rows[0])?;

        // === 步骤 3: 逐行处理 ===
        let mut candidates = Vec::with_capacity(rows.len() - 1);
        let mut skipped_rows = 0;
        for (idx, row) in rows.iter().enumerate().skip(1) {
            // 文件行号（表头为第 1 行）
            let row_number = idx + 1;
            match self.process_row(row, &mapping, row_number) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    debug!(row_number, "名称为空，跳过");
                    skipped_rows += 1;
                }
            }
        }

        let preview = ImportPreview {
            mapping,
            candidates,
            skipped_rows,
        };

        info!(
            candidates = preview.candidates.len(),
            eligible = preview.eligible_count(),
            invalid = preview.invalid_count(),
            skipped = skipped_rows,
            "行处理完成"
        );

        Ok(preview)
    }

    /// 单行处理（名称为空返回 None）
    fn process_row(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        row_number: usize,
    ) -> Option<CandidateProduct> {
        let name = cell_at(row, Some(mapping.name_index)).as_text().trim().to_string();
        if name.is_empty() {
            return None;
        }

        let price = cell_at(row, Some(mapping.price_index)).to_price();

        let category = match cell_at(row, mapping.category_index).as_text().trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            value => value.to_string(),
        };

        let (unit, unit_confidence) = self.unit_classifier.classify(&name);

        let errors = self.product_validator.validate(&ProductDraft {
            name: Some(name.clone()),
            price: Some(price),
            category: Some(category.clone()),
        });

        if !errors.is_empty() {
            debug!(row_number, errors = ?errors, "行校验未通过");
        }

        Some(CandidateProduct::new(
            name,
            price,
            category,
            unit,
            unit_confidence,
            errors,
            row_number,
        ))
    }
}

impl Default for CatalogImporterImpl {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(ColumnMapperImpl),
            Box::new(UnitClassifierImpl),
            Box::new(ProductValidatorImpl),
        )
    }
}

/// 读取单元格（越界或无此列视为空）
fn cell_at(row: &RawRow, index: Option<usize>) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    index.and_then(|i| row.get(i)).unwrap_or(&EMPTY)
}
