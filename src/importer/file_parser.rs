// ==========================================
// 商品目录导入系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（表头 + 数据行）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::product::RawRow;
use crate::domain::types::CellValue;
use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
// CSV 单元格一律为文本，数值解析留给行处理阶段
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 表头作为第一行返回，不交给 csv 处理
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = record
                .iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(value.to_string())
                    }
                })
                .collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|cells| cells.iter().map(cell_to_value).collect::<RawRow>())
            .filter(|row| !row.iter().all(CellValue::is_blank))
            .collect();

        Ok(rows)
    }
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
