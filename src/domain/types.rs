// ==========================================
// 商品目录导入系统 - 领域类型定义
// ==========================================
// 职责: 单元格值、计量单位、置信度层级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单元格值 (Cell Value)
// ==========================================
// 来源: 文件解码方（Excel/CSV/JSON）输出的未定型单元格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// 转为文本（整数值不带 ".0"）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// 去除首尾空白后是否为空
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Empty => true,
            _ => false,
        }
    }

    /// 宽松解析数值
    ///
    /// # 规则
    /// - Number: 原值（非有限值 → 0）
    /// - Text: 取最长的数字前缀（"120abc" → 120，"abc" → 0）
    /// - Bool / Empty: 0
    pub fn to_price(&self) -> f64 {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_leading_number(s).unwrap_or(0.0),
            CellValue::Bool(_) | CellValue::Empty => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 解析字符串开头的十进制数（可选符号/小数/指数）
fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部分必须完整才纳入
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

// ==========================================
// 计量单位 (Unit)
// ==========================================
// 合法词表共 11 个；推断器只会输出 kg/gram/liter/ml/pack/piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Piece,
    Kg,
    Gram,
    Liter,
    Ml,
    Dozen,
    Pack,
    Box,
    Bottle,
    Can,
    Strip,
}

impl Unit {
    /// 完整词表（顺序与服务端约定一致）
    pub const VOCABULARY: [Unit; 11] = [
        Unit::Piece,
        Unit::Kg,
        Unit::Gram,
        Unit::Liter,
        Unit::Ml,
        Unit::Dozen,
        Unit::Pack,
        Unit::Box,
        Unit::Bottle,
        Unit::Can,
        Unit::Strip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Piece => "piece",
            Unit::Kg => "kg",
            Unit::Gram => "gram",
            Unit::Liter => "liter",
            Unit::Ml => "ml",
            Unit::Dozen => "dozen",
            Unit::Pack => "pack",
            Unit::Box => "box",
            Unit::Bottle => "bottle",
            Unit::Can => "can",
            Unit::Strip => "strip",
        }
    }

    pub fn parse(value: &str) -> Option<Unit> {
        let needle = value.trim().to_lowercase();
        Self::VOCABULARY
            .iter()
            .copied()
            .find(|unit| unit.as_str() == needle)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 置信度层级 (Confidence Tier)
// ==========================================
// 规则: 层级按固定顺序判定，命中即返回，不做评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    Exact,       // 精确匹配
    Containment, // 关键词包含
    Pattern,     // 正则模式
    Default,     // 兜底
}

impl ConfidenceTier {
    pub fn confidence(&self) -> u8 {
        match self {
            ConfidenceTier::Exact => 100,
            ConfidenceTier::Containment => 90,
            ConfidenceTier::Pattern => 80,
            ConfidenceTier::Default => 60,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::Exact => write!(f, "EXACT"),
            ConfidenceTier::Containment => write!(f, "CONTAINMENT"),
            ConfidenceTier::Pattern => write!(f, "PATTERN"),
            ConfidenceTier::Default => write!(f, "DEFAULT"),
        }
    }
}
