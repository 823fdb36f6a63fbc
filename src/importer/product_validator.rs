// ==========================================
// 商品目录导入系统 - 商品校验器实现
// ==========================================
// 职责: 业务规则校验，收集全部违规（不短路）
// 输出: 违规信息按规则声明顺序排列
// ==========================================

use crate::domain::product::ProductDraft;
use crate::importer::catalog_importer_trait::ProductValidator as ProductValidatorTrait;

pub const NAME_REQUIRED_ERROR: &str = "Product name is required (minimum 2 characters)";
pub const PRICE_REQUIRED_ERROR: &str = "Valid price is required (must be greater than 0)";
pub const NAME_TOO_LONG_ERROR: &str = "Product name cannot exceed 100 characters";

/// 名称最短字符数
pub const NAME_MIN_CHARS: usize = 2;

/// 名称最长字符数
pub const NAME_MAX_CHARS: usize = 100;

pub struct ProductValidator;

impl ProductValidatorTrait for ProductValidator {
    fn validate(&self, draft: &ProductDraft) -> Vec<String> {
        let mut errors = Vec::new();
        let name_chars = draft.name.as_deref().map(|n| n.chars().count());

        // 规则 1: 名称必填且不少于 2 个字符
        if name_chars.map_or(true, |len| len < NAME_MIN_CHARS) {
            errors.push(NAME_REQUIRED_ERROR.to_string());
        }

        // 规则 2: 价格必填且大于 0
        if draft.price.map_or(true, |price| price.is_nan() || price <= 0.0) {
            errors.push(PRICE_REQUIRED_ERROR.to_string());
        }

        // 规则 3: 名称不超过 100 个字符
        if name_chars.is_some_and(|len| len > NAME_MAX_CHARS) {
            errors.push(NAME_TOO_LONG_ERROR.to_string());
        }

        errors
    }
}
