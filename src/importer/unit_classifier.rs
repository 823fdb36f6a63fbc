// ==========================================
// 商品目录导入系统 - 计量单位推断器
// ==========================================
// 红线: 层级判定，不是评分制；命中即返回
// ==========================================
// 层级（顺序执行）:
// 1) 精确匹配   → 100
// 2) 关键词包含 → 90
// 3) 正则模式   → 80
// 4) 兜底 piece → 60
// 同层多单位可命中时，以表的声明顺序为准: kg, gram, liter, ml, pack, piece
// ==========================================

use crate::domain::types::{ConfidenceTier, Unit};
use crate::importer::catalog_importer_trait::UnitClassifier as UnitClassifierTrait;
use once_cell::sync::Lazy;
use regex::Regex;

type UnitTable = [(Unit, &'static [&'static str]); 6];

// ==========================================
// 第 1 层: 精确名称表
// ==========================================
static EXACT_MATCHES: UnitTable = [
    (
        Unit::Kg,
        &[
            "rice", "basmati rice", "brown rice", "sona masoori rice", "onion", "onions",
            "potato", "potatoes", "tomato", "tomatoes", "sugar", "wheat", "atta",
            "wheat flour", "flour", "maida", "sooji", "rava", "besan", "dal", "toor dal",
            "moong dal", "chana dal", "urad dal", "masoor dal", "salt", "apple", "apples",
            "mango", "mangoes", "carrot", "carrots", "cabbage", "cauliflower", "ginger",
            "garlic", "chicken", "mutton", "fish",
        ],
    ),
    (
        Unit::Gram,
        &[
            "cumin seeds", "cumin", "jeera", "mustard seeds", "turmeric", "turmeric powder",
            "chilli powder", "red chilli powder", "coriander powder", "garam masala",
            "black pepper", "cardamom", "cloves", "cinnamon", "tea", "tea powder", "coffee",
            "coffee powder", "butter", "cheese", "paneer", "almonds", "cashews", "raisins",
            "dry fruits",
        ],
    ),
    (
        Unit::Liter,
        &[
            "milk", "toned milk", "water", "mineral water", "oil", "cooking oil",
            "sunflower oil", "mustard oil", "groundnut oil", "coconut oil", "olive oil",
            "ghee", "juice", "orange juice", "buttermilk", "soft drink", "cold drink", "soda",
        ],
    ),
    (
        Unit::Ml,
        &[
            "shampoo", "conditioner", "hand wash", "face wash", "body wash", "lotion",
            "perfume", "hair oil", "sanitizer", "hand sanitizer", "mouthwash", "vinegar",
            "soy sauce",
        ],
    ),
    (
        Unit::Pack,
        &[
            "biscuit", "biscuits", "chips", "noodles", "maggi", "bread", "cookies",
            "namkeen", "cereal", "cornflakes", "oats", "pasta", "tissue", "tissues",
            "napkins", "chocolates",
        ],
    ),
    (
        Unit::Piece,
        &[
            "egg", "eggs", "banana", "bananas", "lemon", "lemons", "coconut", "soap",
            "toothbrush", "candle", "bulb", "pen", "notebook", "battery", "lighter",
            "matchbox",
        ],
    ),
];

// ==========================================
// 第 2 层: 关键词包含表
// ==========================================
static KEYWORD_MATCHES: UnitTable = [
    (
        Unit::Kg,
        &[
            "rice", "flour", "atta", "dal", "sugar", "wheat", "potato", "onion", "tomato",
            "vegetable", "fruit", "meat", "chicken", "mutton", "grain", "millet", "besan",
            "sooji", "rava", "maida",
        ],
    ),
    (
        Unit::Gram,
        &[
            "powder", "masala", "spice", "seeds", "seed", "jeera", "cumin", "pepper",
            "cardamom", "clove", "cinnamon", "saffron", "tea", "coffee", "herb", "almond",
            "cashew", "raisin", "nut",
        ],
    ),
    (
        Unit::Liter,
        &[
            "milk", "oil", "juice", "water", "drink", "beverage", "syrup", "ghee", "lassi",
            "buttermilk", "soda",
        ],
    ),
    (
        Unit::Ml,
        &[
            "shampoo", "conditioner", "lotion", "perfume", "sanitizer", "wash", "cream",
            "serum", "sauce", "vinegar", "spray", "deodorant",
        ],
    ),
    (
        Unit::Pack,
        &[
            "pack", "packet", "biscuit", "chips", "noodle", "bread", "cookie", "snack",
            "namkeen", "cereal", "oats", "pasta", "tissue", "napkin", "chocolate",
        ],
    ),
    (
        Unit::Piece,
        &[
            "egg", "banana", "lemon", "coconut", "soap", "brush", "bulb", "battery",
            "candle", "pencil", "notebook", "bottle",
        ],
    ),
];

// ==========================================
// 第 3 层: 正则模式（自上而下）
// ==========================================
static PATTERN_MATCHES: Lazy<Vec<(Regex, Unit)>> = Lazy::new(|| {
    [
        (
            r"\b(?:\d+(?:\.\d+)?\s*)?(?:kg|kgs|kilo|kilos|kilogram|kilograms)\b",
            Unit::Kg,
        ),
        (
            r"\b(?:\d+(?:\.\d+)?\s*)?(?:g|gm|gms|gram|grams|gramme|grammes)\b",
            Unit::Gram,
        ),
        (
            r"\b(?:\d+(?:\.\d+)?\s*)?(?:l|ltr|ltrs|litre|litres|liter|liters)\b",
            Unit::Liter,
        ),
        (
            r"\b(?:\d+(?:\.\d+)?\s*)?(?:ml|mls|millilitre|millilitres|milliliter|milliliters)\b",
            Unit::Ml,
        ),
        (
            r"\b(?:pack|packs|packet|packets|pkt|pkts|pouch|pouches|sachet|sachets)\b",
            Unit::Pack,
        ),
    ]
    .into_iter()
    .map(|(pattern, unit)| (Regex::new(pattern).expect("Invalid unit pattern"), unit))
    .collect()
});

// ==========================================
// UnitMatch - 推断结果（含可解释原因）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch {
    pub unit: Unit,
    pub tier: ConfidenceTier,
    pub reason: String,
}

// ==========================================
// UnitClassifier - 计量单位推断器
// ==========================================
pub struct UnitClassifier;

impl UnitClassifierTrait for UnitClassifier {
    fn classify_with_tier(&self, name: &str) -> Option<(Unit, ConfidenceTier)> {
        self.evaluate(name).map(|m| (m.unit, m.tier))
    }
}

impl UnitClassifier {
    /// 推断单位并给出命中原因
    ///
    /// # 返回
    /// - None: 名称为空（调用方应视为 piece / 0）
    pub fn evaluate(&self, name: &str) -> Option<UnitMatch> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        // 第 1 层: 精确匹配
        for (unit, names) in EXACT_MATCHES.iter() {
            if names.contains(&normalized.as_str()) {
                return Some(UnitMatch {
                    unit: *unit,
                    tier: ConfidenceTier::Exact,
                    reason: format!("UNIT_RULE_EXACT: name={}", normalized),
                });
            }
        }

        // 第 2 层: 关键词包含（单位外层，关键词内层）
        for (unit, keywords) in KEYWORD_MATCHES.iter() {
            if let Some(keyword) = keywords.iter().find(|k| normalized.contains(**k)) {
                return Some(UnitMatch {
                    unit: *unit,
                    tier: ConfidenceTier::Containment,
                    reason: format!("UNIT_RULE_CONTAINS: keyword={}", keyword),
                });
            }
        }

        // 第 3 层: 正则模式
        for (pattern, unit) in PATTERN_MATCHES.iter() {
            if pattern.is_match(&normalized) {
                return Some(UnitMatch {
                    unit: *unit,
                    tier: ConfidenceTier::Pattern,
                    reason: format!("UNIT_RULE_PATTERN: pattern={}", pattern.as_str()),
                });
            }
        }

        // 第 4 层: 兜底
        Some(UnitMatch {
            unit: Unit::Piece,
            tier: ConfidenceTier::Default,
            reason: "UNIT_RULE_DEFAULT: no rule matched".to_string(),
        })
    }
}
