//! 外语题号解析 - 业务能力层
//!
//! 根据年份决定哪些题号存在外语版本，并生成请求用的题目标识。
//! 纯计算，不做任何 I/O。

use crate::models::Language;
use std::ops::RangeInclusive;

/// 自该年起外语题位于 1-5 题
pub const MODERN_VARIANT_FROM: u16 = 2017;
/// 自该年起试卷包含外语题（2010-2016 位于 91-95 题）
pub const LEGACY_VARIANT_FROM: u16 = 2010;
/// 默认：必须先选择外语才能加载的最后一年
pub const DEFAULT_LANGUAGE_REQUIRED_UNTIL: u16 = 2023;

/// 按年份的外语题策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantPolicy {
    /// [2010, language_required_until] 内的年份必须先选外语
    pub language_required_until: u16,
}

impl Default for VariantPolicy {
    fn default() -> Self {
        Self {
            language_required_until: DEFAULT_LANGUAGE_REQUIRED_UNTIL,
        }
    }
}

impl VariantPolicy {
    pub fn new(language_required_until: u16) -> Self {
        Self {
            language_required_until,
        }
    }

    /// 该年份的外语题范围，2010 年之前没有外语题
    pub fn variant_range(year: u16) -> Option<RangeInclusive<u16>> {
        if year >= MODERN_VARIANT_FROM {
            Some(1..=5)
        } else if year >= LEGACY_VARIANT_FROM {
            Some(91..=95)
        } else {
            None
        }
    }

    pub fn is_variant_slot(year: u16, slot: u16) -> bool {
        Self::variant_range(year).is_some_and(|range| range.contains(&slot))
    }

    /// 该年份是否必须先选择外语才能开始加载
    pub fn requires_language(&self, year: u16) -> bool {
        (LEGACY_VARIANT_FROM..=self.language_required_until).contains(&year)
    }

    /// 该年份是否提供外语选择
    pub fn offers_language(&self, year: u16) -> bool {
        year >= LEGACY_VARIANT_FROM
    }
}

/// 计算题目标识：外语题且已选外语时为 `"{slot}-{language}"`，否则为 `"{slot}"`
pub fn resolve_slot_id(year: u16, slot: u16, language: Option<Language>) -> String {
    match language {
        Some(language) if VariantPolicy::is_variant_slot(year, slot) => {
            format!("{}-{}", slot, language.slug())
        }
        _ => slot.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suffix_before_2010() {
        for year in 1998..LEGACY_VARIANT_FROM {
            for slot in 1..=180 {
                for language in [None, Some(Language::English), Some(Language::Spanish)] {
                    assert_eq!(resolve_slot_id(year, slot, language), slot.to_string());
                }
            }
        }
    }

    #[test]
    fn test_modern_years_use_first_five_slots() {
        for year in MODERN_VARIANT_FROM..=2026 {
            for slot in 1..=5 {
                assert_eq!(
                    resolve_slot_id(year, slot, Some(Language::English)),
                    format!("{}-ingles", slot)
                );
            }
            for slot in 6..=180 {
                assert_eq!(
                    resolve_slot_id(year, slot, Some(Language::Spanish)),
                    slot.to_string()
                );
            }
        }
    }

    #[test]
    fn test_legacy_years_use_slots_91_to_95() {
        for year in LEGACY_VARIANT_FROM..MODERN_VARIANT_FROM {
            assert_eq!(resolve_slot_id(year, 1, Some(Language::Spanish)), "1");
            assert_eq!(resolve_slot_id(year, 90, Some(Language::Spanish)), "90");
            for slot in 91..=95 {
                assert_eq!(
                    resolve_slot_id(year, slot, Some(Language::Spanish)),
                    format!("{}-espanhol", slot)
                );
            }
            assert_eq!(resolve_slot_id(year, 96, Some(Language::Spanish)), "96");
        }
    }

    #[test]
    fn test_variant_slot_without_language() {
        assert_eq!(resolve_slot_id(2020, 3, None), "3");
        assert_eq!(resolve_slot_id(2012, 93, None), "93");
    }

    #[test]
    fn test_language_gate_is_configurable() {
        let policy = VariantPolicy::default();
        assert!(!policy.requires_language(2009));
        assert!(policy.requires_language(2010));
        assert!(policy.requires_language(2023));
        assert!(!policy.requires_language(2024));

        let extended = VariantPolicy::new(2026);
        assert!(extended.requires_language(2024));
        assert!(extended.offers_language(2024));
        assert!(!extended.offers_language(2009));
    }
}
