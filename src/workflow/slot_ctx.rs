//! 题目获取上下文
//!
//! 封装"我正在获取哪一年的第几题"这一信息

use crate::models::Language;
use crate::services::variant_resolver::{resolve_slot_id, VariantPolicy};
use std::fmt::Display;

/// 题目获取上下文
#[derive(Debug, Clone)]
pub struct SlotCtx {
    /// 试卷年份
    pub year: u16,

    /// 题号（从1开始）
    pub slot: u16,

    /// 用户选择的外语
    pub language: Option<Language>,

    /// 请求用的题目标识，如 "3" 或 "3-ingles"
    pub slot_id: String,
}

impl SlotCtx {
    /// 创建新的上下文，同时解析题目标识
    pub fn new(year: u16, slot: u16, language: Option<Language>) -> Self {
        Self {
            year,
            slot,
            language,
            slot_id: resolve_slot_id(year, slot, language),
        }
    }

    /// 该题是否为外语题（只有外语题才带上语言标记）
    pub fn variant_language(&self) -> Option<Language> {
        self.language
            .filter(|_| VariantPolicy::is_variant_slot(self.year, self.slot))
    }
}

impl Display for SlotCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} 年 第 {} 题 #{}]", self.year, self.slot, self.slot_id)
    }
}
