use serde::{Deserialize, Serialize};

/// 外语枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// 英语
    #[serde(rename = "ingles")]
    English,
    /// 西班牙语
    #[serde(rename = "espanhol")]
    Spanish,
}

impl Language {
    /// 全部可选外语
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// 获取题目编号后缀使用的标识
    pub fn slug(self) -> &'static str {
        match self {
            Language::English => "ingles",
            Language::Spanish => "espanhol",
        }
    }

    /// 获取展示名称
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "Inglês",
            Language::Spanish => "Espanhol",
        }
    }

    /// 从标识解析（精确匹配）
    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "ingles" => Some(Language::English),
            "espanhol" => Some(Language::Spanish),
            _ => None,
        }
    }

    /// 宽松解析：接受标识、展示名称或英文名，忽略大小写
    pub fn find(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(language) = Self::from_slug(s) {
            return Some(language);
        }

        match s.to_lowercase().as_str() {
            "inglês" | "english" | "en" => Some(Language::English),
            "español" | "spanish" | "es" => Some(Language::Spanish),
            other => Self::from_slug(other),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_accepts_slug_and_names() {
        assert_eq!(Language::find("ingles"), Some(Language::English));
        assert_eq!(Language::find(" Espanhol "), Some(Language::Spanish));
        assert_eq!(Language::find("Inglês"), Some(Language::English));
        assert_eq!(Language::find("spanish"), Some(Language::Spanish));
        assert_eq!(Language::find("frances"), None);
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Language::Spanish).unwrap();
        assert_eq!(json, "\"espanhol\"");

        let parsed: Language = serde_json::from_str("\"ingles\"").unwrap();
        assert_eq!(parsed, Language::English);
    }
}
