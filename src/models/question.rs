use crate::error::FetchError;
use crate::models::language::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 加载失败时占位题目的提示文字
pub const LOAD_FAILURE_NOTICE: &str = "Erro ao carregar esta questão";

/// 选项字母（A-E）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::E];

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            _ => None,
        }
    }
}

impl FromStr for Letter {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Letter::from_char(c).ok_or_else(|| FetchError::malformed(format!("无效的选项字母: {}", s)))
            }
            _ => Err(FetchError::malformed(format!("无效的选项字母: {}", s))),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 选项内容：文字或图片，二者取其一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlternativeBody {
    Text(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub letter: Letter,
    pub body: AlternativeBody,
}

/// 已组装的题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    /// 题号（1..=180），试卷内唯一，也是排序键
    pub slot: u16,
    pub year: u16,
    pub language: Option<Language>,
    pub discipline: String,
    pub context: Option<String>,
    pub files: Vec<String>,
    /// 作废题目为 None
    pub correct_alternative: Option<Letter>,
    pub alternatives_introduction: Option<String>,
    pub alternatives: Vec<Alternative>,
    pub canceled: bool,
}

impl Question {
    /// 构造加载失败时的作废占位题目
    pub fn placeholder(slot: u16, year: u16, language: Option<Language>) -> Self {
        Self {
            title: format!("Questão {}", slot),
            slot,
            year,
            language,
            discipline: String::new(),
            context: Some(LOAD_FAILURE_NOTICE.to_string()),
            files: Vec::new(),
            correct_alternative: None,
            alternatives_introduction: None,
            alternatives: Vec::new(),
            canceled: true,
        }
    }

    /// 该题是否提供某个选项（作废题目不提供任何选项）
    pub fn offers(&self, letter: Letter) -> bool {
        !self.canceled && self.alternatives.iter().any(|a| a.letter == letter)
    }

    /// 判断作答是否正确；作废题目永远返回 None
    pub fn is_correct(&self, letter: Letter) -> Option<bool> {
        if self.canceled {
            return None;
        }
        self.correct_alternative.map(|correct| correct == letter)
    }

    /// 提取题干材料中嵌入的图片引用
    pub fn context_images(&self) -> Vec<ContextImage> {
        let Some(context) = self.context.as_deref() else {
            return Vec::new();
        };

        let mut images = Vec::new();
        if let Ok(re) = Regex::new(
            r"!\[\]\(https://enem\.dev/(\d+)/questions/(\d+(?:-ingles|-espanhol)?)/([a-f0-9-]+\.(?:jpg|png|gif|svg))\)",
        ) {
            for caps in re.captures_iter(context) {
                let Ok(year) = caps[1].parse::<u16>() else {
                    continue;
                };
                images.push(ContextImage {
                    year,
                    slot_id: caps[2].to_string(),
                    file_name: caps[3].to_string(),
                });
            }
        }
        images
    }
}

/// 题干材料中的图片引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextImage {
    pub year: u16,
    pub slot_id: String,
    pub file_name: String,
}

impl ContextImage {
    /// 相对于题库根目录的路径
    pub fn relative_path(&self) -> String {
        format!("{}/questions/{}/{}", self.year, self.slot_id, self.file_name)
    }
}

/// 题库返回的原始选项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRecord {
    pub letter: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

/// 题库返回的原始题目（不含题号）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub correct_alternative: Option<String>,
    #[serde(default)]
    pub alternatives_introduction: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<AlternativeRecord>,
    #[serde(default)]
    pub canceled: Option<bool>,
}

impl QuestionRecord {
    /// 将原始题目转换为 `Question`，题号由调用方注入
    ///
    /// 非作废题目必须满足：选项字母有效且不重复，每个选项恰有文字或图片之一，
    /// 正确答案是其中一个选项。作废题目的选项和答案尽力解析，不合法的直接丢弃。
    pub fn into_question(self, slot: u16, year: u16) -> Result<Question, FetchError> {
        let canceled = self.canceled.unwrap_or(false);
        let language = self.language.as_deref().and_then(Language::find);

        let mut alternatives: Vec<Alternative> = Vec::with_capacity(self.alternatives.len());
        for record in self.alternatives {
            match ingest_alternative(record) {
                Ok(alternative) => {
                    if alternatives.iter().any(|a| a.letter == alternative.letter) {
                        if canceled {
                            continue;
                        }
                        return Err(FetchError::malformed(format!(
                            "第 {} 题选项 {} 重复",
                            slot, alternative.letter
                        )));
                    }
                    alternatives.push(alternative);
                }
                Err(_) if canceled => continue,
                Err(e) => return Err(e),
            }
        }

        let correct_alternative = match self.correct_alternative.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<Letter>() {
                Ok(letter) => Some(letter),
                Err(_) if canceled => None,
                Err(e) => return Err(e),
            },
            _ => None,
        };

        if !canceled {
            let Some(correct) = correct_alternative else {
                return Err(FetchError::malformed(format!("第 {} 题缺少正确答案", slot)));
            };
            if !alternatives.iter().any(|a| a.letter == correct) {
                return Err(FetchError::malformed(format!(
                    "第 {} 题的正确答案 {} 不在选项中",
                    slot, correct
                )));
            }
        }

        Ok(Question {
            title: self.title,
            slot,
            year: self.year.unwrap_or(year),
            language,
            discipline: self.discipline.unwrap_or_default(),
            context: self.context,
            files: self.files.unwrap_or_default(),
            correct_alternative: if canceled { None } else { correct_alternative },
            alternatives_introduction: self.alternatives_introduction,
            alternatives,
            canceled,
        })
    }
}

/// 选项内容在入库时一次性判定：优先文字，其次图片
fn ingest_alternative(record: AlternativeRecord) -> Result<Alternative, FetchError> {
    let letter: Letter = record.letter.parse()?;

    let text = record.text.filter(|t| !t.trim().is_empty());
    let file = record.file.filter(|f| !f.trim().is_empty());

    let body = match (text, file) {
        (Some(text), _) => AlternativeBody::Text(text),
        (None, Some(file)) => AlternativeBody::Image(file),
        (None, None) => {
            return Err(FetchError::malformed(format!("选项 {} 既没有文字也没有图片", letter)))
        }
    };

    Ok(Alternative { letter, body })
}
