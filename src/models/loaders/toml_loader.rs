use crate::error::FileError;
use crate::models::language::Language;
use crate::models::question::Letter;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// 答题卡文件内容
///
/// ```toml
/// year = 2020
/// language = "ingles"
///
/// [answers]
/// 1 = "A"
/// 2 = "c"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

impl AnswerSheet {
    /// 答题卡是否适用于该外语（未注明外语的答题卡适用于任何试卷）
    pub fn matches_language(&self, language: Option<Language>) -> bool {
        match self.language.as_deref() {
            None => true,
            Some(value) => Language::find(value) == language,
        }
    }

    /// 解析全部作答，按题号排序
    pub fn entries(&self, path: &str) -> Result<Vec<(u16, Letter)>, FileError> {
        let mut entries = Vec::with_capacity(self.answers.len());
        for (slot, letter) in &self.answers {
            let slot: u16 = slot.trim().parse().map_err(|_| FileError::InvalidAnswerSheet {
                path: path.to_string(),
                reason: format!("无效的题号: {}", slot),
            })?;
            let letter: Letter = letter.parse().map_err(|_| FileError::InvalidAnswerSheet {
                path: path.to_string(),
                reason: format!("第 {} 题的选项无效: {}", slot, letter),
            })?;
            entries.push((slot, letter));
        }
        entries.sort_by_key(|(slot, _)| *slot);
        Ok(entries)
    }
}

/// 从字符串解析答题卡
pub fn parse_answer_sheet(content: &str, path: &str) -> Result<AnswerSheet, FileError> {
    toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
        path: path.to_string(),
        source,
    })
}

/// 从 TOML 文件加载答题卡
pub async fn load_answer_sheet(path: &Path) -> Result<AnswerSheet, FileError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: display.clone(),
            source,
        })?;

    let sheet = parse_answer_sheet(&content, &display)?;
    tracing::info!("成功加载答题卡: {} 道作答", sheet.answers.len());

    Ok(sheet)
}
