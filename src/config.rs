use crate::error::ConfigError;
use crate::models::Language;
use crate::services::VariantPolicy;

/// 每份试卷最多的题目数量
pub const MAX_TOTAL_SLOTS: u16 = 180;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库根地址
    pub exam_base_url: String,
    /// 每份试卷的题目数量
    pub total_slots: u16,
    /// 每批同时请求的题目数量
    pub batch_size: u16,
    /// 必须先选择外语的最后一年
    pub language_required_until: u16,
    /// 可选的最早年份
    pub first_exam_year: u16,
    /// 可选的最晚年份
    pub last_exam_year: u16,
    /// 单次 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 要加载的年份
    pub exam_year: Option<u16>,
    /// 要加载的外语（ingles / espanhol）
    pub exam_language: Option<String>,
    /// 答题卡 TOML 文件
    pub answers_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_base_url: "https://titenq-enem.vercel.app/exams".to_string(),
            total_slots: MAX_TOTAL_SLOTS,
            batch_size: 10,
            language_required_until: 2023,
            first_exam_year: 2009,
            last_exam_year: 2023,
            request_timeout_secs: 30,
            exam_year: None,
            exam_language: None,
            answers_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置
    ///
    /// 无法解析的值回退为默认值，并随配置一起返回，由调用方在日志初始化后输出。
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// 按给定的查找函数读取配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let default = Self::default();
        let mut problems = Vec::new();
        let mut parse = |var: &str| -> Option<u64> {
            let value = lookup(var).filter(|v| !v.trim().is_empty())?;
            match value.trim().parse() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    problems.push(ConfigError::EnvVarParseFailed {
                        var: var.to_string(),
                        value,
                    });
                    None
                }
            }
        };

        let total_slots = parse("TOTAL_SLOTS");
        let batch_size = parse("BATCH_SIZE");
        let language_required_until = parse("LANGUAGE_REQUIRED_UNTIL");
        let first_exam_year = parse("FIRST_EXAM_YEAR");
        let last_exam_year = parse("LAST_EXAM_YEAR");
        let request_timeout_secs = parse("REQUEST_TIMEOUT_SECS");
        let exam_year = parse("EXAM_YEAR");

        let mut year = |var: &str, value: Option<u64>| -> Option<u16> {
            let value = value?;
            u16::try_from(value).ok().or_else(|| {
                problems.push(ConfigError::EnvVarOutOfRange {
                    var: var.to_string(),
                    value,
                    max: u64::from(u16::MAX),
                });
                None
            })
        };
        let language_required_until = year("LANGUAGE_REQUIRED_UNTIL", language_required_until);
        let first_exam_year = year("FIRST_EXAM_YEAR", first_exam_year);
        let last_exam_year = year("LAST_EXAM_YEAR", last_exam_year);
        let exam_year = year("EXAM_YEAR", exam_year);

        let total_slots = match total_slots {
            Some(value) if value > u64::from(MAX_TOTAL_SLOTS) => {
                problems.push(ConfigError::EnvVarOutOfRange {
                    var: "TOTAL_SLOTS".to_string(),
                    value,
                    max: u64::from(MAX_TOTAL_SLOTS),
                });
                MAX_TOTAL_SLOTS
            }
            // 不超过 MAX_TOTAL_SLOTS，转换不会失败
            Some(value) => u16::try_from(value).unwrap_or(MAX_TOTAL_SLOTS),
            None => default.total_slots,
        };

        let batch_size = match batch_size {
            Some(value) if value == 0 || value > u64::from(MAX_TOTAL_SLOTS) => {
                problems.push(ConfigError::EnvVarOutOfRange {
                    var: "BATCH_SIZE".to_string(),
                    value,
                    max: u64::from(MAX_TOTAL_SLOTS),
                });
                default.batch_size
            }
            Some(value) => u16::try_from(value).unwrap_or(default.batch_size),
            None => default.batch_size,
        };

        let config = Self {
            exam_base_url: lookup("EXAM_BASE_URL").unwrap_or(default.exam_base_url),
            total_slots,
            batch_size,
            language_required_until: language_required_until.unwrap_or(default.language_required_until),
            first_exam_year: first_exam_year.unwrap_or(default.first_exam_year),
            last_exam_year: last_exam_year.unwrap_or(default.last_exam_year),
            request_timeout_secs: request_timeout_secs.unwrap_or(default.request_timeout_secs),
            exam_year,
            exam_language: lookup("EXAM_LANGUAGE").filter(|v| !v.trim().is_empty()),
            answers_file: lookup("ANSWERS_FILE").filter(|v| !v.trim().is_empty()),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        };

        (config, problems)
    }

    /// 外语题策略
    pub fn variant_policy(&self) -> VariantPolicy {
        VariantPolicy::new(self.language_required_until)
    }

    /// 可选年份列表
    pub fn available_years(&self) -> Vec<u16> {
        (self.first_exam_year..=self.last_exam_year).collect()
    }

    /// 解析配置中的外语
    pub fn language(&self) -> Result<Option<Language>, ConfigError> {
        match self.exam_language.as_deref() {
            None => Ok(None),
            Some(value) => Language::find(value)
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidLanguage {
                    value: value.to_string(),
                }),
        }
    }
}
