use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 单题获取错误
    #[error("题目获取错误: {0}")]
    Fetch(#[from] FetchError),
    /// 会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 单题获取错误
///
/// 流水线只关心"成功或失败"，这里的细分仅用于日志。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非 2xx 状态
    #[error("服务器返回错误状态 ({url}): {status}")]
    BadStatus { url: String, status: u16 },
    /// 响应不是 JSON
    #[error("响应不是 JSON ({url}): {preview}")]
    NotJson { url: String, preview: String },
    /// JSON 解析失败
    #[error("JSON 解析失败 ({url}): {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// 题目数据不满足约束
    #[error("题目数据格式错误: {reason}")]
    Malformed { reason: String },
}

impl FetchError {
    /// 创建数据格式错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        FetchError::Malformed {
            reason: reason.into(),
        }
    }
}

/// 会话状态错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 尚未选择年份
    #[error("尚未选择年份")]
    NoYearSelected,
    /// 该年份必须先选择外语
    #[error("{year} 年的试卷需要先选择外语")]
    LanguageRequired { year: u16 },
    /// 加载批次已被新的选择取代
    #[error("加载代次 {generation} 已过期 (当前代次: {current})")]
    StaleGeneration { generation: u64, current: u64 },
    /// 当前没有试卷
    #[error("当前没有已加载的试卷")]
    NoExam,
    /// 试卷中不存在该题
    #[error("试卷中不存在第 {slot} 题")]
    UnknownSlot { slot: u16 },
    /// 该题已作废
    #[error("第 {slot} 题已作废，不能作答")]
    CanceledQuestion { slot: u16 },
    /// 该题没有这个选项
    #[error("第 {slot} 题没有选项 {letter}")]
    LetterNotOffered { slot: u16, letter: char },
}

impl SessionError {
    /// 是否为前置条件错误（不发起任何请求）
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SessionError::NoYearSelected | SessionError::LanguageRequired { .. }
        )
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 答题卡内容无效
    #[error("答题卡内容无效 ({path}): {reason}")]
    InvalidAnswerSheet { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 无法识别的外语
    #[error("无法识别的外语: {value}")]
    InvalidLanguage { value: String },
    /// 环境变量无法解析，已使用默认值
    #[error("环境变量 {var} 的值无法解析: {value}，使用默认值")]
    EnvVarParseFailed { var: String, value: String },
    /// 环境变量超出允许范围
    #[error("环境变量 {var} 的值 {value} 超出范围 (最大 {max})")]
    EnvVarOutOfRange { var: String, value: u64, max: u64 },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
