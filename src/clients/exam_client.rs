/// 题库客户端
///
/// 封装按年份和题目标识获取单道题目的调用
use crate::config::Config;
use crate::error::FetchError;
use crate::models::QuestionRecord;
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

/// 单题获取能力
///
/// 只负责"取一道题，成功或失败"，不知道自己对应哪个题号，
/// 也不关心失败后如何处理。
#[async_trait]
pub trait SlotFetcher: Send + Sync {
    async fn fetch(&self, year: u16, slot_id: &str) -> Result<QuestionRecord, FetchError>;
}

/// 基于 HTTP 的题库客户端
pub struct HttpSlotFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSlotFetcher {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.exam_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 构建题目详情地址
    pub fn detail_url(&self, year: u16, slot_id: &str) -> String {
        format!(
            "{}/{}/questions/{}/details.json",
            self.base_url, year, slot_id
        )
    }
}

#[async_trait]
impl SlotFetcher for HttpSlotFetcher {
    async fn fetch(&self, year: u16, slot_id: &str) -> Result<QuestionRecord, FetchError> {
        let url = self.detail_url(year, slot_id);
        debug!("请求题目: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        if !is_json {
            let preview = truncate_text(&body, 100);
            warn!("响应不是 JSON: {}", preview);
            return Err(FetchError::NotJson { url, preview });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}
