use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::core::{parse_content_type, HinglishError, HinglishOptions};

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 下载得到的文档
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub data: Vec<u8>,
    /// 跟随重定向后的最终地址
    pub final_url: Url,
    pub media_type: String,
    pub charset: String,
}

/// HTTP 会话
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    pub fn new(options: &HinglishOptions) -> Result<Self, HinglishError> {
        let mut header_map = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|e| HinglishError::new(&format!("Invalid user agent: {e}")))?;
        header_map.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(header_map);
        if options.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(options.timeout));
        }

        let client = builder
            .build()
            .map_err(|e| HinglishError::new(&format!("Failed to initialize HTTP client: {e}")))?;

        Ok(Session { client })
    }

    /// 下载页面
    pub async fn retrieve_document(&self, url: &Url) -> Result<RetrievedDocument, HinglishError> {
        tracing::info!("下载页面: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| HinglishError::new(&format!("Failed to fetch URL: {e}")))?;

        if !response.status().is_success() {
            return Err(HinglishError::new(&format!(
                "Failed to fetch URL: {} returned {}",
                url,
                response.status()
            )));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        let (media_type, charset, _is_base64) = parse_content_type(&content_type);

        let data = response
            .bytes()
            .await
            .map_err(|e| HinglishError::new(&format!("Failed to read response body: {e}")))?
            .to_vec();

        Ok(RetrievedDocument {
            data,
            final_url,
            media_type,
            charset,
        })
    }
}
