//! # DeepL REST 客户端
//!
//! 调用 DeepL `/v2/translate` 接口。
//!
//! ## 功能
//! - 每次调用都有超时
//! - 网络错误、超时、HTTP 429 和 5xx 按指数退避重试
//! - 其他 4xx 立即失败
//! - 纯文本模式保留格式；XML 模式保留标签并关闭大纲检测
//!
//! ## 依赖关系
//! - 被 `commands/graph/translate.rs`, `commands/text.rs` 使用
//! - 使用 `reqwest` (blocking), `serde_json`

use super::language::Language;
use super::{TextMode, TranslationService};
use crate::error::{RecapError, Result};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::thread;
use std::time::Duration;

const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";
const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// DeepL 客户端配置
#[derive(Debug, Clone)]
pub struct DeeplConfig {
    pub auth_key: String,
    pub source: Language,
    pub target: Language,
    /// 覆盖默认接口地址
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// DeepL 客户端
#[derive(Debug, Clone)]
pub struct DeeplClient {
    client: Client,
    config: DeeplConfig,
    endpoint: String,
}

impl DeeplClient {
    pub fn new(config: DeeplConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                RecapError::TranslationServiceError(format!("Failed to create HTTP client: {e}"))
            })?;

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint(&config.auth_key).to_string());

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    fn build_payload(&self, texts: &[String], mode: TextMode) -> Value {
        let mut payload = json!({
            "text": texts,
            "source_lang": self.config.source.api_code(),
            "target_lang": self.config.target.api_code(),
            "preserve_formatting": true,
        });

        if mode == TextMode::Xml {
            payload["tag_handling"] = json!("xml");
            payload["outline_detection"] = json!(false);
        }

        payload
    }

    fn execute_request_with_retry(&self, payload: &Value) -> Result<TranslateResponse> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                thread::sleep(backoff_delay(attempt - 1));
            }

            let response = self
                .client
                .post(&self.endpoint)
                .header(
                    "Authorization",
                    format!("DeepL-Auth-Key {}", self.config.auth_key),
                )
                .json(payload)
                .send();

            match response {
                Ok(response) if response.status().is_success() => {
                    return response.json().map_err(|e| {
                        RecapError::TranslationServiceError(format!(
                            "Failed to parse DeepL response: {e}"
                        ))
                    });
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(RecapError::TranslationServiceError(format!(
                        "DeepL API error {}: {}",
                        status, body
                    )));

                    if !should_retry(status) {
                        break;
                    }
                }
                Err(e) => {
                    let reason = if e.is_timeout() {
                        "request timed out".to_string()
                    } else {
                        e.to_string()
                    };
                    last_error = Some(RecapError::TranslationServiceError(format!(
                        "Request failed: {reason}"
                    )));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RecapError::TranslationServiceError("No request was sent".to_string())
        }))
    }
}

impl TranslationService for DeeplClient {
    fn translate_texts(&self, texts: &[String], mode: TextMode) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let payload = self.build_payload(texts, mode);
        let response = self.execute_request_with_retry(&payload)?;

        if response.translations.len() != texts.len() {
            return Err(RecapError::TranslationServiceError(format!(
                "Expected {} translations, got {}",
                texts.len(),
                response.translations.len()
            )));
        }

        Ok(response.translations.into_iter().map(|t| t.text).collect())
    }
}

/// 免费版密钥以 `:fx` 结尾
fn default_endpoint(auth_key: &str) -> &'static str {
    if auth_key.ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

/// 限流和服务端错误可重试
fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// 第 n 次重试前的等待时间：1s, 2s, 4s, 8s, 8s ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2_u64.pow(attempt.min(3)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::language::LanguageRole;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn client_with_retries(endpoint: Option<&str>, auth_key: &str, retries: u32) -> DeeplClient {
        DeeplClient::new(DeeplConfig {
            auth_key: auth_key.to_string(),
            source: Language::parse("en", LanguageRole::Source).unwrap(),
            target: Language::parse("de", LanguageRole::Target).unwrap(),
            endpoint: endpoint.map(str::to_string),
            timeout: Duration::from_secs(5),
            max_retries: retries,
        })
        .unwrap()
    }

    fn client(endpoint: Option<&str>, auth_key: &str) -> DeeplClient {
        client_with_retries(endpoint, auth_key, 0)
    }

    /// 本地 HTTP 桩：按顺序返回预设响应，并统计收到的请求数
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/v2/translate", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap_or(0);
                        }
                    }
                }
                let mut request_body = vec![0; content_length];
                let _ = reader.read_exact(&mut request_body);
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (endpoint, requests)
    }

    const ONE_TRANSLATION: &str = r#"{"translations": [{"detected_source_language": "EN", "text": "Hallo"}]}"#;

    #[test]
    fn test_endpoint_selection() {
        assert_eq!(client(None, "abc:fx").endpoint, FREE_ENDPOINT);
        assert_eq!(client(None, "abc").endpoint, PRO_ENDPOINT);
        assert_eq!(
            client(Some("http://localhost:1/v2/translate"), "abc").endpoint,
            "http://localhost:1/v2/translate"
        );
    }

    #[test]
    fn test_payload_modes() {
        let c = client(None, "abc");
        let texts = vec!["Hello".to_string()];

        let plain = c.build_payload(&texts, TextMode::Plain);
        assert_eq!(plain["source_lang"], "EN");
        assert_eq!(plain["target_lang"], "DE");
        assert_eq!(plain["preserve_formatting"], true);
        assert!(plain.get("tag_handling").is_none());

        let xml = c.build_payload(&texts, TextMode::Xml);
        assert_eq!(xml["tag_handling"], "xml");
        assert_eq!(xml["outline_detection"], false);
        assert_eq!(xml["text"][0], "Hello");
    }

    #[test]
    fn test_retry_policy() {
        assert!(should_retry(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry(StatusCode::SERVICE_UNAVAILABLE));
        assert!(should_retry(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!should_retry(StatusCode::FORBIDDEN));
        assert!(!should_retry(StatusCode::BAD_REQUEST));
        // 456: 配额用尽
        assert!(!should_retry(StatusCode::from_u16(456).unwrap()));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(3), Duration::from_secs(8));
        assert_eq!(backoff_delay(10), Duration::from_secs(8));
    }

    #[test]
    fn test_empty_batch_sends_nothing() {
        // 不可达地址：若发送请求必然失败
        let c = client(Some("http://127.0.0.1:9/v2/translate"), "abc");
        assert!(c.translate_texts(&[], TextMode::Plain).unwrap().is_empty());
    }

    #[test]
    fn test_server_error_is_retried() {
        let (endpoint, requests) = serve(vec![(503, "busy"), (200, ONE_TRANSLATION)]);
        let c = client_with_retries(Some(&endpoint), "abc", 2);

        let result = c.translate_texts(&["Hello".to_string()], TextMode::Plain).unwrap();

        assert_eq!(result, vec!["Hallo".to_string()]);
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_client_error_is_not_retried() {
        let (endpoint, requests) = serve(vec![(403, "forbidden"), (200, ONE_TRANSLATION)]);
        let c = client_with_retries(Some(&endpoint), "abc", 3);

        let result = c.translate_texts(&["Hello".to_string()], TextMode::Plain);

        match result {
            Err(RecapError::TranslationServiceError(message)) => assert!(message.contains("403")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_translation_count_mismatch() {
        let (endpoint, requests) = serve(vec![(200, ONE_TRANSLATION)]);
        let c = client_with_retries(Some(&endpoint), "abc", 3);

        let result = c.translate_texts(&["Hello".to_string(), "World".to_string()], TextMode::Plain);

        match result {
            Err(RecapError::TranslationServiceError(message)) => {
                assert!(message.contains("Expected 2 translations, got 1"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_connection_failure_is_service_error() {
        let c = client(Some("http://127.0.0.1:9/v2/translate"), "abc");
        let result = c.translate_texts(&["Hi".to_string()], TextMode::Plain);
        assert!(matches!(
            result,
            Err(RecapError::TranslationServiceError(_))
        ));
    }
}
