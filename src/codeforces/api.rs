use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://codeforces.com/api/";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("upstream rejected the request: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a single GET and hands back whatever came over the wire.
pub trait HttpFetcher: Send + Sync {
    fn get(&self, url: &Url) -> Result<HttpResponse>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(ReqwestFetcher { client })
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Deserialize)]
struct Envelope {
    status: String,
    comment: Option<String>,
    result: Option<serde_json::Value>,
}

pub struct ApiClient {
    base: Url,
    fetcher: Box<dyn HttpFetcher>,
}

impl ApiClient {
    pub fn new(base: Url, fetcher: Box<dyn HttpFetcher>) -> Self {
        ApiClient { base, fetcher }
    }

    pub fn method_url(&self, method: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base
            .join(method)
            .map_err(|e| FetchError::Transport(format!("invalid api url for {}: {}", method, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// One attempt, no retries. Anything but a 200 with a JSON body is a failure.
    pub fn fetch_json(&self, url: &Url) -> Result<serde_json::Value> {
        log::debug!("GET {}", url);
        let response = self.fetcher.get(url)?;
        if response.status != 200 {
            log::warn!("{} answered with HTTP {}", url, response.status);
            return Err(FetchError::HttpStatus(response.status));
        }
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Calls an API method and unwraps the `{status, result}` envelope into `T`.
    pub fn call<T: DeserializeOwned>(&self, method: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.method_url(method, query)?;
        let value = self.fetch_json(&url)?;
        let envelope: Envelope = serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))?;
        if envelope.status != "OK" {
            let comment = envelope.comment.unwrap_or(envelope.status);
            log::warn!("{} failed upstream: {}", method, comment);
            return Err(FetchError::Upstream(comment));
        }
        let result = envelope
            .result
            .ok_or_else(|| FetchError::Decode(format!("{} response has no result", method)))?;
        serde_json::from_value(result).map_err(|e| FetchError::Decode(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{ok, StaticFetcher};
    use super::*;

    #[test]
    fn test_non_200_is_http_status_error() {
        let api = StaticFetcher::new().route("contest.list", &[], 503, "busy").into_client();
        let err = api.call::<serde_json::Value>("contest.list", &[]).unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(503)));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let api = StaticFetcher::new().route("contest.list", &[], 200, "{not json").into_client();
        let err = api.call::<serde_json::Value>("contest.list", &[]).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_failed_status_carries_comment() {
        let body = r#"{"status":"FAILED","comment":"contestId: Contest with id 99999 not found"}"#;
        let api = StaticFetcher::new().route("contest.standings", &[], 200, body).into_client();
        let err = api.call::<serde_json::Value>("contest.standings", &[]).unwrap_err();
        match err {
            FetchError::Upstream(comment) => assert!(comment.contains("not found")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_result_is_unwrapped_from_envelope() {
        let api = StaticFetcher::new().route("user.rating", &[("handle", "tourist")], 200, &ok("[1,2,3]")).into_client();
        let result: Vec<i32> = api.call("user.rating", &[("handle", "tourist".to_string())]).unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_method_url_joins_base_and_query() {
        let api = StaticFetcher::new().into_client();
        let url = api
            .method_url("contest.standings", &[("contestId", "1900".to_string()), ("from", "1".to_string())])
            .unwrap();
        assert_eq!(url.path(), "/api/contest.standings");
        assert_eq!(url.query(), Some("contestId=1900&from=1"));
    }
}
