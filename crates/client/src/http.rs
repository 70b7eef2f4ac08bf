//! Small JSON-over-HTTP helper on the hyper legacy client.

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::Serialize;

/// Thin wrapper owning the connection pool and the service base URL.
pub struct HttpClient {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn uri(&self, path: &str) -> Result<Uri> {
        format!("{}{}", self.base_url, path)
            .parse::<Uri>()
            .with_context(|| format!("invalid service URL for {path}"))
    }

    /// POST a JSON body, returning (status, response bytes).
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        bearer: Option<&str>,
    ) -> Result<(u16, Bytes)> {
        let payload = serde_json::to_vec(body).context("serialize request body")?;

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(self.uri(path)?)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Full::new(Bytes::from(payload)))
            .context("build request")?;

        self.dispatch(request).await
    }

    /// GET a path, returning (status, response bytes).
    pub async fn get(&self, path: &str) -> Result<(u16, Bytes)> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.uri(path)?)
            .body(Full::new(Bytes::new()))
            .context("build request")?;

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Full<Bytes>>) -> Result<(u16, Bytes)> {
        let response = self
            .client
            .request(request)
            .await
            .context("score service unreachable")?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .context("read response body")?
            .to_bytes();
        Ok((status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = HttpClient::new("http://127.0.0.1:8000/");
        let uri = client.uri("/scores/global-best").unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:8000/scores/global-best");
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let client = HttpClient::new("not a url");
        assert!(client.uri("/auth/login").is_err());
    }

    #[test]
    fn test_request_without_listener_is_an_error() {
        let client = HttpClient::new("http://127.0.0.1:1");
        let result = tokio_test::block_on(client.get("/scores/global-best"));
        assert!(result.is_err());
    }
}
