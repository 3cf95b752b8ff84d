//! HTTP contract of the fan site, as consumed by the interaction layer.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::config::InteractionConfig;
use crate::cookie::read_cookie;
use crate::error::{CheerError, CheerResult};
use crate::like::LikeRequest;
use crate::page::FormSubmission;

/// Server port used by the controllers and the host.
#[async_trait]
pub trait CheerApi: Send + Sync {
    /// `POST` a cheer. Resolves to the decoded body of a 2xx response;
    /// transport failures and other statuses are errors.
    async fn like(&self, request: &LikeRequest) -> CheerResult<Value>;

    /// Perform a form submission as a navigation, following redirects.
    /// Resolves to the URL the browser would land on.
    async fn submit_form(&self, submission: &FormSubmission) -> CheerResult<Url>;
}

/// `reqwest` implementation talking to the real site.
#[derive(Debug, Clone)]
pub struct HttpCheerApi {
    client: Client,
    base: Url,
    cookies: String,
    csrf_cookie: String,
    csrf_header: String,
}

impl HttpCheerApi {
    pub fn new(base: Url, cookies: impl Into<String>, config: &InteractionConfig) -> CheerResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("cheerpaw/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CheerError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base,
            cookies: cookies.into(),
            csrf_cookie: config.csrf_cookie.clone(),
            csrf_header: config.csrf_header.clone(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        if self.cookies.is_empty() {
            builder
        } else {
            builder.header(COOKIE, self.cookies.as_str())
        }
    }
}

#[async_trait]
impl CheerApi for HttpCheerApi {
    async fn like(&self, request: &LikeRequest) -> CheerResult<Value> {
        let url = self.base.join(&request.path)?;
        let mut builder = self
            .request(Method::POST, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.csrf_token {
            builder = builder.header(request.csrf_header.as_str(), token.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path = %request.path, "cheer rejected by status");
            return Err(CheerError::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }

    async fn submit_form(&self, submission: &FormSubmission) -> CheerResult<Url> {
        let url = self.base.join(&submission.action)?;
        let method = Method::from_bytes(submission.method.as_bytes()).map_err(|_| {
            CheerError::InvalidAttribute {
                name: "method".to_string(),
                value: submission.method.clone(),
            }
        })?;

        let mut builder = self.request(method, url);
        if let Some(token) = read_cookie(&self.cookies, &self.csrf_cookie) {
            builder = builder.header(self.csrf_header.as_str(), token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheerError::Status(status.as_u16()));
        }
        tracing::info!(landed = %response.url(), "form navigation finished");
        Ok(response.url().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_base_and_csrf_names() {
        let base = Url::parse("http://127.0.0.1:8000/").unwrap();
        let api = HttpCheerApi::new(base.clone(), "csrftoken=abc", &InteractionConfig::default())
            .unwrap();
        assert_eq!(api.base(), &base);
        assert_eq!(api.csrf_header, "X-CSRFToken");
    }
}
