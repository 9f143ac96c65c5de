use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use common::config::GithubConfig;
use common::AppError;
use http::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error("github api error: {status} for {endpoint}")]
    Http {
        status: StatusCode,
        endpoint: String,
    },
}

impl GithubApiError {
    pub fn status(status: StatusCode, endpoint: impl Into<String>) -> Self {
        Self::Http {
            status,
            endpoint: endpoint.into(),
        }
    }
}

/// One page of a GitHub REST listing, as raw JSON items.
#[async_trait]
pub trait GithubClient: Send + Sync {
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;

    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;
}

pub struct HttpGithubClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpGithubClient {
    /// Fails with `MissingCredentials` before any request when no token is set.
    pub fn from_config(config: &GithubConfig) -> common::Result<Self> {
        let token = config.resolved_token()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AppError::invalid_config("github token is not a valid header value"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AppError::data_source)?;

        Ok(Self {
            http,
            base: base_url(&config.api_base)?,
        })
    }

    async fn get_json_array(&self, url: Url) -> Result<Vec<Value>> {
        let endpoint = url.path().trim_start_matches('/').to_string();
        let response = self.execute(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubApiError::status(status, endpoint).into());
        }
        match response.json::<Value>().await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            _ => Err(anyhow!("expected array response from {endpoint}")),
        }
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn execute(&self, url: Url) -> Result<reqwest::Response> {
        debug!("Dispatching GitHub request");
        Ok(self.http.get(url).send().await?)
    }

    fn join(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn with_query(url: &mut Url, params: &[(&str, String)]) {
        let mut query_pairs = url.query_pairs_mut();
        for (key, val) in params {
            query_pairs.append_pair(key, val);
        }
    }
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let mut url = self.join(&format!("repos/{owner}/{repo}/commits"))?;
        let params = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url).await
    }

    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let mut url = self.join(&format!("repos/{owner}/{repo}/issues"))?;
        let params = [
            ("state", state.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url).await
    }
}

/// `Url::join` drops the last segment unless the base ends with a slash.
fn base_url(raw: &str) -> common::Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw)
        .map_err(|err| AppError::invalid_config(format!("invalid github.api_base: {err}")))
}
