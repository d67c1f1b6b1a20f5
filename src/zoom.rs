//! Zoom server-to-server OAuth adapter.
//!
//! Fetches a bearer token with the account-credentials grant, then proxies
//! to the meetings/webinars endpoints of the configured Zoom user. Tokens
//! are fetched per request and never cached.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use rocket::http::Status;
use serde_json::Value;
use thiserror::Error;

use crate::config::ZoomConfig;
use crate::resp::problem::Problem;
use crate::util;
use base64::Engine;

static OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("zoom token request failed")]
    Token(#[source] reqwest::Error),
    #[error("zoom rejected token request with status {0}")]
    TokenRejected(StatusCode),
    #[error("zoom api request failed")]
    Api(#[from] reqwest::Error),
    #[error("zoom api responded with status {0}")]
    ApiStatus(StatusCode),
}

impl From<ZoomError> for Problem {
    fn from(e: ZoomError) -> Self {
        match e {
            ZoomError::Token(_) | ZoomError::TokenRejected(_) => {
                Problem::new_untyped(Status::BadGateway, "Unable to obtain Zoom access token.")
                    .detail(e)
                    .to_owned()
            }
            ZoomError::Api(ref inner) if inner.is_timeout() => {
                Problem::new_untyped(Status::GatewayTimeout, "Zoom API timed out.")
            }
            ZoomError::Api(_) | ZoomError::ApiStatus(_) => {
                Problem::new_untyped(Status::BadGateway, "Zoom API request failed.")
                    .detail(e)
                    .to_owned()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct ZoomClient {
    http: reqwest::Client,
    config: ZoomConfig,
}

// Never expose the client secret in logs.
impl std::fmt::Debug for ZoomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ZoomClient:{}", self.config.user_id)
    }
}

impl ZoomClient {
    pub fn new(config: ZoomConfig) -> Result<ZoomClient, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()?;

        Ok(ZoomClient { http, config })
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", util::base64_engine().encode(credentials))
    }

    fn user_resource_url(&self, resource: &str) -> String {
        format!(
            "{}/users/{}/{}",
            self.config.api_base, self.config.user_id, resource
        )
    }

    /// Token fetch failures are hard errors; requests are never sent with a
    /// missing bearer.
    async fn fetch_token(&self) -> Result<String, ZoomError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .header(AUTHORIZATION, self.basic_auth())
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .send()
            .await
            .map_err(ZoomError::Token)?;

        if !response.status().is_success() {
            return Err(ZoomError::TokenRejected(response.status()));
        }

        let token: TokenResponse = response.json().await.map_err(ZoomError::Token)?;
        Ok(token.access_token)
    }

    async fn list(&self, resource: &str) -> Result<Value, ZoomError> {
        let token = self.fetch_token().await?;

        let response = self
            .http
            .get(self.user_resource_url(resource))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ZoomError::ApiStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn create(&self, resource: &str, body: &Value) -> Result<Value, ZoomError> {
        let token = self.fetch_token().await?;

        let response = self
            .http
            .post(self.user_resource_url(resource))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ZoomError::ApiStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    pub async fn list_meetings(&self) -> Result<Value, ZoomError> {
        self.list("meetings").await
    }

    pub async fn list_webinars(&self) -> Result<Value, ZoomError> {
        self.list("webinars").await
    }

    pub async fn create_meeting(&self, body: &Value) -> Result<Value, ZoomError> {
        self.create("meetings", body).await
    }

    pub async fn create_webinar(&self, body: &Value) -> Result<Value, ZoomError> {
        self.create("webinars", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_client() -> ZoomClient {
        ZoomClient::new(ZoomConfig {
            token_url: "https://zoom.us/oauth/token".to_string(),
            api_base: "https://api.zoom.us/v2".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            account_id: "account".to_string(),
            user_id: "webinars@example.com".to_string(),
        })
        .expect("unable to build http client")
    }

    #[test]
    fn basic_auth_header_encodes_credentials() {
        let client = example_client();
        assert_eq!(client.basic_auth(), "Basic Y2xpZW50OnNlY3JldA==");
    }

    #[test]
    fn resource_urls_target_configured_user() {
        let client = example_client();
        assert_eq!(
            client.user_resource_url("meetings"),
            "https://api.zoom.us/v2/users/webinars@example.com/meetings"
        );
        assert_eq!(
            client.user_resource_url("webinars"),
            "https://api.zoom.us/v2/users/webinars@example.com/webinars"
        );
    }

    #[test]
    fn token_problems_surface_as_bad_gateway() {
        let problem = Problem::from(ZoomError::TokenRejected(StatusCode::UNAUTHORIZED));
        assert_eq!(problem.status, Status::BadGateway);
    }
}
