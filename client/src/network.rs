//! The game authority seam and its JSON-over-HTTP implementation.

use crate::error::ClientError;
use async_trait::async_trait;
use borders_shared::{
    ErrorBody, GameStateEnvelope, HintResponse, RevealResponse, SuggestionsRequest,
    SuggestionsResponse, UpdateFieldRequest, UpdateFieldResponse, CURRENT_PATH, HINT_PATH,
    REVEAL_PATH, START_PATH, SUGGESTIONS_PATH, UPDATE_FIELD_PATH,
};
use log::{debug, warn};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The remote game authority: validates answers, owns game state, produces hints.
#[async_trait]
pub trait Authority: Send + Sync {
    async fn start_game(&self) -> Result<GameStateEnvelope, ClientError>;

    async fn update_field(
        &self,
        request: &UpdateFieldRequest,
    ) -> Result<UpdateFieldResponse, ClientError>;

    /// Fails with [`ClientError::NotFound`] when there is no active game.
    async fn current_game(&self) -> Result<GameStateEnvelope, ClientError>;

    async fn hint(&self) -> Result<HintResponse, ClientError>;

    async fn reveal(&self) -> Result<RevealResponse, ClientError>;

    async fn suggestions(
        &self,
        request: &SuggestionsRequest,
    ) -> Result<SuggestionsResponse, ClientError>;
}

/// JSON-over-HTTP authority rooted at a fixed base URL.
///
/// No request timeout is set; a request that never answers stays pending.
pub struct HttpAuthority {
    http: reqwest::Client,
    api_base: String,
}

impl HttpAuthority {
    pub fn new(api_base: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("borders-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .map(|error| error.detail_text())
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());

            warn!("Authority answered {} ({})", status, detail);

            return Err(if status == StatusCode::NOT_FOUND {
                ClientError::NotFound { detail }
            } else {
                ClientError::Rejected {
                    status: status.as_u16(),
                    detail,
                }
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("POST {}", url);
        self.send(self.http.post(url)).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        self.send(self.http.post(url).json(body)).await
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    async fn start_game(&self) -> Result<GameStateEnvelope, ClientError> {
        self.post(START_PATH).await
    }

    async fn update_field(
        &self,
        request: &UpdateFieldRequest,
    ) -> Result<UpdateFieldResponse, ClientError> {
        self.post_json(UPDATE_FIELD_PATH, request).await
    }

    async fn current_game(&self) -> Result<GameStateEnvelope, ClientError> {
        self.get(CURRENT_PATH).await
    }

    async fn hint(&self) -> Result<HintResponse, ClientError> {
        self.get(HINT_PATH).await
    }

    async fn reveal(&self) -> Result<RevealResponse, ClientError> {
        self.get(REVEAL_PATH).await
    }

    async fn suggestions(
        &self,
        request: &SuggestionsRequest,
    ) -> Result<SuggestionsResponse, ClientError> {
        self.post_json(SUGGESTIONS_PATH, request).await
    }
}
