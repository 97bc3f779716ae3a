//! Remote save service client
//!
//! Talks to a single authenticated endpoint, `<base>/api/game/save`:
//! POST stores the caller's game, GET returns the latest one.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{GeoError, Result};
use crate::world::state::GameState;

const SAVE_PATH: &str = "/api/game/save";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    save_name: &'a str,
    game_state: &'a GameState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    game_state: Option<serde_json::Value>,
}

pub struct RemoteStore {
    client: Client,
    base_url: String,
    token: String,
}

impl RemoteStore {
    /// An empty token is rejected up front; no request would succeed
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GeoError::Unauthenticated("no access token".into()));
        }
        Ok(Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        })
    }

    /// Create a store from environment variables
    ///
    /// Required: GEOSYNTHESIS_TOKEN
    pub fn from_env(base_url: impl Into<String>) -> Result<Self> {
        let token = std::env::var("GEOSYNTHESIS_TOKEN")
            .map_err(|_| GeoError::Unauthenticated("GEOSYNTHESIS_TOKEN not set".into()))?;
        Self::new(base_url, token)
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SAVE_PATH)
    }

    pub async fn save(&self, state: &GameState, save_name: &str) -> Result<()> {
        let request = SaveRequest {
            save_name,
            game_state: state,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GeoError::Unauthenticated("token rejected".into()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeoError::Remote(format!("{}: {}", status, error_text)));
        }

        let body: SaveResponse = response.json().await?;
        if !body.success {
            return Err(GeoError::Remote(
                body.error.unwrap_or_else(|| "save rejected".into()),
            ));
        }

        debug!(save_name, turn = state.turn, "saved remotely");
        Ok(())
    }

    /// Fetch the stored game, if the service has one
    pub async fn load(&self) -> Result<Option<GameState>> {
        let response = self
            .client
            .get(self.endpoint())
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(GeoError::Unauthenticated("token rejected".into()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeoError::Remote(format!("{}: {}", status, error_text)));
        }

        let body: LoadResponse = response.json().await?;
        let Some(raw) = body.game_state.filter(|_| body.success) else {
            return Ok(None);
        };

        match serde_json::from_value(raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(error = %e, "remote save is malformed");
                Ok(None)
            }
        }
    }
}
