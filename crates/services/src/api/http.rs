use std::env;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};
use url::Url;

use exercise_core::model::{EvaluationPayload, EvaluationResult, ExerciseType, UserProfile};

use super::{Evaluator, ExerciseBatch, ExerciseSource, ProfileRefresher};
use crate::error::{ApiConfigError, ApiError};

const BASE_URL_VAR: &str = "PERPETUA_API_BASE_URL";
const TOKEN_VAR: &str = "PERPETUA_API_TOKEN";

/// Where the exercise API lives and how to authenticate against it.
#[derive(Clone)]
pub struct ApiConfig {
    base_url: String,
    token: Option<String>,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ApiConfigError::InvalidBaseUrl` if `base_url` does not parse.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ApiConfigError> {
        let base_url = base_url.into().trim().to_owned();
        if Url::parse(&base_url).is_err() {
            return Err(ApiConfigError::InvalidBaseUrl);
        }
        let token = token.filter(|t| !t.trim().is_empty());
        Ok(Self { base_url, token })
    }

    /// Read `PERPETUA_API_BASE_URL` and the optional `PERPETUA_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var(BASE_URL_VAR).ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let token = env::var(TOKEN_VAR).ok();
        match Self::new(base_url, token) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(%err, "ignoring {BASE_URL_VAR}");
                None
            }
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// JSON-over-HTTP implementation of all three collaborators.
#[derive(Clone)]
pub struct HttpExerciseApi {
    client: Client,
    config: ApiConfig,
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl HttpExerciseApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            profile: Arc::new(RwLock::new(None)),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        ApiConfig::from_env().map(Self::new)
    }

    /// Profile captured by the most recent successful refresh.
    #[must_use]
    pub fn cached_profile(&self) -> Option<UserProfile> {
        match self.profile.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response: Response = self.authorized(request).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

impl fmt::Debug for HttpExerciseApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpExerciseApi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ExerciseSource for HttpExerciseApi {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_exercise(&self, exercise_type: ExerciseType) -> Result<ExerciseBatch, ApiError> {
        let request = self
            .client
            .get(self.config.endpoint("exercise/"))
            .query(&[("exercise_type", exercise_type.as_str())]);
        self.send_json(request).await
    }
}

#[async_trait]
impl Evaluator for HttpExerciseApi {
    #[instrument(skip_all, fields(total = payload.total_questions, score = payload.final_score))]
    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResult, ApiError> {
        let request = self
            .client
            .post(self.config.endpoint("exercise/evaluate"))
            .json(payload);
        self.send_json(request).await
    }
}

#[async_trait]
impl ProfileRefresher for HttpExerciseApi {
    #[instrument(skip(self))]
    async fn refresh_user_profile(&self) -> Result<(), ApiError> {
        let request = self.client.get(self.config.endpoint("users/me"));
        let profile: UserProfile = self.send_json(request).await?;
        match self.profile.write() {
            Ok(mut guard) => *guard = Some(profile),
            Err(poisoned) => *poisoned.into_inner() = Some(profile),
        }
        Ok(())
    }
}
