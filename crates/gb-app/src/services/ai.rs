//! Commit and branch-name summarization backend selection.
//!
//! The service does not talk to a model by itself. It decides, from the
//! summarizer settings and the current session, which backend a request
//! should go to and with which credentials.

use std::sync::Arc;

use gb_core::{CellReader, User};
use thiserror::Error;
use tracing::debug;

use crate::services::cloud::CloudClient;
use crate::services::summarizer_settings::{KeyOption, ModelKind, SummarizerSettings};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("the GitButler AI API requires a signed-in user")]
    ButlerApiRequiresLogin,

    #[error("no API key configured for {}", .0.as_str())]
    MissingApiKey(ModelKind),

    #[error(transparent)]
    Settings(#[from] anyhow::Error),
}

/// Resolved backend for one summarization request.
///
/// Carries credentials, so it deliberately has no `Debug` impl.
pub enum AiBackend {
    ButlerApi {
        cloud: Arc<CloudClient>,
        access_token: String,
        model_kind: ModelKind,
    },
    OpenAi {
        api_key: String,
        model: String,
    },
    Anthropic {
        api_key: String,
        model: String,
    },
}

impl AiBackend {
    pub fn model_kind(&self) -> ModelKind {
        match self {
            AiBackend::ButlerApi { model_kind, .. } => *model_kind,
            AiBackend::OpenAi { .. } => ModelKind::OpenAi,
            AiBackend::Anthropic { .. } => ModelKind::Anthropic,
        }
    }

    pub fn is_butler_api(&self) -> bool {
        matches!(self, AiBackend::ButlerApi { .. })
    }
}

pub struct AiService {
    settings: Arc<SummarizerSettings>,
    cloud: Arc<CloudClient>,
    user: CellReader<User>,
}

impl AiService {
    pub fn new(
        settings: Arc<SummarizerSettings>,
        cloud: Arc<CloudClient>,
        user: CellReader<User>,
    ) -> Self {
        Self {
            settings,
            cloud,
            user,
        }
    }

    pub async fn resolve_backend(&self) -> Result<AiBackend, AiError> {
        let model_kind = self.settings.model_kind().await?;
        let key_option = self.settings.key_option(model_kind).await?;
        debug!(
            model_kind = model_kind.as_str(),
            key_option = key_option.as_str(),
            "Resolving AI backend"
        );

        match key_option {
            KeyOption::ButlerApi => {
                let user = self.user.value().ok_or(AiError::ButlerApiRequiresLogin)?;
                Ok(AiBackend::ButlerApi {
                    cloud: self.cloud.clone(),
                    access_token: user.access_token,
                    model_kind,
                })
            }
            KeyOption::BringYourOwn => {
                let api_key = self
                    .settings
                    .api_key(model_kind)
                    .await?
                    .ok_or(AiError::MissingApiKey(model_kind))?;
                let model = self.settings.model_name(model_kind).await?;
                Ok(match model_kind {
                    ModelKind::OpenAi => AiBackend::OpenAi { api_key, model },
                    ModelKind::Anthropic => AiBackend::Anthropic { api_key, model },
                })
            }
        }
    }

    /// Whether a summarization request could be made right now.
    pub async fn validate_configuration(&self) -> bool {
        match self.resolve_backend().await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "AI backend not usable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::git_config::GitConfig;
    use crate::services::summarizer_settings::test_support::MemoryGitConfig;
    use crate::services::summarizer_settings::{
        ANTHROPIC_KEY_KEY, ANTHROPIC_KEY_OPTION_KEY, MODEL_KIND_KEY, OPENAI_KEY_OPTION_KEY,
    };
    use async_trait::async_trait;
    use gb_core::ports::FetchPort;
    use gb_core::{HttpRequest, HttpResponse, ReactiveCell};

    struct OfflineFetch;

    #[async_trait]
    impl FetchPort for OfflineFetch {
        async fn fetch(&self, _request: HttpRequest) -> anyhow::Result<HttpResponse> {
            anyhow::bail!("offline")
        }
    }

    fn service(entries: &[(&str, &str)], user: &ReactiveCell<User>) -> AiService {
        let git_config = Arc::new(GitConfig::new(Arc::new(MemoryGitConfig::with(entries))));
        let settings = Arc::new(SummarizerSettings::new(git_config));
        let cloud = Arc::new(CloudClient::new(Arc::new(OfflineFetch), "https://cloud.test").unwrap());
        AiService::new(settings, cloud, user.reader())
    }

    fn signed_in() -> User {
        User {
            id: 7,
            name: None,
            email: None,
            picture: None,
            access_token: "cloud-token".into(),
            role: None,
            github_access_token: None,
            github_username: None,
        }
    }

    #[tokio::test]
    async fn butler_api_needs_a_user() {
        let user = ReactiveCell::new();
        let ai = service(&[], &user);

        assert!(matches!(
            ai.resolve_backend().await,
            Err(AiError::ButlerApiRequiresLogin)
        ));
        assert!(!ai.validate_configuration().await);

        user.set(signed_in());
        match ai.resolve_backend().await.unwrap() {
            AiBackend::ButlerApi {
                access_token,
                model_kind,
                ..
            } => {
                assert_eq!(access_token, "cloud-token");
                assert_eq!(model_kind, ModelKind::OpenAi);
            }
            _ => panic!("expected the GitButler API backend"),
        }
    }

    #[tokio::test]
    async fn bring_your_own_key_uses_configured_provider() {
        let user = ReactiveCell::new();
        let ai = service(
            &[
                (MODEL_KIND_KEY, "anthropic"),
                (ANTHROPIC_KEY_OPTION_KEY, "bringYourOwn"),
                (ANTHROPIC_KEY_KEY, "sk-ant"),
            ],
            &user,
        );

        match ai.resolve_backend().await.unwrap() {
            AiBackend::Anthropic { api_key, model } => {
                assert_eq!(api_key, "sk-ant");
                assert_eq!(model, "claude-3-sonnet-20240229");
            }
            _ => panic!("expected the Anthropic backend"),
        }
        assert!(ai.validate_configuration().await);
    }

    #[tokio::test]
    async fn bring_your_own_key_without_key_is_invalid() {
        let user = ReactiveCell::new();
        let ai = service(&[(OPENAI_KEY_OPTION_KEY, "bringYourOwn")], &user);

        assert!(matches!(
            ai.resolve_backend().await,
            Err(AiError::MissingApiKey(ModelKind::OpenAi))
        ));
    }
}
