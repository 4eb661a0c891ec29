//! AI summarizer preferences stored in the user's git config under
//! `gitbutler.*` keys.

use std::sync::Arc;

use crate::services::git_config::GitConfig;

pub const MODEL_KIND_KEY: &str = "gitbutler.aiModelProvider";
pub const OPENAI_KEY_OPTION_KEY: &str = "gitbutler.aiOpenAIKeyOption";
pub const OPENAI_MODEL_NAME_KEY: &str = "gitbutler.aiOpenAIModelName";
pub const OPENAI_KEY_KEY: &str = "gitbutler.aiOpenAIKey";
pub const ANTHROPIC_KEY_OPTION_KEY: &str = "gitbutler.aiAnthropicKeyOption";
pub const ANTHROPIC_MODEL_NAME_KEY: &str = "gitbutler.aiAnthropicModelName";
pub const ANTHROPIC_KEY_KEY: &str = "gitbutler.aiAnthropicKey";
pub const DIFF_LENGTH_LIMIT_KEY: &str = "gitbutler.diffLengthLimit";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_DIFF_LENGTH_LIMIT: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    OpenAi,
    Anthropic,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::OpenAi => "openai",
            ModelKind::Anthropic => "anthropic",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "openai" => Some(ModelKind::OpenAi),
            "anthropic" => Some(ModelKind::Anthropic),
            _ => None,
        }
    }
}

/// Where the API key for a provider comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOption {
    /// Requests go through the GitButler cloud with the user's session.
    ButlerApi,
    /// The user supplies their own provider key.
    BringYourOwn,
}

impl KeyOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyOption::ButlerApi => "butlerAPI",
            KeyOption::BringYourOwn => "bringYourOwn",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "butlerAPI" => Some(KeyOption::ButlerApi),
            "bringYourOwn" => Some(KeyOption::BringYourOwn),
            _ => None,
        }
    }
}

/// Typed view over the summarizer keys in git config.
#[derive(Debug, Clone)]
pub struct SummarizerSettings {
    git_config: Arc<GitConfig>,
}

impl SummarizerSettings {
    pub fn new(git_config: Arc<GitConfig>) -> Self {
        Self { git_config }
    }

    /// Defaults to OpenAI when unset or unrecognised.
    pub async fn model_kind(&self) -> anyhow::Result<ModelKind> {
        Ok(self
            .git_config
            .get(MODEL_KIND_KEY)
            .await?
            .as_deref()
            .and_then(ModelKind::parse)
            .unwrap_or(ModelKind::OpenAi))
    }

    pub async fn set_model_kind(&self, kind: ModelKind) -> anyhow::Result<()> {
        self.git_config.set(MODEL_KIND_KEY, kind.as_str()).await
    }

    /// Defaults to the GitButler API when unset.
    pub async fn key_option(&self, kind: ModelKind) -> anyhow::Result<KeyOption> {
        let key = match kind {
            ModelKind::OpenAi => OPENAI_KEY_OPTION_KEY,
            ModelKind::Anthropic => ANTHROPIC_KEY_OPTION_KEY,
        };
        Ok(self
            .git_config
            .get(key)
            .await?
            .as_deref()
            .and_then(KeyOption::parse)
            .unwrap_or(KeyOption::ButlerApi))
    }

    pub async fn set_key_option(&self, kind: ModelKind, option: KeyOption) -> anyhow::Result<()> {
        let key = match kind {
            ModelKind::OpenAi => OPENAI_KEY_OPTION_KEY,
            ModelKind::Anthropic => ANTHROPIC_KEY_OPTION_KEY,
        };
        self.git_config.set(key, option.as_str()).await
    }

    /// User-supplied key for `kind`, ignoring blank values.
    pub async fn api_key(&self, kind: ModelKind) -> anyhow::Result<Option<String>> {
        let key = match kind {
            ModelKind::OpenAi => OPENAI_KEY_KEY,
            ModelKind::Anthropic => ANTHROPIC_KEY_KEY,
        };
        Ok(self
            .git_config
            .get(key)
            .await?
            .filter(|value| !value.trim().is_empty()))
    }

    pub async fn set_api_key(&self, kind: ModelKind, value: &str) -> anyhow::Result<()> {
        let key = match kind {
            ModelKind::OpenAi => OPENAI_KEY_KEY,
            ModelKind::Anthropic => ANTHROPIC_KEY_KEY,
        };
        self.git_config.set(key, value).await
    }

    pub async fn model_name(&self, kind: ModelKind) -> anyhow::Result<String> {
        let (key, default) = match kind {
            ModelKind::OpenAi => (OPENAI_MODEL_NAME_KEY, DEFAULT_OPENAI_MODEL),
            ModelKind::Anthropic => (ANTHROPIC_MODEL_NAME_KEY, DEFAULT_ANTHROPIC_MODEL),
        };
        Ok(self
            .git_config
            .get(key)
            .await?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// Maximum diff length sent to the model. Non-numeric values fall back
    /// to the default.
    pub async fn diff_length_limit(&self) -> anyhow::Result<usize> {
        Ok(self
            .git_config
            .get(DIFF_LENGTH_LIMIT_KEY)
            .await?
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_DIFF_LENGTH_LIMIT))
    }

    pub async fn set_diff_length_limit(&self, limit: usize) -> anyhow::Result<()> {
        self.git_config
            .set(DIFF_LENGTH_LIMIT_KEY, &limit.to_string())
            .await
    }
}
