use serde::Deserialize;

use crate::dialog::DEFAULT_FALLBACK;

pub const ENV_PREFIX: &str = "PROFILE_ASSISTANT_";

pub const DEFAULT_GREETING: &str = "Hi! Need help editing your profile?";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// First assistant message of every conversation. An empty string
    /// disables it.
    pub greeting: Option<String>,
    pub fallback_message: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            greeting: Some(DEFAULT_GREETING.to_string()),
            fallback_message: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Reads `PROFILE_ASSISTANT_GREETING` and
    /// `PROFILE_ASSISTANT_FALLBACK_MESSAGE`, keeping defaults for unset keys.
    pub fn from_env() -> crate::Result<Self> {
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        Ok(config.normalized())
    }

    pub fn from_vars<I>(vars: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        Ok(config.normalized())
    }

    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    fn normalized(mut self) -> Self {
        self.greeting = self.greeting.filter(|g| !g.trim().is_empty());
        if self.fallback_message.trim().is_empty() {
            self.fallback_message = DEFAULT_FALLBACK.to_string();
        }
        self
    }
}
