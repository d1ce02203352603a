//! Model-provider settings with a remembered model per provider.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use std::collections::HashMap;

use crate::net::types::Provider;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Provider and model the backend last confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedModel {
    pub provider: Provider,
    pub model_name: String,
}

#[derive(Clone, Debug)]
pub struct ModelSettingsState {
    /// Provider currently selected in the settings form.
    pub provider: Provider,
    selections: HashMap<Provider, String>,
    ollama_models: Vec<String>,
    applied: Option<AppliedModel>,
}

impl Default for ModelSettingsState {
    fn default() -> Self {
        let mut selections = HashMap::new();
        selections.insert(Provider::Gemini, DEFAULT_GEMINI_MODEL.to_owned());
        Self {
            provider: Provider::Gemini,
            selections,
            ollama_models: Vec::new(),
            applied: None,
        }
    }
}

impl ModelSettingsState {
    #[must_use]
    pub fn selection(&self, provider: Provider) -> Option<&str> {
        self.selections.get(&provider).map(String::as_str)
    }

    pub fn select_model(&mut self, provider: Provider, model_name: &str) {
        self.provider = provider;
        self.selections.insert(provider, model_name.to_owned());
    }

    #[must_use]
    pub fn ollama_models(&self) -> &[String] {
        &self.ollama_models
    }

    /// Store the local model list. The remembered Ollama selection is kept when
    /// still listed, otherwise replaced by the first listed model (or cleared).
    pub fn set_ollama_models(&mut self, names: Vec<String>) {
        let keep = self
            .selections
            .get(&Provider::Ollama)
            .is_some_and(|current| names.contains(current));
        if !keep {
            match names.first() {
                Some(first) => {
                    self.selections.insert(Provider::Ollama, first.clone());
                }
                None => {
                    self.selections.remove(&Provider::Ollama);
                }
            }
        }
        self.ollama_models = names;
    }

    #[must_use]
    pub fn applied(&self) -> Option<&AppliedModel> {
        self.applied.as_ref()
    }

    pub fn mark_applied(&mut self, provider: Provider, model_name: &str) {
        self.select_model(provider, model_name);
        self.applied = Some(AppliedModel { provider, model_name: model_name.to_owned() });
    }
}
