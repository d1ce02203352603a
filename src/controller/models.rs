//! Model provider selection.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use super::{ConversationController, ControllerError, Outcome, ValidationError};
use crate::net::types::{ModelSettingsReply, ModelSettingsRequest, Provider};
use crate::net::{ChatService, ServiceError};
use crate::state::models::DEFAULT_GEMINI_MODEL;

/// Raw values from the model settings form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSettingsForm {
    pub provider: Provider,
    /// Falls back to the remembered selection for the provider.
    pub model_name: Option<String>,
    pub api_key: Option<String>,
}

/// A validated settings change ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSettingsUpdate {
    pub provider: Provider,
    pub model_name: String,
    pub api_key: Option<String>,
}

impl ModelSettingsUpdate {
    #[must_use]
    pub fn request(&self) -> ModelSettingsRequest<'_> {
        ModelSettingsRequest {
            provider: self.provider,
            model_name: &self.model_name,
            api_key: self.api_key.as_deref(),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

impl ConversationController {
    /// Reconcile the local model list.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed.
    pub fn complete_refresh_models(&mut self, result: Result<Vec<String>, ServiceError>) -> Result<Outcome, ControllerError> {
        match result {
            Ok(names) => {
                self.state.models.set_ollama_models(names);
                Ok(Outcome::Applied)
            }
            Err(err) => Err(self.fail("Could not load local models.", err)),
        }
    }

    /// Fetch the locally available Ollama models.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn refresh_models<S>(&mut self, service: &S) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let result = service.list_ollama_models().await;
        self.complete_refresh_models(result)
    }

    /// Validate a settings form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyApiKey`] for Gemini without a key, or
    /// [`ValidationError::NoModelSelected`] for Ollama without a model.
    pub fn begin_update_model_settings(
        &mut self,
        form: ModelSettingsForm,
    ) -> Result<ModelSettingsUpdate, ControllerError> {
        let models = &self.state.models;
        let model_name = non_blank(form.model_name.as_deref())
            .or_else(|| non_blank(models.selection(form.provider)));

        match form.provider {
            Provider::Gemini => {
                let Some(api_key) = non_blank(form.api_key.as_deref()) else {
                    return Err(self.reject(ValidationError::EmptyApiKey));
                };
                Ok(ModelSettingsUpdate {
                    provider: Provider::Gemini,
                    model_name: model_name.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
                    api_key: Some(api_key),
                })
            }
            Provider::Ollama => {
                let Some(model_name) = model_name else {
                    return Err(self.reject(ValidationError::NoModelSelected));
                };
                Ok(ModelSettingsUpdate { provider: Provider::Ollama, model_name, api_key: None })
            }
        }
    }

    /// Reconcile an `update_model_settings` reply.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed.
    pub fn complete_update_model_settings(
        &mut self,
        update: ModelSettingsUpdate,
        result: Result<ModelSettingsReply, ServiceError>,
    ) -> Result<Outcome, ControllerError> {
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => return Err(self.fail("Could not update model settings.", err)),
        };
        self.state
            .models
            .mark_applied(update.provider, &update.model_name);
        let text = reply.message.unwrap_or_else(|| {
            format!("Now using {} model {}", update.provider.as_str(), update.model_name)
        });
        self.state.notices.info(text);
        Ok(Outcome::Applied)
    }

    /// Apply a new provider/model on the backend.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the service error.
    pub async fn update_model_settings<S>(
        &mut self,
        service: &S,
        form: ModelSettingsForm,
    ) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let update = self.begin_update_model_settings(form)?;
        let result = service.update_model_settings(&update.request()).await;
        self.complete_update_model_settings(update, result)
    }
}
