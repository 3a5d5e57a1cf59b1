use std::sync::Arc;
use nt_core::{Error, Result};

pub mod deepseek;
pub mod dummy;
pub mod placeholder;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;
pub use placeholder::PlaceholderModel;
pub use nt_core::InferenceModel;

use crate::Config;

pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_default();
    let model_name = config.model_name.clone().unwrap_or_else(|| crate::DEFAULT_MODEL.to_string());

    let model: Arc<dyn InferenceModel> = match model_name.to_lowercase().as_str() {
        "placeholder" => Arc::new(PlaceholderModel::new()),
        "dummy" => Arc::new(DummyModel::new(Some(config)).await?),
        "deepseek" => Arc::new(DeepSeekModel::new(config.api_key.clone(), config.model_url.clone())?),
        other => return Err(Error::Config(format!("Unknown inference model: {}", other))),
    };
    tracing::debug!("Created inference model {}", model.name());
    Ok(model)
}
