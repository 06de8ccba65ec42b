//! Multi-call workflows
//!
//! Convenience functions chaining several endpoint calls the way the API is
//! normally driven: train a model from a selfie, then page through the
//! avatars generated on it.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::types::ensure_image_exists;
use crate::api::{DEFAULT_GENDER, MyMoodClient, OrderRequest};
use crate::error::{Error, Result};

/// Upper bound on avatar pages fetched by [`collect_model_avatars`]
pub const MAX_AVATAR_PAGES: u32 = 500;

/// Inputs for [`train_model`]
#[derive(Debug, Clone)]
pub struct TrainModelRequest {
    pub styles: Vec<u64>,
    pub gender: u32,
    pub image_path: PathBuf,
}

impl TrainModelRequest {
    pub fn new(image_path: impl Into<PathBuf>, styles: Vec<u64>) -> Self {
        Self {
            styles,
            gender: DEFAULT_GENDER,
            image_path: image_path.into(),
        }
    }

    pub fn with_gender(mut self, gender: u32) -> Self {
        self.gender = gender;
        self
    }
}

/// Result of a successfully launched training
#[derive(Debug, Clone)]
pub struct TrainingStarted {
    /// Order id of the new model
    pub model_id: u64,
    /// Response of the training image upload
    pub upload: Value,
    /// Response of the run request
    pub run: Value,
}

/// Create a model, attach a training image to it and start training
///
/// The image path is checked before the model is created so a typo does not
/// leave an empty model order behind.
pub async fn train_model(
    client: &MyMoodClient,
    request: &TrainModelRequest,
) -> Result<TrainingStarted> {
    ensure_image_exists(&request.image_path).await?;

    info!(
        styles = request.styles.len(),
        gender = request.gender,
        "Creating model"
    );
    let model = client
        .create_model(&OrderRequest::model(request.styles.clone(), request.gender))
        .await?;

    let model_id = model.get("id").and_then(Value::as_u64).ok_or_else(|| {
        Error::InvalidResponse(format!("model creation response has no numeric id: {}", model))
    })?;

    let upload = client
        .upload_training_image(model_id, &request.image_path, Some(request.gender))
        .await?;
    debug!(model_id, "Training image uploaded");

    let run = client.run_order(model_id).await?;
    info!(model_id, "Model training started");

    Ok(TrainingStarted {
        model_id,
        upload,
        run,
    })
}

/// Fetch every avatar of a model, page by page from page 1
///
/// Stops at the first page without items, or after [`MAX_AVATAR_PAGES`].
pub async fn collect_model_avatars(client: &MyMoodClient, model_id: u64) -> Result<Vec<Value>> {
    collect_model_avatars_with_limit(client, model_id, MAX_AVATAR_PAGES).await
}

/// [`collect_model_avatars`] with a caller-chosen page limit
pub async fn collect_model_avatars_with_limit(
    client: &MyMoodClient,
    model_id: u64,
    max_pages: u32,
) -> Result<Vec<Value>> {
    let mut avatars = Vec::new();

    for page in 1..=max_pages {
        let response = client.list_model_avatars(model_id, page).await?;
        let items = extract_items(&response, "avatars");
        if items.is_empty() {
            debug!(model_id, page, "No more avatars");
            return Ok(avatars);
        }
        avatars.extend(items);
    }

    warn!(
        model_id,
        pages = max_pages,
        "Stopped collecting avatars at page limit"
    );
    Ok(avatars)
}

/// Items of a listing response
///
/// Listings come either as an object holding an array under `key` or as a
/// bare array. Anything else yields no items.
pub fn extract_items(response: &Value, key: &str) -> Vec<Value> {
    match response {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
