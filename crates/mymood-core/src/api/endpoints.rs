//! One method per remote endpoint
//!
//! Every call is a single request; responses are returned as parsed JSON
//! exactly as the API sent them.

use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};

use super::client::MyMoodClient;
use super::types::{DEFAULT_GENDER, encode_data_uri, ensure_image_exists};

impl MyMoodClient {
    // Order and model creation

    /// Create an order
    ///
    /// Generation orders reference a trained model through `parent`; see
    /// [`OrderRequest`](super::OrderRequest) for the usual payload.
    pub async fn create_order<T>(&self, payload: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        self.post("order/create", payload, Vec::new()).await
    }

    /// Create a model, i.e. a training order whose payload has `parent: 0`
    pub async fn create_model<T>(&self, payload: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        self.post("order/create/model", payload, Vec::new()).await
    }

    // Training images

    /// Upload a selfie to an order for training
    ///
    /// The file is sent inline as a base64 data URI. Fails with
    /// [`Error::ImageNotFound`] before any request if the path does not exist.
    /// `gender` defaults to [`DEFAULT_GENDER`].
    pub async fn upload_training_image(
        &self,
        order_id: u64,
        image_path: impl AsRef<Path>,
        gender: Option<u32>,
    ) -> Result<Value> {
        let image_path = image_path.as_ref();
        ensure_image_exists(image_path).await?;

        let image_bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| Error::ImageReadError(format!("{}: {}", image_path.display(), e)))?;

        debug!(
            order_id,
            path = %image_path.display(),
            size_bytes = image_bytes.len(),
            "Uploading training image"
        );

        let payload = json!({
            "gender": gender.unwrap_or(DEFAULT_GENDER).to_string(),
            "image": encode_data_uri(&image_bytes),
        });

        self.post(
            &format!("order/{}/training-images/upload", order_id),
            &payload,
            Vec::new(),
        )
        .await
    }

    /// List the training images attached to an order
    pub async fn list_training_images(&self, order_id: u64) -> Result<Value> {
        self.get(&format!("order/{}/training-images/list", order_id), &[])
            .await
    }

    /// Make a training image the order's main selfie
    pub async fn select_training_image(&self, order_id: u64, selfie_id: u64) -> Result<Value> {
        self.get(
            &format!("order/{}/training-images/{}/select", order_id, selfie_id),
            &[],
        )
        .await
    }

    // Order status and running

    /// Current status of an order
    pub async fn get_order_status(&self, order_id: u64) -> Result<Value> {
        self.get(&format!("order/{}/status", order_id), &[]).await
    }

    /// Launch training or processing of an order
    pub async fn run_order(&self, order_id: u64) -> Result<Value> {
        self.get(&format!("order/{}/run", order_id), &[]).await
    }

    // Listings

    /// One page of avatars generated on a model
    pub async fn list_model_avatars(&self, order_id: u64, page_id: u32) -> Result<Value> {
        self.get(&format!("model/{}/avatars/{}", order_id, page_id), &[])
            .await
    }

    /// Public style catalog
    pub async fn list_styles(&self) -> Result<Value> {
        self.get("styles/list", &[]).await
    }

    /// All orders
    pub async fn list_orders(&self) -> Result<Value> {
        self.get("order/list", &[]).await
    }

    /// All models
    pub async fn list_models(&self) -> Result<Value> {
        self.get("model/list", &[]).await
    }

    /// All orders placed on a model
    pub async fn list_model_orders(&self, order_id: u64) -> Result<Value> {
        self.get(&format!("model/{}/order/list", order_id), &[])
            .await
    }
}
