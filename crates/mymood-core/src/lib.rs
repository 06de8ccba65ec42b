//! MyMood Core Library
//!
//! Client for the MyMoodAI image generation API, including:
//! - One async method per REST endpoint (orders, models, training images,
//!   styles, avatars)
//! - Environment based configuration
//! - Workflows chaining several calls (model training, avatar paging)
//!
//! ```no_run
//! use mymood_core::{MyMoodClient, OrderRequest};
//!
//! # async fn example() -> mymood_core::Result<()> {
//! let client = MyMoodClient::new("https://api.mymoodai.app/rest/api", Some("API_KEY".into()))?;
//!
//! let model = client.create_model(&OrderRequest::model(vec![112, 5, 2572], 1)).await?;
//! let model_id = model["id"].as_u64().unwrap_or_default();
//!
//! client.upload_training_image(model_id, "selfie.jpg", None).await?;
//! client.run_order(model_id).await?;
//! println!("{}", client.get_order_status(model_id).await?);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod workflows;

pub use api::{MyMoodClient, MyMoodClientBuilder, OrderRequest};
pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{Attachment, MyMoodClient, OrderRequest};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::workflows::{TrainModelRequest, collect_model_avatars, train_model};
}

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod error_tests;
