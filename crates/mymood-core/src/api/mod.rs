//! MyMoodAI API client
//!
//! Thin async client over the REST API:
//! - Order and model creation
//! - Training image upload and selection
//! - Order status and run
//! - Style, order, model and avatar listings

mod client;
mod endpoints;
pub mod types;

pub use client::{MyMoodClient, MyMoodClientBuilder};
pub use types::{
    Attachment, DEFAULT_GENDER, OrderRequest, detect_image_mime_type, encode_data_uri,
    style_display_name, style_preview_image,
};
