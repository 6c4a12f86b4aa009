pub mod ai_service;
pub mod image_service;
pub mod models;

pub use ai_service::{AiError, ImageGenerator, TextGenerator};
pub use image_service::{ImageError, ImageService};
pub use models::{GeneratedImage, GenerationSettings, SafetySetting};
