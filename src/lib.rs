//! Expands a free-text idea into a detailed English prompt with Gemini, asks a
//! `sora-image` chat endpoint to draw it, and serves the result as a single page.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod upstream;

pub use config::Config;
pub use error::{RelayError, Result, Service};
pub use models::RenderContext;
pub use pipeline::{Outcome, Pipeline};
pub use upstream::{
    ImageClient, ImageRequester, ParenthesizedUrls, PromptExpander, TextClient, UrlExtractor,
};
