// Watermark preview library

pub mod config;
pub mod constants;
pub mod gallery;
pub mod image_codec;
pub mod logging;
pub mod presentation;
pub mod resource;
pub mod server;
pub mod watermark;
