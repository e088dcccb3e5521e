pub mod config;
pub mod context;
pub mod extractor;
pub mod handlers;
pub mod humanize;
pub mod media;
pub mod observability;
pub mod pipeline;
