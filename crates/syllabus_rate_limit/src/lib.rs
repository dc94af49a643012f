//! Configuration, rate limiting and retry for Syllabus capability calls.
//!
//! - [`SyllabusConfig`] loads the layered TOML configuration
//! - [`RateLimiter`] throttles calls to the text model
//! - [`RetryPolicy`] retries transient failures with a flat delay

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod retry;

pub use config::{
    DefaultsConfig, ImageConfig, ModelConfig, RetryConfig, SyllabusConfig, VideoConfig,
};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use retry::RetryPolicy;
