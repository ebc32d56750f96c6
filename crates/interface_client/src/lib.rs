//! REST Adapter for the Claims Backend
//!
//! This crate connects the intake domain to the claims backend over HTTP:
//!
//! - **Client**: a `reqwest`-based implementation of
//!   [`domain_intake::ClaimIntakePort`] (JSON claim creation, multipart
//!   photo upload)
//! - **Config**: base URL and timeouts from the environment with local
//!   defaults
//! - **Health**: the `GET /health` probe consumed by the surrounding screens
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_client::{ClientConfig, IntakeApiClient};
//!
//! let client = IntakeApiClient::new(ClientConfig::from_env()?)?;
//! let health = client.check_health().await;
//! ```

pub mod client;
pub mod config;
pub mod dto;

pub use client::IntakeApiClient;
pub use config::ClientConfig;
pub use dto::{ClaimCreatedResponse, HealthResponse, HealthStatus};
