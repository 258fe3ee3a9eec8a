//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the client:
//! - HTTP request contract and the reqwest-backed API client
//! - Response envelope decoding and error classification
//! - Persisted token store (access / refresh / FCM tokens)
//! - Client configuration

pub mod config;
pub mod network;
pub mod token;

pub use config::ClientConfig;
pub use network::{ApiClient, HttpRequest, LocalRequestable, Requestable};
pub use token::{Token, TokenStore, TokenStoreError};
