//! Infrastructure Layer
//!
//! HTTP implementations of the auth and member APIs, and the reissuing
//! request decorator.

pub mod dto;
pub mod http;
pub mod reissuing_client;

pub use http::{HttpAuthApi, HttpMemberApi};
pub use reissuing_client::ReissuingClient;
