//! # HTTP Bridge
//!
//! HTTP abstraction boundary for the cleanup core.
//!
//! ## Overview
//!
//! This crate defines the contract between the networked components and the
//! actual HTTP stack. The [`HttpClient`](http::HttpClient) trait represents a
//! single capability: execute one request, return one response. Everything
//! above it (authentication headers, retry schedules, pagination, batching)
//! belongs to the callers, so every networked component can be driven by a
//! `mockall` double in tests.
//!
//! The production implementation is [`ReqwestHttpClient`](client::ReqwestHttpClient),
//! a thin adapter over a pooled `reqwest::Client`.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_http::{HttpClient, HttpMethod, HttpRequest, ReqwestHttpClient};
//!
//! let client = ReqwestHttpClient::new();
//! let request = HttpRequest::new(HttpMethod::Get, "https://api.spotify.com/v1/me")
//!     .bearer_token("token");
//! let response = client.execute(request).await?;
//! ```

pub mod client;
pub mod error;
pub mod http;

pub use client::ReqwestHttpClient;
pub use error::{HttpError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
