//! Synchronous client for the ITM configuration API.
//!
//! # Overview
//! `Client` is the transport: it owns the base URL, the user agent and a
//! pluggable `HttpExecutor`, and turns `get`/`post`/`put`/`delete` on a
//! relative path into one round trip returning status and body.
//! `ResourceService` layers typed CRUD on top for one resource kind; the
//! Platform resource is `client.platforms()`.
//!
//! # Design
//! - Configuration is fixed at construction; `Client` is `Clone + Send + Sync`.
//! - Status codes are checked per operation (201 create, 200 get/update/list,
//!   204 delete), never in the transport.
//! - No retries, caching or pagination; each call is a single attempt.
//! - The default executor is a `ureq` agent; tests swap in closures.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod platform;
pub mod service;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::ApiError;
pub use http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse, StreamedResponse, TransportError, UreqExecutor};
pub use platform::{JsonObject, Platform, PlatformOpts, PlatformService, PLATFORM_BASE_PATH};
pub use service::{ListFilter, Resource, ResourceId, ResourceService};
