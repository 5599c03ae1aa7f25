//! Typed CRUD facade over `Client` for one resource kind.
//!
//! # Design
//! A resource kind is described once through the `Resource` trait (its
//! collection path and its create/update payload type). `ResourceService`
//! then maps each operation to one verb call on the borrowed client, checks
//! the status the operation expects and decodes the body. Decode failures are
//! reported, never papered over with a default value.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::ApiError;
use crate::http::HttpResponse;

/// Server-assigned resource identifier.
pub type ResourceId = i64;

/// A predicate applied client-side by `ResourceService::list`.
pub type ListFilter<'f, R> = &'f dyn Fn(&R) -> bool;

/// Describes one kind of server-managed configuration object.
pub trait Resource: DeserializeOwned {
    /// Payload accepted by create and update.
    type Opts: Serialize;

    /// Collection path relative to the client's base URL.
    const BASE_PATH: &'static str;

    /// Human-readable kind, used in log events.
    const KIND: &'static str;
}

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;

/// CRUD operations for resource kind `R`, sharing a `Client` by reference.
pub struct ResourceService<'c, R> {
    client: &'c Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceService<'_, R> {}

impl<'c, R: Resource> ResourceService<'c, R> {
    pub fn new(client: &'c Client) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Path of a single resource: `<BASE_PATH>/<id>`.
    pub fn item_path(id: impl Display) -> String {
        format!("{}/{id}", R::BASE_PATH)
    }

    /// Creates a resource. Expects `201 Created`.
    pub fn create(&self, opts: &R::Opts) -> Result<R, ApiError> {
        let body = encode(opts)?;
        debug!(kind = R::KIND, body = %String::from_utf8_lossy(&body), "create request body");
        let resp = self.client.post(R::BASE_PATH, body)?;
        expect_status::<R>(&resp, STATUS_CREATED)?;
        decode(&resp)
    }

    /// Replaces the writable fields of resource `id`. Expects `200 OK`.
    pub fn update(&self, id: ResourceId, opts: &R::Opts) -> Result<R, ApiError> {
        let body = encode(opts)?;
        debug!(kind = R::KIND, id, body = %String::from_utf8_lossy(&body), "update request body");
        let resp = self.client.put(&Self::item_path(id), body)?;
        expect_status::<R>(&resp, STATUS_OK)?;
        decode(&resp)
    }

    /// Fetches resource `id`. Expects `200 OK`.
    pub fn get(&self, id: ResourceId) -> Result<R, ApiError> {
        let resp = self.client.get(&Self::item_path(id))?;
        expect_status::<R>(&resp, STATUS_OK)?;
        decode(&resp)
    }

    /// Deletes resource `id`. Expects `204 No Content`.
    pub fn delete(&self, id: ResourceId) -> Result<(), ApiError> {
        // A transport failure leaves no status to inspect; `?` returns first.
        let resp = self.client.delete(&Self::item_path(id))?;
        expect_status::<R>(&resp, STATUS_NO_CONTENT)
    }

    /// Fetches the whole collection and keeps the items every filter accepts.
    ///
    /// Filters run in the order given and stop at the first rejection. With no
    /// filters the collection is returned as the server sent it.
    pub fn list(&self, filters: &[ListFilter<'_, R>]) -> Result<Vec<R>, ApiError> {
        let resp = self.client.get(R::BASE_PATH)?;
        expect_status::<R>(&resp, STATUS_OK)?;
        let all: Vec<R> = decode(&resp)?;
        Ok(retain_matching(all, filters))
    }
}

/// Keeps the items for which every filter returns true, preserving order.
pub fn retain_matching<R>(items: Vec<R>, filters: &[ListFilter<'_, R>]) -> Vec<R> {
    items
        .into_iter()
        .filter(|item| filters.iter().all(|accept| accept(item)))
        .collect()
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(ApiError::Serialization)
}

fn decode<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&resp.body).map_err(ApiError::Deserialization)
}

fn expect_status<R: Resource>(resp: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if resp.status == expected {
        return Ok(());
    }
    let body = resp.body_text();
    warn!(kind = R::KIND, expected, got = resp.status, %body, "unexpected HTTP status");
    Err(ApiError::UnexpectedStatus {
        expected,
        got: resp.status,
        body,
    })
}
