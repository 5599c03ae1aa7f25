//! Scripted executors for unit tests.

use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use crate::http::{HttpExecutor, HttpRequest, StreamedResponse, TransportError};

/// Replies with the request's headers encoded as a JSON array of pairs.
pub fn echo_headers(req: HttpRequest) -> Result<StreamedResponse, TransportError> {
    let body = serde_json::to_vec(&req.headers)?;
    Ok(StreamedResponse::from_bytes(200, body))
}

/// A body whose every read fails with the given message.
pub struct FailingReader {
    message: &'static str,
}

impl FailingReader {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other(self.message))
    }
}

/// Records every request and answers each with the same canned response.
#[derive(Clone)]
pub struct Recorder {
    status: u16,
    body: Vec<u8>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Recorder {
    pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request recorded")
    }

    /// The last request body parsed as JSON.
    pub fn last_json(&self) -> serde_json::Value {
        let body = self.last_request().body.expect("request had no body");
        serde_json::from_slice(&body).unwrap()
    }
}

impl HttpExecutor for Recorder {
    fn execute(&self, request: HttpRequest) -> Result<StreamedResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(StreamedResponse::from_bytes(self.status, self.body.clone()))
    }
}
