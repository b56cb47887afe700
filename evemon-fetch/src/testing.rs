//! In-memory transports for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::transport::{HttpResponse, Transport};

/// Replays a fixed list of outcomes, one per request.
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: AtomicUsize,
    bodies: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    fn next(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(request.body());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".to_string())))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        self.next(request)
    }

    fn send_blocking(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        self.next(request)
    }
}

/// Holds every async request until [`GatedTransport::release`] is called.
pub(crate) struct GatedTransport {
    gate: Notify,
    calls: AtomicUsize,
    body: Vec<u8>,
}

impl GatedTransport {
    pub(crate) fn new(body: &[u8]) -> Self {
        Self {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            body: body.to_vec(),
        }
    }

    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(HttpResponse::ok(self.body.clone()))
    }

    fn send_blocking(&self, _request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::ok(self.body.clone()))
    }
}
