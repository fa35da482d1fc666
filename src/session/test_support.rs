//! Shared helpers for session tests: a scripted transport and token
//! minting. No real network or browser is involved anywhere.

use std::cell::RefCell;
use std::rc::Rc;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::session::error::ApiError;
use crate::session::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Mint an unsigned JWT with the given subject and expiry.
pub fn token_with_exp(sub: i64, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        URL_SAFE_NO_PAD.encode(serde_json::json!({ "sub": sub, "exp": exp }).to_string());
    format!("{header}.{payload}.sig")
}

pub fn response(status: u16, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse { status, body: body.to_string() })
}

/// Transport test double.
///
/// Paths with a registered rule answer immediately; calls to any other
/// path park on a oneshot channel until the test resolves them, which
/// is how the single-flight and queueing properties are driven
/// deterministically.
pub struct MockTransport {
    calls: RefCell<Vec<ApiRequest>>,
    rules: RefCell<Vec<(String, Result<ApiResponse, ApiError>)>>,
    pending: RefCell<Vec<(String, oneshot::Sender<Result<ApiResponse, ApiError>>)>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            rules: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        })
    }

    /// Answer every call to `path` with `result`.
    pub fn respond(&self, path: &str, result: Result<ApiResponse, ApiError>) {
        self.rules.borrow_mut().push((path.to_owned(), result));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls.borrow().iter().filter(|r| r.path == path).count()
    }

    pub fn pending_count(&self, path: &str) -> usize {
        self.pending.borrow().iter().filter(|(p, _)| p == path).count()
    }

    /// Resolve the oldest parked call to `path`. Panics if none is parked.
    pub fn resolve_next(&self, path: &str, result: Result<ApiResponse, ApiError>) {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .position(|(p, _)| p == path)
            .unwrap_or_else(|| panic!("no pending call to {path}"));
        let (_, tx) = pending.remove(index);
        let _ = tx.send(result);
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        self.calls.borrow_mut().push(request.clone());

        let scripted = self
            .rules
            .borrow()
            .iter()
            .find(|(path, _)| *path == request.path)
            .map(|(_, result)| result.clone());

        match scripted {
            Some(result) => Box::pin(async move { result }),
            None => {
                let (tx, rx) = oneshot::channel();
                self.pending.borrow_mut().push((request.path, tx));
                Box::pin(async move {
                    rx.await
                        .unwrap_or_else(|_| Err(ApiError::Network("mock transport dropped".to_owned())))
                })
            }
        }
    }
}
