// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Mock batch intake for end-to-end run loop tests

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// How the mock intake answers requests
#[derive(Clone, Debug)]
pub struct IntakeBehavior {
    /// Status code for every served response
    pub status: u16,
    /// Body for every served response
    pub body: String,
    /// Close this many leading connections without a response, so the
    /// client sees transport failures before service resumes
    pub refuse_first: usize,
    /// Close the connection carrying this 1-based request ordinal without
    /// a response; earlier and later requests are served normally
    pub refuse_at: Option<usize>,
    /// After serving this many requests, close every further connection
    /// without a response
    pub max_requests: Option<usize>,
}

impl Default for IntakeBehavior {
    fn default() -> Self {
        IntakeBehavior {
            status: 202,
            body: r#"{"accepted":true}"#.to_string(),
            refuse_first: 0,
            refuse_at: None,
            max_requests: None,
        }
    }
}

#[derive(Clone)]
pub struct MockIntake {
    pub addr: SocketAddr,
    pub received_requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockIntake {
    /// Start a mock intake that accepts every batch with a 202
    pub async fn start() -> Self {
        Self::start_with(IntakeBehavior::default()).await
    }

    /// Start a mock intake with the given behavior on a random port
    pub async fn start_with(behavior: IntakeBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock intake");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let received_requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = received_requests.clone();
        let served = Arc::new(AtomicUsize::new(0));
        let attempts = Arc::new(AtomicUsize::new(0));

        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };

                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt <= behavior.refuse_first || behavior.refuse_at == Some(attempt) {
                    drop(stream);
                    continue;
                }
                if behavior
                    .max_requests
                    .is_some_and(|max| served.load(Ordering::SeqCst) >= max)
                {
                    drop(stream);
                    continue;
                }

                let io = TokioIo::new(stream);
                let requests = requests_clone.clone();
                let served = served.clone();
                let behavior = behavior.clone();

                tokio::spawn(async move {
                    let service = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let requests = requests.clone();
                        let served = served.clone();
                        let behavior = behavior.clone();
                        async move {
                            // Capture the request
                            let method = req.method().to_string();
                            let path = req.uri().path().to_string();
                            let headers: Vec<(String, String)> = req
                                .headers()
                                .iter()
                                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                                .collect();

                            let body_bytes = req
                                .into_body()
                                .collect()
                                .await
                                .map(|collected| collected.to_bytes().to_vec())
                                .unwrap_or_default();

                            requests.lock().unwrap().push(ReceivedRequest {
                                method,
                                path,
                                headers,
                                body: body_bytes,
                            });
                            served.fetch_add(1, Ordering::SeqCst);

                            // Close the connection after each response so
                            // every request reconnects; refusals above then
                            // apply per request, not per connection.
                            Ok::<_, hyper::http::Error>(
                                Response::builder()
                                    .status(behavior.status)
                                    .header("content-type", "application/json")
                                    .header("connection", "close")
                                    .body(Full::new(Bytes::from(behavior.body.clone())))
                                    .unwrap(),
                            )
                        }
                    });

                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(io, service)
                        .await;
                });
            }
        });

        MockIntake {
            addr,
            received_requests,
        }
    }

    /// Get the URL of the batch endpoint on the mock intake
    pub fn url(&self) -> String {
        format!("http://{}/api/v1/logs/batch", self.addr)
    }

    /// Get all received requests
    pub fn get_requests(&self) -> Vec<ReceivedRequest> {
        self.received_requests.lock().unwrap().clone()
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.received_requests.lock().unwrap().len()
    }
}
