//! Shared helpers for integration tests.

#![allow(dead_code)]

use apiwire::execution::executors::WireRequest;
use apiwire::{HttpInterceptor, HttpRequestContext, WireError};
use reqwest::header::HeaderMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Interceptor that records every hook invocation.
#[derive(Default)]
pub struct RecordingInterceptor {
    pub attempts: Mutex<Vec<u32>>,
    pub statuses: Mutex<Vec<u16>>,
    pub retries: Mutex<Vec<(u16, u32, Duration)>>,
    pub errors: Mutex<Vec<WireError>>,
    pub request_ids: Mutex<Vec<String>>,
}

impl HttpInterceptor for RecordingInterceptor {
    fn on_before_send(&self, ctx: &HttpRequestContext, attempt: u32, _request: &WireRequest) {
        self.attempts.lock().unwrap().push(attempt);
        self.request_ids.lock().unwrap().push(ctx.request_id.clone());
    }

    fn on_response(&self, _ctx: &HttpRequestContext, status: u16, _headers: &HeaderMap) {
        self.statuses.lock().unwrap().push(status);
    }

    fn on_retry(&self, _ctx: &HttpRequestContext, status: u16, retries_left: u32, delay: Duration) {
        self.retries.lock().unwrap().push((status, retries_left, delay));
    }

    fn on_error(&self, _ctx: &HttpRequestContext, error: &WireError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

/// Multipart body as text, for substring assertions.
pub fn body_text(request: &wiremock::Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// One-shot server answering `200` with the ten-byte body `helloworld`.
///
/// It waits `head_delay` before writing the headers and the first five bytes,
/// then waits `body_delay` before writing the rest.
pub async fn stalling_server(head_delay: Duration, body_delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;

        tokio::time::sleep(head_delay).await;
        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/octet-stream\r\ncontent-length: 10\r\n\r\nhello";
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        let _ = socket.flush().await;

        tokio::time::sleep(body_delay).await;
        let _ = socket.write_all(b"world").await;
        let _ = socket.flush().await;
    });
    addr
}
