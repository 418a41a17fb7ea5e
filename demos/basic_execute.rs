//! Basic execution
//!
//! Sends one request and prints the classified response.
//!
//! ```bash
//! RUST_LOG=apiwire=debug cargo run --example basic_execute -- https://httpbin.org/post
//! ```

use apiwire::{
    ExecutorConfig, LoggingInterceptor, Method, RequestDescriptor, RequestExecutor,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apiwire=info")),
        )
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org/post".to_string());

    let executor = RequestExecutor::new(ExecutorConfig::default())?
        .with_interceptor(Arc::new(LoggingInterceptor));

    let descriptor = RequestDescriptor::builder(Method::Post, url)
        .header("Accept", "application/json")
        .form_param("greeting", "hello world")
        .build()?;

    let response = executor.execute_text(&descriptor).await?;
    println!("{} ({})", response.status_code, response.status);
    if let Some(text) = response.text() {
        println!("{text}");
    }
    Ok(())
}
