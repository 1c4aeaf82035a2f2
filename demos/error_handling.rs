//! Example demonstrating how each kind of failure is reported.
//!
//! Run with: `cargo run --example error_handling`

use easyreq::{ErrorEnvelope, Outcome, RequestDescriptor, RequestExecutor};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
}

fn report<T: std::fmt::Debug>(outcome: Outcome<T>) {
    match outcome {
        Ok(response) => println!("Success ({}): {:?}", response.status(), response.entity),
        Err(ErrorEnvelope::Connectivity(message)) => println!("Connectivity: {}", message),
        Err(ErrorEnvelope::ServerUnavailable(message)) => {
            println!("Server unavailable: {}", message)
        }
        Err(ErrorEnvelope::Decode(err)) => {
            println!("Decode failed (code {})!", easyreq::DecodeError::CODE);
            println!("  Status: {}", err.metadata.status);
            println!("  Error: {}", err.source);
            println!(
                "  Raw response (first 200 chars): {}",
                err.raw_body_lossy().chars().take(200).collect::<String>()
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("easyreq=info")
        .init();

    let executor = RequestExecutor::default();

    println!("=== Example 1: Non-success status ===");
    let request = RequestDescriptor::get("https://jsonplaceholder.typicode.com/posts/999999")?;
    report(executor.execute::<Post>(&request).await);
    println!();

    println!("=== Example 2: Body that does not match the type ===");
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct WrongSchema {
        nonexistent_field: String,
    }
    let request = RequestDescriptor::get("https://jsonplaceholder.typicode.com/posts/1")?;
    report(executor.execute::<WrongSchema>(&request).await);
    println!();

    println!("=== Example 3: No connection ===");
    let request = RequestDescriptor::get("http://127.0.0.1:9/unreachable")?;
    report(executor.execute::<Post>(&request).await);
    println!();

    println!("=== Example 4: Callback delivery ===");
    let request = RequestDescriptor::get("https://jsonplaceholder.typicode.com/posts/2")?;
    executor
        .execute_with(&request, |outcome: Outcome<Post>| report(outcome))
        .await?;

    Ok(())
}
