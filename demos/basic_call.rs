//! Basic example demonstrating simple GET and POST requests.
//!
//! This example shows how to:
//! - Build a transport and an executor
//! - Describe GET and POST requests
//! - Access the decoded entity and response metadata
//!
//! Run with: `cargo run --example basic_call`

use easyreq::{RequestDescriptor, RequestExecutor, ReqwestTransport};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("easyreq=debug,basic_call=info")
        .init();

    let transport = ReqwestTransport::builder()
        .timeout(Duration::from_secs(10))
        .default_header("User-Agent", "easyreq-demo/0.1")?
        .build()?;
    let executor = RequestExecutor::new(transport);

    println!("=== GET Request Example ===");
    let request = RequestDescriptor::get("https://jsonplaceholder.typicode.com/posts/1")?;
    let response = executor.execute::<Post>(&request).await?;

    println!("Post ID: {}", response.entity.id);
    println!("Title: {}", response.entity.title);
    println!("Status code: {}", response.status());
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };
    let request = RequestDescriptor::post("https://jsonplaceholder.typicode.com/posts")?
        .with_json_body(&new_post)?;
    let response = executor.execute::<Post>(&request).await?;

    println!("Created post ID: {}", response.id);
    println!("Title: {}", response.title);
    println!("Content-Type: {:?}", response.header("content-type"));

    Ok(())
}
