//! Upload a file to a running gateway and list its catalog.
//!
//! ```text
//! cargo run -p shelf-gateway -- --memory-store &
//! cargo run --example upload_demo -- ./photo.png docs
//! ```

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: upload_demo <file> [catalog]")?;
    let catalog = args.next().unwrap_or_default();
    let gateway = std::env::var("SHELF_URL").unwrap_or_else(|_| "http://127.0.0.1:8787".to_string());

    let filename = Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .context("file has no name")?
        .to_string();
    let content = tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading {}", path))?;

    println!("=== Shelf upload demo ===\n");
    println!("Uploading {} ({} bytes) to catalog {:?}", filename, content.len(), catalog);

    let form = Form::new()
        .part("file", Part::bytes(content).file_name(filename))
        .text("catalog", catalog.clone());
    let client = reqwest::Client::new();
    let uploaded: Value = client
        .post(format!("{}/", gateway))
        .multipart(form)
        .send()
        .await?
        .json()
        .await?;
    println!("{}", serde_json::to_string_pretty(&uploaded)?);

    let listing: Value = client
        .get(format!("{}/list", gateway))
        .query(&[("catalog", catalog.as_str())])
        .send()
        .await?
        .json()
        .await?;
    println!("\nListing:\n{}", serde_json::to_string_pretty(&listing)?);

    Ok(())
}
