use reqwest::{multipart, Client, StatusCode};
use serde_json::Value;
use shelf_gateway::{routes, AppState, GatewayConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

// Helper to spawn a server on a random port
async fn spawn_server(config: GatewayConfig) -> String {
    let state = Arc::new(AppState::new(config).await.unwrap());
    let app = routes::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn memory_config() -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        use_memory_store: true,
        ..Default::default()
    }
}

fn file_form(catalog: Option<&str>, filename: &str, content: &'static [u8]) -> multipart::Form {
    let part = multipart::Part::bytes(content).file_name(filename.to_string());
    let form = multipart::Form::new().part("file", part);
    match catalog {
        Some(catalog) => form.text("catalog", catalog.to_string()),
        None => form,
    }
}

async fn upload(client: &Client, base_url: &str, form: multipart::Form) -> (StatusCode, Value) {
    let res = client
        .post(format!("{}/", base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_greeting() {
    let base_url = spawn_server(memory_config()).await;

    let res = reqwest::get(format!("{}/", base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello Hono!");
}

#[tokio::test]
async fn test_upload_then_list() {
    let base_url = spawn_server(memory_config()).await;
    let client = Client::new();

    // 1. Upload into a catalog
    let (status, body) = upload(&client, &base_url, file_form(Some("docs"), "a.png", b"png-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["key"], "docs/a.png");
    assert_eq!(body["data"]["url"], "https://resource.jweboy.asia/docs/a.png");

    // 2. Upload at the root
    let (_, body) = upload(&client, &base_url, file_form(None, "b.txt", b"text")).await;
    assert_eq!(body["data"]["key"], "b.txt");

    // 3. Root listing folds the catalog
    let res = client.get(format!("{}/list", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listing: Value = res.json().await.unwrap();
    assert_eq!(listing["code"], 0);
    assert_eq!(listing["data"]["objects"][0]["key"], "b.txt");
    assert_eq!(listing["data"]["delimitedPrefixes"][0], "docs/");

    // 4. Catalog listing
    let res = client
        .get(format!("{}/list?catalog=docs/", base_url))
        .send()
        .await
        .unwrap();
    let listing: Value = res.json().await.unwrap();
    let objects = listing["data"]["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0]["key"], "docs/a.png");
    assert_eq!(objects[0]["size"], 5);
}

#[tokio::test]
async fn test_overwrite_is_last_write_wins() {
    let base_url = spawn_server(memory_config()).await;
    let client = Client::new();

    let (_, first) = upload(&client, &base_url, file_form(Some("docs"), "a.png", b"one")).await;
    let (_, second) = upload(&client, &base_url, file_form(Some("docs"), "a.png", b"three")).await;
    assert_eq!(first["success"], true);
    assert_eq!(second["success"], true);
    assert_ne!(first["data"]["version"], second["data"]["version"]);

    let listing: Value = client
        .get(format!("{}/list?catalog=docs/", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let objects = listing["data"]["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0]["size"], 5);
}

#[tokio::test]
async fn test_missing_file_field() {
    let base_url = spawn_server(memory_config()).await;
    let client = Client::new();

    let form = multipart::Form::new().text("catalog", "docs");
    let (status, body) = upload(&client, &base_url, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["msg"], "Oh no, that's too bad :(, missing file field.");
}

#[tokio::test]
async fn test_cors_preflight() {
    let base_url = spawn_server(memory_config()).await;
    let client = Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, format!("{}/", base_url))
        .header("Origin", "https://app.example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()["access-control-allow-origin"].to_str().unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_local_store_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let config = GatewayConfig {
        use_memory_store: false,
        data_dir: dir.path().to_path_buf(),
        ..memory_config()
    };
    let client = Client::new();

    let base_url = spawn_server(config.clone()).await;
    let (_, body) = upload(&client, &base_url, file_form(Some("keep"), "me.txt", b"kept")).await;
    assert_eq!(body["success"], true);

    // A second server over the same directory sees the object
    let base_url = spawn_server(config).await;
    let listing: Value = client
        .get(format!("{}/list?catalog=keep/", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["data"]["objects"][0]["key"], "keep/me.txt");
}
