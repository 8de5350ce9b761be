use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};
use service::{identity::StaticIdentity, registry::BackendRegistry};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let registry = Arc::new(BackendRegistry::new(Arc::new(StaticIdentity::default()), 100));
    let state = AppState {
        registry,
        default_account_id: "123456789012".into(),
        default_region: "us-east-1".into(),
    };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_mesh_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create: version 1, ACTIVE
    let res = c.post(format!("{}/v1/mesh/CreateMesh", app.base_url))
        .json(&json!({"meshName": "m1", "spec": {"egressFilter": {"type": "ALLOW_ALL"}}}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["mesh"]["metadata"]["version"], 1);
    assert_eq!(body["mesh"]["status"]["status"], "ACTIVE");

    // Update with a new spec: version 2
    let res = c.post(format!("{}/v1/mesh/UpdateMesh", app.base_url))
        .json(&json!({"meshName": "m1", "spec": {"egressFilter": {"type": "DROP_ALL"}}}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["mesh"]["metadata"]["version"], 2);
    assert_eq!(body["mesh"]["spec"]["egressFilter"]["type"], "DROP_ALL");

    // Delete returns the terminal snapshot
    let res = c.post(format!("{}/v1/mesh/DeleteMesh", app.base_url))
        .json(&json!({"meshName": "m1"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["mesh"]["status"]["status"], "DELETED");

    // Describe after delete: structured not-found error
    let res = c.post(format!("{}/v1/mesh/DescribeMesh", app.base_url))
        .json(&json!({"meshName": "m1"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "ResourceNotFoundException");
    assert!(body["message"].as_str().unwrap_or_default().contains("m1"));
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_mesh_is_conflict() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/v1/mesh/CreateMesh", app.base_url))
        .json(&json!({"meshName": "dup"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.post(format!("{}/v1/mesh/CreateMesh", app.base_url))
        .json(&json!({"meshName": "dup"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "ConflictException");
    Ok(())
}

#[tokio::test]
async fn e2e_user_listing_chains_tokens() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/v1/transfer/CreateServer", app.base_url))
        .json(&json!({"Protocols": ["SFTP"]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let server_id = res.json::<Value>().await?["ServerId"]
        .as_str().expect("server id").to_string();

    for name in ["alice", "bob", "carol", "dave", "erin"] {
        let res = c.post(format!("{}/v1/transfer/CreateUser", app.base_url))
            .json(&json!({"ServerId": &server_id, "UserName": name}))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    // limit=2 three times: pages of 2, 2, 1 and a final absent token
    let mut sizes = Vec::new();
    let mut users = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let mut req = json!({"ServerId": &server_id, "MaxResults": 2});
        if let Some(t) = &token {
            req["NextToken"] = json!(t);
        }
        let res = c.post(format!("{}/v1/transfer/ListUsers", app.base_url))
            .json(&req)
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body = res.json::<Value>().await?;
        let page = body["Users"].as_array().expect("users array");
        sizes.push(page.len());
        users.extend(page.iter().map(|u| u["UserName"].as_str().unwrap_or_default().to_string()));
        match body.get("NextToken").and_then(|t| t.as_str()) {
            Some(t) => token = Some(t.to_string()),
            None => break,
        }
    }
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(users, vec!["alice", "bob", "carol", "dave", "erin"]);
    Ok(())
}

#[tokio::test]
async fn e2e_scopes_do_not_share_resources() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/v1/mesh/CreateMesh", app.base_url))
        .header("x-account-id", "111111111111")
        .json(&json!({"meshName": "scoped"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // default account does not see it
    let res = c.post(format!("{}/v1/mesh/ListMeshes", app.base_url))
        .json(&json!({}))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["meshes"].as_array().expect("meshes").len(), 0);

    // the creating account does
    let res = c.post(format!("{}/v1/mesh/ListMeshes", app.base_url))
        .header("x-account-id", "111111111111")
        .json(&json!({}))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["meshes"].as_array().expect("meshes").len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_operation_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/v1/mesh/RepaintMesh", app.base_url))
        .json(&json!({}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "UnknownOperationException");
    Ok(())
}

#[tokio::test]
async fn e2e_zero_limit_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/v1/mesh/ListMeshes", app.base_url))
        .json(&json!({"limit": 0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "ValidationException");
    Ok(())
}
