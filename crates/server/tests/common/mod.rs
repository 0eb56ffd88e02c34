//! # Common Test Utilities
//!
//! `TestApp` spawns a real server on a random port with a temporary SQLite
//! file, a temporary export path, and the text-generation endpoint pointed at
//! an `httpmock::MockServer`.

// Not every helper is used by every test file that includes this module.
#![allow(unused)]

use anyhow::Result;
use avethics::providers::ai::AiProvider;
use avethics_server::{
    config::{self, AppConfig},
    router,
    session::SESSION_HEADER,
    state::{build_app_state, build_app_state_with_provider, AppState},
};
use axum::serve;
use httpmock::MockServer;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, NamedTempFile, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

pub const GEMINI_PATH: &str = "/v1beta/models/text-bison-001:generateText";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub export_path: PathBuf,
    pub app_state: AppState,
    _db_file: NamedTempFile,
    _work_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Writes a config file for a fresh database and returns the loaded config.
fn test_config(mock_server: &MockServer, db_file: &NamedTempFile, work_dir: &TempDir) -> Result<AppConfig> {
    let config_path = work_dir.path().join("config.yml");
    let export_path = work_dir.path().join("exports").join("guidelines.txt");
    let config_content = format!(
        r#"
port: 0
db_url: "{}"
gemini_api_key: "test-api-key"
gemini_api_url: "{}"
export_path: "{}"
"#,
        db_file.path().display(),
        mock_server.url(GEMINI_PATH),
        export_path.display(),
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;

    Ok(config::get_config(Some(config_path.to_str().unwrap()))?)
}

impl TestApp {
    /// Spawns the server with the real Gemini provider aimed at the mock server.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let work_dir = tempdir()?;
        let config = test_config(&mock_server, &db_file, &work_dir)?;
        let app_state = build_app_state(config).await?;
        Self::spawn_with_state(app_state, mock_server, db_file, work_dir).await
    }

    /// Spawns the server around a scripted provider.
    pub async fn spawn_with_provider(ai_provider: Box<dyn AiProvider>) -> Result<Self> {
        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let work_dir = tempdir()?;
        let config = test_config(&mock_server, &db_file, &work_dir)?;
        let app_state = build_app_state_with_provider(config, ai_provider).await?;
        Self::spawn_with_state(app_state, mock_server, db_file, work_dir).await
    }

    async fn spawn_with_state(
        app_state: AppState,
        mock_server: MockServer,
        db_file: NamedTempFile,
        work_dir: TempDir,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let export_path = PathBuf::from(&app_state.config.export_path);
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            export_path,
            app_state: app_state_for_harness,
            _db_file: db_file,
            _work_dir: work_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    fn with_session(builder: RequestBuilder, session: Option<Uuid>) -> RequestBuilder {
        match session {
            Some(id) => builder.header(SESSION_HEADER, id.to_string()),
            None => builder,
        }
    }

    /// Sends a GET and returns the status and JSON body.
    pub async fn get_json(&self, path: &str, session: Option<Uuid>) -> Result<(u16, Value)> {
        let response = Self::with_session(self.client.get(self.url(path)), session)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }

    /// Sends a POST with a JSON body and returns the status and JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        session: Option<Uuid>,
        body: Value,
    ) -> Result<(u16, Value)> {
        let response = Self::with_session(self.client.post(self.url(path)), session)
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }

    /// Submits the User Details form and returns the new session id.
    pub async fn register(&self, name: &str) -> Result<Uuid> {
        let (status, body) = self
            .post_json(
                "/users",
                None,
                json!({
                    "name": name,
                    "age": 34,
                    "gender": "Female",
                    "knows_autonomous": "Yes"
                }),
            )
            .await?;
        anyhow::ensure!(status == 200, "registration failed: {body}");
        let session_id = body["result"]["data"]["session_id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("no session id in {body}"))?;
        Ok(Uuid::parse_str(session_id)?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
