//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use tempfile::TempDir;
use textboard::config::BoardConfig;
use textboard::lifecycle::{preflight, Shutdown};
use textboard::HttpServer;

/// A running board on an ephemeral port with its own storage directory.
pub struct TestBoard {
    pub addr: SocketAddr,
    pub posts_path: PathBuf,
    pub shutdown: Shutdown,
    _dir: TempDir,
}

impl TestBoard {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Stored post texts, newest first, read straight from the file.
    pub fn stored_texts(&self) -> Vec<String> {
        let raw = std::fs::read_to_string(&self.posts_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["text"].as_str().unwrap().to_string())
            .collect()
    }
}

impl Drop for TestBoard {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a board; `tweak` adjusts the default config first.
pub async fn start_board(tweak: impl FnOnce(&mut BoardConfig)) -> TestBoard {
    let dir = tempfile::tempdir().unwrap();
    let mut config = BoardConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.storage.posts_path = dir.path().join("posts.json").display().to_string();
    config.observability.log_path = dir.path().join("error.txt").display().to_string();
    tweak(&mut config);

    let store = preflight(&config).unwrap();
    let posts_path = store.path().to_path_buf();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestBoard {
        addr,
        posts_path,
        shutdown,
        _dir: dir,
    }
}

/// Client that does not follow redirects, so the 303 is observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// One browser-like visitor: a session cookie and the CSRF token from its form.
pub struct Visitor {
    pub client: reqwest::Client,
    pub cookie: String,
    pub csrf_token: String,
}

impl Visitor {
    /// Load the page once to obtain a session.
    pub async fn arrive(board: &TestBoard) -> Self {
        let client = client();
        let res = client.get(board.url()).send().await.expect("board unreachable");
        assert_eq!(res.status(), 200);

        let cookie = res
            .headers()
            .get(SET_COOKIE)
            .expect("first visit must start a session")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let csrf_token = extract_csrf_token(&res.text().await.unwrap());

        Self {
            client,
            cookie,
            csrf_token,
        }
    }

    #[allow(dead_code)]
    pub async fn page(&self, board: &TestBoard) -> String {
        self.client
            .get(board.url())
            .header(COOKIE, &self.cookie)
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }

    /// Submit `text` with this visitor's own token.
    pub async fn post(&self, board: &TestBoard, text: &str) -> reqwest::Response {
        let token = self.csrf_token.clone();
        self.post_with_token(board, text, &token).await
    }

    pub async fn post_with_token(
        &self,
        board: &TestBoard,
        text: &str,
        token: &str,
    ) -> reqwest::Response {
        self.client
            .post(board.url())
            .header(COOKIE, &self.cookie)
            .form(&[("text", text), ("csrf_token", token)])
            .send()
            .await
            .unwrap()
    }

    /// Post a raw body with an explicit content type.
    #[allow(dead_code)]
    pub async fn post_raw(&self, board: &TestBoard, content_type: &str, body: &'static str) -> reqwest::Response {
        self.client
            .post(board.url())
            .header(COOKIE, &self.cookie)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .unwrap()
    }
}

pub fn extract_csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("form has a csrf token") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_string()
}
