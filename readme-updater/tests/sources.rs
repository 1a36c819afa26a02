//! HTTP sources against a one-shot loopback server

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use readme_updater::config::{Credentials, GithubConfig};
use readme_updater::source::{DataSource, GithubRepoSource, TrackViewSource, Unavailable};

/// Serve one canned response; the handle yields the raw request head.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

fn github(api_base: &str) -> GithubConfig {
    GithubConfig {
        api_base: api_base.to_string(),
        ..GithubConfig::default()
    }
}

#[tokio::test]
async fn test_github_success_with_token() {
    let body = r#"{"name":"widget","description":null,"language":"Shell","stargazers_count":4,"forks_count":0,"updated_at":"2024-12-31T23:00:00Z"}"#;
    let (base, server) = serve_once("200 OK", body).await;

    let source = GithubRepoSource::with_client(client(), &github(&base), Some("secret".to_string()));
    let record = source.fetch("acme/widget").await.unwrap();

    assert_eq!(record.name, "widget");
    assert_eq!(record.description, "No description provided.");
    assert_eq!(record.language, "Shell");
    assert_eq!(record.stars, 4);
    assert_eq!(record.updated_at, "2024-12-31");

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /repos/acme/widget "));
    assert!(request.contains("authorization: bearer secret"));
    assert!(request.contains("accept: application/vnd.github+json"));
}

#[tokio::test]
async fn test_github_without_token_is_unauthenticated() {
    let (base, server) = serve_once("200 OK", r#"{"name":"widget"}"#).await;

    let source = GithubRepoSource::with_client(client(), &github(&base), None);
    assert!(source.fetch("acme/widget").await.is_ok());

    let request = server.await.unwrap().to_lowercase();
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn test_github_non_success_status() {
    let (base, _server) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;

    let source = GithubRepoSource::with_client(client(), &github(&base), None);
    assert_eq!(source.fetch("acme/missing").await, Err(Unavailable::Status(404)));
}

#[tokio::test]
async fn test_github_connection_refused() {
    // bind then drop to get a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let source = GithubRepoSource::with_client(client(), &github(&format!("http://127.0.0.1:{}", port)), None);
    assert!(matches!(
        source.fetch("acme/widget").await,
        Err(Unavailable::Transport(_))
    ));
}

#[tokio::test]
async fn test_track_view_first_row() {
    let body = r#"[{"track_name":"Intro","artist_name":"The xx","play_count":31}]"#;
    let (base, server) = serve_once("200 OK", body).await;

    let credentials = Credentials {
        github_token: None,
        supabase_url: Some(format!("{}/", base)),
        supabase_key: Some("anon-key".to_string()),
    };
    let source = TrackViewSource::with_client(client(), &credentials);
    let record = source.fetch("top_tracks_all_time").await.unwrap();

    assert_eq!(record.track_name, "Intro");
    assert_eq!(record.play_count, 31);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /rest/v1/top_tracks_all_time?select=*&limit=1 "));
    assert!(request.contains("apikey: anon-key"));
    assert!(request.contains("authorization: bearer anon-key"));
}

#[tokio::test]
async fn test_track_view_empty() {
    let (base, _server) = serve_once("200 OK", "[]").await;

    let credentials = Credentials {
        supabase_url: Some(base),
        supabase_key: Some("anon-key".to_string()),
        ..Credentials::default()
    };
    let source = TrackViewSource::with_client(client(), &credentials);
    assert_eq!(source.fetch("top_tracks_today").await, Err(Unavailable::Empty));
}
