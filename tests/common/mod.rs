#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::routing::{get, MethodRouter};
use axum::Router;
use podarchive::{Config, PartialFiles};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Binds an ephemeral port and returns the listener with its base URL, so
/// routes can refer to their own server before it starts.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

/// A GET route that always answers `body` and counts its requests.
pub fn counted(hits: &Arc<AtomicUsize>, body: &'static [u8]) -> MethodRouter {
    let hits = hits.clone();
    get(move || {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            body
        }
    })
}

/// Serves one response that promises `promised` bytes but sends only
/// `sent`, then drops the connection.
pub async fn truncating_server(promised: usize, sent: &'static [u8]) -> String {
    let (listener, base) = bind().await;
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nContent-Length: {promised}\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(sent).await.unwrap();
        socket.flush().await.unwrap();
    });
    base
}

/// An RSS document listing `(title, enclosure url)` pairs, newest first.
pub fn rss(items: &[(&str, String)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, url)| {
            format!(
                r#"<item><title>{title}</title><enclosure url="{url}" length="0" type="audio/mpeg"/></item>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Test Show</title><link>http://localhost/</link><description>test</description>{items}</channel></rss>"#
    )
}

pub fn config(output_dir: &Path, feed_url: String, partial_files: PartialFiles) -> Config {
    Config {
        feed_url,
        output_dir: output_dir.to_path_buf(),
        partial_files,
        quiet: true,
        ..Config::default()
    }
}

pub fn hits(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
