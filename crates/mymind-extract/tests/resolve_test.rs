//! Input resolution against a mock HTTP server.

use async_trait::async_trait;
use mymind_core::{ContentInput, Error, NoteKind, Result};
use mymind_extract::{ClipboardImage, ClipboardSource, Extractor, FetchConfig};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

fn extractor(server: &MockServer) -> Extractor {
    Extractor::new(FetchConfig {
        timeout_seconds: 5,
        oembed_url: format!("{}/oembed", server.uri()),
        ..Default::default()
    })
    .expect("Failed to create extractor")
}

async fn resolve(server: &MockServer, route: &str) -> Result<ContentInput> {
    extractor(server)
        .resolve(&format!("{}{}", server.uri(), route))
        .await
}

#[tokio::test]
async fn test_web_page_becomes_titled_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Async Rust</title></head><body><nav>menu</nav><p>Futures are lazy.</p></body></html>",
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let content = resolve(&server, "/article").await.unwrap();
    assert_eq!(content.kind, NoteKind::Link);
    assert_eq!(content.source, format!("{}/article", server.uri()));
    assert_eq!(content.text, "Title: Async Rust\n\nFutures are lazy.");
}

#[tokio::test]
async fn test_unreachable_page_falls_back_to_bare_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    let content = extractor(&server).resolve(&url).await.unwrap();
    assert_eq!(content.kind, NoteKind::Link);
    assert_eq!(content.source, url);
    assert_eq!(content.text, url);
}

#[tokio::test]
async fn test_oversized_page_is_cut_at_html_limit() {
    let server = MockServer::start().await;
    let html = format!("<p>{}</p>", "a".repeat(500));
    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&server)
        .await;

    let extractor = Extractor::new(FetchConfig {
        max_html_bytes: 103,
        ..Default::default()
    })
    .unwrap();
    let content = extractor
        .resolve(&format!("{}/long", server.uri()))
        .await
        .unwrap();
    assert_eq!(content.text, format!("Title: \n\n{}", "a".repeat(100)));
}

#[tokio::test]
async fn test_image_url_by_extension_is_downloaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let content = resolve(&server, "/cat.png").await.unwrap();
    assert_eq!(content.kind, NoteKind::Image);
    assert_eq!(content.data, PNG_BYTES);
    assert_eq!(content.mime_type, "image/png");
    assert_eq!(content.extension, ".png");
}

#[tokio::test]
async fn test_image_url_by_head_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/gif"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"GIF89a....".to_vec(), "image/gif"))
        .mount(&server)
        .await;

    let content = resolve(&server, "/render").await.unwrap();
    assert_eq!(content.kind, NoteKind::Image);
    assert_eq!(content.mime_type, "image/gif");
    assert_eq!(content.extension, ".gif");
}

#[tokio::test]
async fn test_image_with_wrong_content_type_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fake.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let err = resolve(&server, "/fake.jpg").await.unwrap_err();
    match err {
        Error::Extraction(msg) => {
            assert!(msg.contains("could not download image"));
            assert!(msg.contains("text/html"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_tweet_uses_oembed() {
    let server = MockServer::start().await;
    let tweet_url = "https://x.com/rustlang/status/1234";
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", tweet_url))
        .and(query_param("omit_script", "1"))
        .and(query_param("dnt", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "author_name": "Rust Language",
            "html": "<blockquote><p>Rust 1.80 is out &amp; stable</p>&mdash; Rust Language</blockquote>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = extractor(&server).resolve(tweet_url).await.unwrap();
    assert_eq!(content.kind, NoteKind::Link);
    assert_eq!(content.source, tweet_url);
    assert_eq!(
        content.text,
        "Title: Tweet by Rust Language\n\nRust 1.80 is out & stable \u{2014} Rust Language"
    );
}

struct FakeClipboard(Vec<u8>, &'static str);

#[async_trait]
impl ClipboardSource for FakeClipboard {
    async fn read_image(&self) -> Result<ClipboardImage> {
        Ok(ClipboardImage {
            data: self.0.clone(),
            mime_type: self.1.to_string(),
        })
    }
}

struct EmptyClipboard;

#[async_trait]
impl ClipboardSource for EmptyClipboard {
    async fn read_image(&self) -> Result<ClipboardImage> {
        Err(Error::Extraction("no image found in clipboard".to_string()))
    }
}

#[tokio::test]
async fn test_clipboard_image() {
    let extractor = Extractor::new(FetchConfig::default())
        .unwrap()
        .with_clipboard(FakeClipboard(PNG_BYTES.to_vec(), "image/jpeg"));

    let content = extractor.resolve("clipboard").await.unwrap();
    assert_eq!(content.kind, NoteKind::Image);
    assert_eq!(content.source, "clipboard");
    assert_eq!(content.mime_type, "image/jpeg");
    assert_eq!(content.extension, ".jpg");
}

#[tokio::test]
async fn test_clipboard_failure_propagates() {
    let extractor = Extractor::new(FetchConfig::default())
        .unwrap()
        .with_clipboard(EmptyClipboard);

    let err = extractor.resolve("clipboard").await.unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
}

#[tokio::test]
async fn test_pdf_path_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.pdf");
    std::fs::write(&path, b"%PDF-1.7").unwrap();

    let extractor = Extractor::new(FetchConfig::default()).unwrap();
    let content = extractor.resolve(path.to_str().unwrap()).await.unwrap();
    assert_eq!(content.kind, NoteKind::Pdf);
    assert_eq!(content.data, b"%PDF-1.7");
}
