use link_tracker::config::FetcherConfig;
use link_tracker::{extract_links, ExtractError, FetchFailure, LinkExtractor};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts `body` at `route` with the given Content-Type
async fn serve(server: &MockServer, route: &str, body: impl Into<Vec<u8>>, content_type: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into(), content_type))
        .mount(server)
        .await;
}

fn extractor() -> LinkExtractor {
    LinkExtractor::new(&FetcherConfig::default()).expect("Failed to build extractor")
}

#[tokio::test]
async fn test_two_anchors_on_one_line() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        r#"foo <a href="x">text</a> bar <a href="y">more</a>"#,
        "text/html; charset=utf-8",
    )
    .await;

    let outcome = extractor().extract(&format!("{}/", server.uri())).await;

    assert!(outcome.is_complete(), "unexpected error: {:?}", outcome.error);
    assert_eq!(
        outcome.links,
        vec![r#"<a href="x">text</a>"#, r#"<a href="y">more</a>"#]
    );
}

#[tokio::test]
async fn test_multi_line_document_keeps_line_order() {
    let server = MockServer::start().await;
    let body = concat!(
        "<html>\r\n",
        "<body><a href=\"/1\">one</a>\r\n",
        "<p>foo <a href=\"x\">text</p>\r\n",
        "</a> <a href=\"/2\">two</a><a href=\"/3\">three</a>\r\n",
        "</body></html>\r\n"
    );
    serve(&server, "/doc", body, "text/html").await;

    let outcome = extractor().extract(&format!("{}/doc", server.uri())).await;

    assert!(outcome.is_complete());
    assert_eq!(
        outcome.links,
        vec![
            "<a href=\"/1\">one</a>",
            "<a href=\"/2\">two</a>",
            "<a href=\"/3\">three</a>",
        ]
    );
}

#[tokio::test]
async fn test_unterminated_anchor_yields_nothing() {
    let server = MockServer::start().await;
    serve(&server, "/", "foo <a href=\"x\">text\n</a>\n", "text/html").await;

    let outcome = extractor().extract(&format!("{}/", server.uri())).await;

    assert!(outcome.is_complete());
    assert!(outcome.links.is_empty());
}

#[tokio::test]
async fn test_declared_iso_8859_1_charset() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/latin",
        b"<a href=\"/caf\xE9\">Caf\xE9</a>\n".to_vec(),
        "text/html; charset=ISO-8859-1",
    )
    .await;

    let outcome = extractor().extract(&format!("{}/latin", server.uri())).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.links, vec!["<a href=\"/café\">Café</a>"]);
}

#[tokio::test]
async fn test_iso_8859_1_is_not_windows_1252() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/c1",
        b"<a>\x80\x93</a>\n".to_vec(),
        "text/html; charset=ISO-8859-1",
    )
    .await;

    let outcome = extractor().extract(&format!("{}/c1", server.uri())).await;

    assert!(outcome.is_complete());
    let code_points: Vec<u32> = outcome.links[0].chars().map(u32::from).collect();
    assert_eq!(code_points[3..5], [0x80, 0x93]);
}

#[tokio::test]
async fn test_missing_charset_uses_default() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/utf8",
        "<a href=\"/ü\">Grüße</a>\n".as_bytes().to_vec(),
        "text/html",
    )
    .await;
    serve(
        &server,
        "/latin",
        b"<a href=\"/\xFC\">Gr\xFC\xDFe</a>\n".to_vec(),
        "text/html",
    )
    .await;

    let utf8 = extractor().extract(&format!("{}/utf8", server.uri())).await;
    assert_eq!(utf8.links, vec!["<a href=\"/ü\">Grüße</a>"]);

    let latin_default = LinkExtractor::new(&FetcherConfig {
        default_charset: "windows-1252".to_string(),
        ..FetcherConfig::default()
    })
    .unwrap();
    let latin = latin_default
        .extract(&format!("{}/latin", server.uri()))
        .await;
    assert_eq!(latin.links, vec!["<a href=\"/ü\">Grüße</a>"]);
}

#[tokio::test]
async fn test_http_error_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<a>not found</a>"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let outcome = extractor().extract(&url).await;

    assert!(outcome.links.is_empty());
    assert_eq!(
        outcome.error,
        Some(ExtractError::Fetch {
            url,
            reason: FetchFailure::HttpStatus(404),
        })
    );
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failure() {
    // Nothing listens on port 1
    let outcome = extractor().extract("http://127.0.0.1:1/").await;

    assert!(outcome.links.is_empty());
    match outcome.error {
        Some(ExtractError::Fetch { url, reason }) => {
            assert_eq!(url, "http://127.0.0.1:1/");
            assert!(
                matches!(reason, FetchFailure::Connect(_) | FetchFailure::Timeout),
                "unexpected reason: {:?}",
                reason
            );
        }
        other => panic!("expected a fetch failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_charset_is_decode_failure() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        "<a href=\"x\">x</a>\n",
        "text/html; charset=klingon",
    )
    .await;

    let url = format!("{}/", server.uri());
    let outcome = extractor().extract(&url).await;

    assert!(outcome.links.is_empty());
    assert_eq!(
        outcome.error,
        Some(ExtractError::Decode {
            url,
            charset: "klingon".to_string(),
        })
    );
}

/// Serves one response that promises more body than it sends, then closes
async fn start_truncating_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

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

        let head = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 1000\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_truncated_body_keeps_completed_lines() {
    let url = start_truncating_server("<a>1</a>\n<a>2</a>").await;

    let outcome = extractor().extract(&url).await;

    assert_eq!(outcome.links, vec!["<a>1</a>"]);
    let error = outcome.error.expect("expected a stream failure");
    assert!(matches!(error, ExtractError::Stream { .. }), "{:?}", error);
    assert!(error.is_partial());
    assert_eq!(error.url(), url);
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        "<a href=\"1\">1</a>\n<div><a href=\"2\">2</a></div>\n",
        "text/html",
    )
    .await;

    let extractor = extractor();
    let url = format!("{}/", server.uri());
    let first = extractor.extract(&url).await;
    let second = extractor.extract(&url).await;

    assert_eq!(first.links.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_extract_links_with_defaults() {
    let server = MockServer::start().await;
    serve(&server, "/", "<a href=\"x\">x</a>", "text/html").await;

    let outcome = extract_links(&format!("{}/", server.uri()))
        .await
        .expect("Failed to build extractor");

    assert_eq!(outcome.into_result().unwrap(), vec!["<a href=\"x\">x</a>"]);
}
