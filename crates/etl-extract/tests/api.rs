//! HTTP adapter tests against a canned single-request server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use etl_extract::extract_api;
use etl_model::CellValue;

/// Serve exactly one request with a fixed response, returning the URL to
/// fetch. The listener thread reads the request head before answering so the
/// client never sees a reset mid-write.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let mut head = Vec::new();
        loop {
            let n = stream.read(&mut buf).unwrap();
            head.extend_from_slice(&buf[..n]);
            if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/")
}

#[test]
fn ok_response_with_json_rows_yields_a_dataset() {
    let url = serve_once("200 OK", r#"[{"name":"ada","age":36},{"name":"bob","age":41}]"#);
    let ds = extract_api(&url).unwrap().unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(
        ds.column("name").unwrap().values()[0],
        CellValue::Text("ada".to_string())
    );
    assert_eq!(ds.column("age").unwrap().values()[1], CellValue::Number(41.0));
}

#[test]
fn non_200_response_is_absent_not_an_error() {
    let url = serve_once("404 Not Found", r#"{"error":"no such resource"}"#);
    assert!(extract_api(&url).unwrap().is_none());
}

#[test]
fn ok_response_with_an_unparseable_body_is_an_error() {
    let url = serve_once("200 OK", "not json at all");
    assert!(extract_api(&url).is_err());
}
