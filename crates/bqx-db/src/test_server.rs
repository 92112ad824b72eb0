//! Minimal HTTP/1.1 server answering each connection with a canned response.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A request as seen by the server
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    /// e.g. `GET /bigquery/v2/projects/p/jobs/x?location=EU HTTP/1.1`
    pub request_line: String,
    /// Header block, lowercased
    pub headers: String,
    pub body: String,
}

/// Serve `responses` in order, one per connection.
///
/// Returns the base URL and a handle resolving to the recorded requests.
pub(crate) async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut stream).await);
            let reply = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
        seen
    });

    (url, handle)
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    let headers = headers.to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|v| v.trim().parse::<usize>().unwrap())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    Recorded {
        request_line: request_line.to_string(),
        headers,
        body: String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string(),
    }
}
