//! Plaintext HTTP fingerprinting. A single `HEAD /` over a raw TCP
//! connection is enough to learn whether anything answers on port 80
//! and which server software fronts it; no TLS handshake, no redirect
//! following and no body read ever happen here.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of the HTTP stage. Skips and failures stay in-band so the
/// scan record always carries a `server_response`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ServerResponse {
    Ok {
        /// The second token of the status line, e.g. `"200"`.
        status_code: String,
        /// The `Server` header, or `"Unknown"` when absent.
        server: String,
        headers: BTreeMap<String, String>,
    },
    Skipped {
        reason: String,
    },
    Error {
        hostname: String,
        reason: String,
    },
}

impl ServerResponse {
    pub fn skipped(reason: &str) -> Self {
        ServerResponse::Skipped {
            reason: reason.to_string(),
        }
    }

    fn error(hostname: &str, reason: impl ToString) -> Self {
        ServerResponse::Error {
            hostname: hostname.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Connect to `<hostname>:80` and issue a `HEAD /`.
pub async fn fingerprint(hostname: &str) -> ServerResponse {
    let stream = match timeout(CONNECT_TIMEOUT, TcpStream::connect((hostname, 80))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return ServerResponse::error(hostname, e),
        Err(_) => return ServerResponse::error(hostname, "connect timed out"),
    };

    let raw = match exchange(stream, hostname).await {
        Ok(raw) if !raw.is_empty() => raw,
        Ok(_) => return ServerResponse::error(hostname, "empty response"),
        Err(e) => return ServerResponse::error(hostname, e),
    };

    match parse_response(&raw) {
        Some(response) => response,
        None => ServerResponse::error(hostname, "malformed status line"),
    }
}

async fn exchange(mut stream: TcpStream, hostname: &str) -> std::io::Result<String> {
    let request = format!("HEAD / HTTP/1.1\r\nHost: {hostname}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut raw = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        match timeout(RECV_TIMEOUT, stream.read(&mut chunk)).await {
            Ok(Ok(n)) if n > 0 => raw.extend_from_slice(&chunk[..n]),
            Ok(Err(e)) if raw.is_empty() => return Err(e),
            // Close, read error after data, or idle timeout: keep
            // whatever arrived.
            _ => break,
        }
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn parse_response(raw: &str) -> Option<ServerResponse> {
    let mut lines = raw.split("\r\n");

    let status_code = lines.next()?.split(' ').nth(1)?.to_string();

    let headers: BTreeMap<String, String> = lines
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (key, value) = line.split_once(": ")?;
            Some((key.to_string(), value.to_string()))
        })
        .collect();

    let server = headers
        .get("Server")
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());

    Some(ServerResponse::Ok {
        status_code,
        server,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line_and_headers() {
        let raw = "HTTP/1.1 200 OK\r\nServer: nginx/1.24.0\r\nContent-Type: text/html\r\n\r\n";

        match parse_response(raw).unwrap() {
            ServerResponse::Ok {
                status_code,
                server,
                headers,
            } => {
                assert_eq!(status_code, "200");
                assert_eq!(server, "nginx/1.24.0");
                assert_eq!(headers.get("Content-Type").unwrap(), "text/html");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_server_header() {
        let raw = "HTTP/1.1 301 Moved Permanently\r\nLocation: https://example.com/\r\n\r\n";

        match parse_response(raw).unwrap() {
            ServerResponse::Ok {
                status_code,
                server,
                ..
            } => {
                assert_eq!(status_code, "301");
                assert_eq!(server, "Unknown");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_parse_header_values_containing_colons() {
        let raw = "HTTP/1.1 200 OK\r\nLocation: https://example.com:8443/\r\n\r\n";

        match parse_response(raw).unwrap() {
            ServerResponse::Ok { headers, .. } => {
                assert_eq!(headers.get("Location").unwrap(), "https://example.com:8443/");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bare_status_line_is_malformed() {
        assert!(parse_response("HTTP/1.1").is_none());
        assert!(parse_response("").is_none());
    }
}
