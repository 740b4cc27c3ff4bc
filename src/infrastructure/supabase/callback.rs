// SPDX-License-Identifier: MPL-2.0
//! Loopback HTTP listener receiving the OAuth redirect.

use crate::application::port::GatewayError;
use reqwest::Url;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const CALLBACK_PATH: &str = "/callback";

/// How long one connection may take to send its request line.
pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest request line read from a connection.
const MAX_REQUEST_LINE: u64 = 8 * 1024;

/// What a single request to the loopback listener carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackParams {
    Code(String),
    Denied(String),
    /// Some other request (favicon, wrong path, malformed).
    Unrelated,
}

/// Parses an HTTP request line such as `GET /callback?code=abc HTTP/1.1`.
#[must_use]
pub fn parse_request_line(line: &str) -> CallbackParams {
    let mut parts = line.split_whitespace();
    let (Some("GET"), Some(target)) = (parts.next(), parts.next()) else {
        return CallbackParams::Unrelated;
    };
    let Ok(url) = Url::parse(&format!("http://127.0.0.1{target}")) else {
        return CallbackParams::Unrelated;
    };
    if url.path() != CALLBACK_PATH {
        return CallbackParams::Unrelated;
    }

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    match (code, error) {
        (_, Some(error)) => CallbackParams::Denied(description.unwrap_or(error)),
        (Some(code), None) if !code.is_empty() => CallbackParams::Code(code),
        _ => CallbackParams::Denied("callback without authorization code".into()),
    }
}

/// Accepts connections until one hits the callback path.
///
/// Returns the open stream so the caller can answer after exchanging the code.
/// Connections that stay silent past [`REQUEST_READ_TIMEOUT`] are dropped.
pub async fn wait_for_redirect(
    listener: &TcpListener,
) -> Result<(TcpStream, Result<String, String>), GatewayError> {
    wait_for_redirect_within(listener, REQUEST_READ_TIMEOUT).await
}

async fn wait_for_redirect_within(
    listener: &TcpListener,
    read_timeout: Duration,
) -> Result<(TcpStream, Result<String, String>), GatewayError> {
    loop {
        let (mut stream, _) = listener
            .accept()
            .await
            .map_err(|e| GatewayError::Auth(format!("callback listener failed: {e}")))?;

        let mut line = String::new();
        {
            let mut reader = BufReader::new((&mut stream).take(MAX_REQUEST_LINE));
            match tokio::time::timeout(read_timeout, reader.read_line(&mut line)).await {
                Ok(Ok(_)) if line.ends_with('\n') => {}
                Ok(Ok(_)) => {
                    tracing::debug!(
                        len = line.len(),
                        "incomplete request line on callback listener"
                    );
                    continue;
                }
                Ok(Err(err)) => {
                    tracing::debug!(%err, "unreadable request on callback listener");
                    continue;
                }
                Err(_) => {
                    tracing::debug!("idle connection on callback listener dropped");
                    continue;
                }
            }
        }

        match parse_request_line(&line) {
            CallbackParams::Code(code) => return Ok((stream, Ok(code))),
            CallbackParams::Denied(reason) => return Ok((stream, Err(reason))),
            CallbackParams::Unrelated => {
                let _ = write_response(&mut stream, "404 Not Found", "").await;
            }
        }
    }
}

/// Answers the browser with a short status page.
pub async fn respond(stream: &mut TcpStream, success: bool) {
    let body = if success {
        "<html><body><h1>Zoomify</h1><p>Signed in. You can close this tab.</p></body></html>"
    } else {
        "<html><body><h1>Zoomify</h1><p>Sign-in failed. Return to the app and try again.</p></body></html>"
    };
    if let Err(err) = write_response(stream, "200 OK", body).await {
        tracing::debug!(%err, "could not answer OAuth callback");
    }
}

async fn write_response(stream: &mut TcpStream, status: &str, body: &str) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_authorization_code() {
        assert_eq!(
            parse_request_line("GET /callback?code=abc123&state=x HTTP/1.1\r\n"),
            CallbackParams::Code("abc123".into())
        );
    }

    #[test]
    fn error_description_wins_over_error() {
        assert_eq!(
            parse_request_line(
                "GET /callback?error=access_denied&error_description=User%20cancelled HTTP/1.1"
            ),
            CallbackParams::Denied("User cancelled".into())
        );
        assert_eq!(
            parse_request_line("GET /callback?error=access_denied HTTP/1.1"),
            CallbackParams::Denied("access_denied".into())
        );
    }

    #[test]
    fn missing_code_is_denied() {
        assert!(matches!(
            parse_request_line("GET /callback HTTP/1.1"),
            CallbackParams::Denied(_)
        ));
        assert!(matches!(
            parse_request_line("GET /callback?code= HTTP/1.1"),
            CallbackParams::Denied(_)
        ));
    }

    #[test]
    fn other_requests_are_unrelated() {
        assert_eq!(
            parse_request_line("GET /favicon.ico HTTP/1.1"),
            CallbackParams::Unrelated
        );
        assert_eq!(
            parse_request_line("POST /callback?code=a HTTP/1.1"),
            CallbackParams::Unrelated
        );
        assert_eq!(parse_request_line(""), CallbackParams::Unrelated);
    }

    #[tokio::test]
    async fn wait_for_redirect_skips_unrelated_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");

        let client = tokio::spawn(async move {
            let mut favicon = TcpStream::connect(addr).await.expect("connect");
            favicon
                .write_all(b"GET /favicon.ico HTTP/1.1\r\n\r\n")
                .await
                .expect("write");
            let mut redirect = TcpStream::connect(addr).await.expect("connect");
            redirect
                .write_all(b"GET /callback?code=xyz HTTP/1.1\r\n\r\n")
                .await
                .expect("write");
            redirect
        });

        let (mut stream, result) = wait_for_redirect(&listener).await.expect("redirect");
        assert_eq!(result, Ok("xyz".to_string()));
        respond(&mut stream, true).await;
        let _ = client.await.expect("client task");
    }

    #[tokio::test]
    async fn idle_connection_does_not_block_redirect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");

        let client = tokio::spawn(async move {
            let idle = TcpStream::connect(addr).await.expect("connect");
            let mut redirect = TcpStream::connect(addr).await.expect("connect");
            redirect
                .write_all(b"GET /callback?code=xyz HTTP/1.1\r\n\r\n")
                .await
                .expect("write");
            (idle, redirect)
        });

        let (_stream, result) = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_redirect_within(&listener, Duration::from_millis(200)),
        )
        .await
        .expect("redirect was not starved by the idle connection")
        .expect("redirect");
        assert_eq!(result, Ok("xyz".to_string()));
        let _ = client.await.expect("client task");
    }

    #[tokio::test]
    async fn oversized_request_line_is_not_a_redirect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");

        let client = tokio::spawn(async move {
            let mut flood = TcpStream::connect(addr).await.expect("connect");
            let mut request = b"GET /callback?code=".to_vec();
            request.resize(request.len() + MAX_REQUEST_LINE as usize * 2, b'a');
            // The listener stops reading at the cap, so the write may be cut short.
            let _ = flood.write_all(&request).await;
            let mut redirect = TcpStream::connect(addr).await.expect("connect");
            redirect
                .write_all(b"GET /callback?code=short HTTP/1.1\r\n\r\n")
                .await
                .expect("write");
            (flood, redirect)
        });

        let (_stream, result) = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_redirect_within(&listener, Duration::from_millis(200)),
        )
        .await
        .expect("redirect in time")
        .expect("redirect");
        assert_eq!(result, Ok("short".to_string()));
        let _ = client.await.expect("client task");
    }
}
