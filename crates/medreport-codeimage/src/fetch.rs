//! Blocking fetch of the rendered code image.
//!
//! A single best-effort GET: no timeout, no retry, no cancellation. Callers
//! that get an error show the panel as broken or fall back to
//! [`crate::render_svg`].

use crate::{CodeImageError, CodeImageRequest, CodeImageResult};

/// Fetch the image bytes for `request`.
pub fn fetch(request: &CodeImageRequest) -> CodeImageResult<Vec<u8>> {
    let url = request.url();
    tracing::debug!(%url, "Requesting code image");

    let response = reqwest::blocking::get(&url).map_err(|e| {
        tracing::warn!("Code image request failed: {e}");
        CodeImageError::Request(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "Code image endpoint returned an error");
        return Err(CodeImageError::Request(format!("HTTP {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| CodeImageError::Request(e.to_string()))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodeImageSettings;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const PNG_OK: &str = "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 7\r\nConnection: close\r\n\r\nPNGDATA";
    const SERVER_ERROR: &str =
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

    /// Serve one canned response per connection, in order.
    fn serve(responses: Vec<&'static str>) -> CodeImageSettings {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        CodeImageSettings {
            endpoint: format!("http://{}/v1/create-qr-code/", addr),
            ..CodeImageSettings::default()
        }
    }

    #[test]
    fn test_fetch_ok_then_server_error() {
        let settings = serve(vec![PNG_OK, SERVER_ERROR]);
        let request =
            CodeImageRequest::new("http://localhost:8080/generated-report/MR-abcd-123456", settings)
                .unwrap();

        let bytes = fetch(&request).unwrap();
        assert_eq!(bytes, b"PNGDATA");

        let err = fetch(&request).unwrap_err();
        assert!(matches!(err, CodeImageError::Request(ref msg) if msg.contains("500")));
    }

    #[test]
    fn test_fetch_unreachable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let settings = CodeImageSettings {
            endpoint: format!("http://{}/", addr),
            ..CodeImageSettings::default()
        };
        let request = CodeImageRequest::new("http://x.test/r", settings).unwrap();
        assert!(matches!(fetch(&request), Err(CodeImageError::Request(_))));
    }
}
