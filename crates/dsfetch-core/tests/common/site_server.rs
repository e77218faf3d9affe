//! Minimal HTTP/1.1 server that serves a fixed set of routes for integration tests.
//!
//! Answers GET and HEAD. Unknown paths get 404. Every request line is recorded
//! so tests can assert which URLs were contacted and in what order.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    /// Status, optional Content-Type, body.
    Ok {
        status: u16,
        content_type: Option<&'static str>,
        body: Vec<u8>,
    },
    /// 302 to the given path.
    Redirect(&'static str),
}

impl Route {
    pub fn html(body: &str) -> Self {
        Route::Ok {
            status: 200,
            content_type: Some("text/html; charset=utf-8"),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn file(content_type: Option<&'static str>, body: &[u8]) -> Self {
        Route::Ok {
            status: 200,
            content_type,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Route::Ok {
            status,
            content_type: Some("text/plain"),
            body: b"error".to_vec(),
        }
    }
}

pub struct SiteServer {
    pub origin: String,
    log: Arc<Mutex<Vec<(String, String)>>>,
}

impl SiteServer {
    /// Recorded `(method, path)` pairs, in arrival order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_of(&self, method: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p)
            .collect()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> SiteServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_srv = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log_srv);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    SiteServer {
        origin: format!("http://127.0.0.1:{}", port),
        log,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<&'static str, Route>,
    log: &Mutex<Vec<(String, String)>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("/").to_string();
    log.lock().unwrap().push((method.clone(), path.clone()));

    let head = method.eq_ignore_ascii_case("HEAD");
    let response = match routes.get(path.as_str()) {
        Some(Route::Redirect(to)) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            to
        )
        .into_bytes(),
        Some(Route::Ok {
            status,
            content_type,
            body,
        }) => render(*status, *content_type, body, head),
        None => render(404, Some("text/plain"), b"not found", head),
    };
    let _ = stream.write_all(&response);
}

fn render(status: u16, content_type: Option<&str>, body: &[u8], head: bool) -> Vec<u8> {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let ct = content_type
        .map(|c| format!("Content-Type: {}\r\n", c))
        .unwrap_or_default();
    let mut out = format!(
        "HTTP/1.1 {} {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        ct,
        body.len()
    )
    .into_bytes();
    if !head {
        out.extend_from_slice(body);
    }
    out
}
