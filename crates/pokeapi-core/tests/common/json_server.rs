//! Minimal HTTP/1.1 server that replays scripted JSON responses for integration tests.
//!
//! Each path (including the query string) owns a sequence of replies; the last
//! reply repeats once the sequence is used up. Unknown paths get 404. Every
//! response closes the connection. `{base}` in a body is replaced with the
//! server's base URL so pages can carry absolute `next` links.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Status with a JSON (or any text) body.
    Json(u16, String),
    /// Status plus a `Retry-After` header.
    RetryAfter(u16, String),
    /// Read the request, then never answer.
    Hang,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Json(200, body.into())
    }

    pub fn status(status: u16) -> Self {
        Reply::Json(status, format!("{{\"detail\":\"status {status}\"}}"))
    }
}

#[derive(Default)]
struct State {
    base: String,
    routes: HashMap<String, Vec<Reply>>,
    hits: HashMap<String, usize>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct JsonServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl JsonServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.state.lock().unwrap().hits.get(path).copied().unwrap_or(0)
    }
}

/// Starts a server in a background thread serving `routes`.
pub fn start(routes: Vec<(&str, Vec<Reply>)>) -> JsonServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{port}");
    let state = Arc::new(Mutex::new(State {
        base: base.clone(),
        routes: routes
            .into_iter()
            .map(|(path, replies)| (path.to_string(), replies))
            .collect(),
        hits: HashMap::new(),
    }));
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &state));
        }
    });
    JsonServer { base, state }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Some(path) = std::str::from_utf8(&buf[..n])
        .ok()
        .and_then(|req| req.lines().next())
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
    else {
        return;
    };

    let (reply, base) = {
        let mut state = state.lock().unwrap();
        let served = *state.hits.get(&path).unwrap_or(&0);
        *state.hits.entry(path.clone()).or_insert(0) += 1;
        let reply = match state.routes.get(&path) {
            Some(replies) if !replies.is_empty() => {
                replies[served.min(replies.len() - 1)].clone()
            }
            _ => Reply::Json(404, "Not Found".to_string()),
        };
        (reply, state.base.clone())
    };

    let (status, body, extra) = match reply {
        Reply::Json(status, body) => (status, body.replace("{base}", &base), String::new()),
        Reply::RetryAfter(status, seconds) => {
            (status, String::new(), format!("Retry-After: {seconds}\r\n"))
        }
        Reply::Hang => {
            thread::sleep(Duration::from_secs(5));
            return;
        }
    };
    let response = format!(
        "HTTP/1.1 {status} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         {extra}\r\n{body}",
        reason(status),
        body.len(),
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
