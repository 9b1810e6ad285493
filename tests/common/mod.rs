// Shared helpers for the integration tests
//
// A stub chat service on a local TCP port and a throwaway data directory.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use llm_cache::WorkerConfig;
use serde_json::Value;
use tempfile::TempDir;

/// What the stub sends back for one request
pub enum Reply {
    Json(String),
    Status(&'static str, String),
    /// Sleep before answering, long enough to trip the client timeout
    Stall(Duration),
}

/// Answers every request on its own thread; the reply is chosen from the
/// user turn of the chat request
pub struct StubServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl StubServer {
    pub fn spawn<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/chat", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        let respond = Arc::new(respond);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let seen = seen.clone();
                let respond = respond.clone();
                thread::spawn(move || handle(stream, &seen, respond.as_ref()));
            }
        });

        Self { url, requests }
    }

    /// Replies `{"message":{"content": ...}}` for every mapped input
    pub fn with_translations(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self::spawn(move |text| match pairs.iter().find(|(src, _)| *src == text) {
            Some((_, dst)) => Reply::Json(chat_body(dst)),
            None => Reply::Status("404 Not Found", r#"{"error":"unknown"}"#.to_string()),
        })
    }

    pub fn user_turns(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r["messages"][1]["content"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

pub fn chat_body(content: &str) -> String {
    serde_json::json!({
        "model": "qwen2.5:3b",
        "done": true,
        "message": {"role": "assistant", "content": content}
    })
    .to_string()
}

fn handle(mut stream: TcpStream, seen: &Mutex<Vec<Value>>, respond: &dyn Fn(&str) -> Reply) {
    let Some(body) = read_body(&mut stream) else { return };
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let text = request["messages"][1]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    seen.lock().unwrap().push(request);

    let (status, payload) = match respond(&text) {
        Reply::Json(payload) => ("200 OK", payload),
        Reply::Status(status, payload) => (status, payload),
        Reply::Stall(delay) => {
            thread::sleep(delay);
            ("200 OK", chat_body("too late"))
        }
    };
    let reply = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let _ = stream.write_all(reply.as_bytes());
}

fn read_body(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(split) = find(&buf, b"\r\n\r\n") else { continue };
        let head = String::from_utf8_lossy(&buf[..split]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= split + 4 + length {
            return Some(buf[split + 4..split + 4 + length].to_vec());
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// A temporary data directory and a config pointing into it
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn config(&self, endpoint: &str) -> WorkerConfig {
        WorkerConfig {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(5),
            throttle: Duration::ZERO,
            ..WorkerConfig::default().with_data_dir(self.dir.path())
        }
    }

    pub fn pending_file(&self) -> PathBuf {
        self.dir.path().join("pending.txt")
    }

    pub fn cache_file(&self) -> PathBuf {
        self.dir.path().join("cache.db")
    }
}
