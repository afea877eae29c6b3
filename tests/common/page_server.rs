//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one fixed status line and body, and counts how
//! many requests it has seen.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct PageServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl PageServer {
    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve `body` with `200 OK` at "http://127.0.0.1:<port>/v/talk"
pub fn serve_html(body: &str) -> PageServer {
    start("200 OK", "utf-8", body.as_bytes().to_vec(), false)
}

/// Serve raw `body` bytes labelled with `charset` in the Content-Type header
pub fn serve_encoded(charset: &'static str, body: Vec<u8>) -> PageServer {
    start("200 OK", charset, body, false)
}

/// Serve `body` with a custom status line such as "404 Not Found"
pub fn serve_status(status: &'static str, body: Vec<u8>) -> PageServer {
    start(status, "utf-8", body, false)
}

/// Accept connections but never answer them
pub fn serve_silence() -> PageServer {
    start("200 OK", "utf-8", Vec::new(), true)
}

/// A URL on a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/v/talk", port)
}

fn start(status: &'static str, charset: &'static str, body: Vec<u8>, stall: bool) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counter = Arc::clone(&counter);
            thread::spawn(move || handle(stream, status, charset, &body, stall, &counter));
        }
    });

    PageServer {
        url: format!("http://127.0.0.1:{}/v/talk", port),
        hits,
    }
}

fn handle(
    mut stream: TcpStream,
    status: &str,
    charset: &str,
    body: &[u8],
    stall: bool,
    hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    hits.fetch_add(1, Ordering::SeqCst);

    if stall {
        thread::sleep(Duration::from_secs(10));
        return;
    }

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset={}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        charset,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
