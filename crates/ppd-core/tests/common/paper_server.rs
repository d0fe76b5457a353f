//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body at any path and counts requests, so tests
//! can assert how many fetches actually went out (retry and resume checks).

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub struct PaperServer {
    /// URL of the served file, e.g. "http://127.0.0.1:12345/paper.pdf".
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl PaperServer {
    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body` with 200 OK.
/// The server runs until the process exits.
pub fn start(body: Vec<u8>) -> PaperServer {
    start_with_status(body, 200)
}

/// Like `start` but responds with the given status code (e.g. 500).
pub fn start_with_status(body: Vec<u8>, status: u32) -> PaperServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_server = Arc::clone(&hits);
    let body = Arc::new(body);

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            hits_in_server.fetch_add(1, Ordering::SeqCst);
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, status));
        }
    });

    PaperServer {
        url: format!("http://127.0.0.1:{}/paper.pdf", port),
        hits,
    }
}

fn handle(mut stream: TcpStream, body: &[u8], status: u32) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    // Drain the request head; we serve the same body for any path.
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let payload: &[u8] = if status == 200 { body } else { b"error" };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/pdf\r\nConnection: close\r\n\r\n",
        status,
        reason,
        payload.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(payload);
    let _ = stream.flush();
}
