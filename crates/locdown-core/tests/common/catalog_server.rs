//! Minimal HTTP/1.1 server for integration tests: `GET /<id>` answers 200
//! with a small body for ids `1..=max_id` and 404 for anything else.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Body served for `id`.
pub fn body_for(id: u64) -> Vec<u8> {
    format!("item {}\n", id).repeat(64).into_bytes()
}

/// Starts a server in a background thread. Returns a URL template
/// (e.g. "http://127.0.0.1:12345/{id}"). The server runs until the process exits.
pub fn start(max_id: u64) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || handle(stream, max_id));
        }
    });
    format!("http://127.0.0.1:{}/{{id}}", port)
}

fn handle(mut stream: TcpStream, max_id: u64) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let id = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|path| path.trim_start_matches('/').parse::<u64>().ok());

    match id {
        Some(id) if (1..=max_id).contains(&id) => {
            let body = body_for(id);
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
        _ => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

/// Starts a server whose every response dribbles a large body in small
/// chunks, so a transfer stays in flight until the client gives up.
/// Returns the URL to fetch.
pub fn start_trickle() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || trickle(stream));
        }
    });
    format!("http://127.0.0.1:{}/slow", port)
}

fn trickle(mut stream: TcpStream) {
    let mut buf = [0u8; 4096];
    if !matches!(stream.read(&mut buf), Ok(n) if n > 0) {
        return;
    }
    let chunk = [b'x'; 64];
    let total = 1024 * 1024;
    let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", total);
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    for _ in 0..total / chunk.len() {
        if stream.write_all(&chunk).and_then(|_| stream.flush()).is_err() {
            return;
        }
        thread::sleep(Duration::from_millis(20));
    }
}
