#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One canned reply: a status code and the body, sent as separate
/// HTTP chunks so the client sees the same splits.
pub struct Reply {
    pub status: u16,
    pub chunks: Vec<Vec<u8>>,
    pub pace: Duration,
}

impl Reply {
    pub fn ok(body: &str, chunk_size: usize) -> Self {
        Self {
            status: 200,
            chunks: body.as_bytes().chunks(chunk_size).map(<[u8]>::to_vec).collect(),
            pace: Duration::from_millis(2),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            chunks: vec![body.as_bytes().to_vec()],
            pace: Duration::from_millis(2),
        }
    }

    /// One `data:` event per chunk, with `pace` between chunks.
    pub fn paced(increments: &[&str], pace: Duration) -> Self {
        Self {
            status: 200,
            chunks: increments
                .iter()
                .map(|text| parley::providers::mock::data_event(text).into_bytes())
                .collect(),
            pace,
        }
    }
}

#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Serves each reply to one connection, in order, on a background thread.
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl MockServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = thread::spawn(move || {
            replies
                .into_iter()
                .map(|reply| {
                    let (stream, _) = listener.accept().expect("accept");
                    serve(stream, &reply)
                })
                .collect()
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().expect("server thread")
    }
}

fn serve(stream: TcpStream, reply: &Reply) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).expect("request body");

    let mut out = stream;
    write!(
        out,
        "HTTP/1.1 {} Status\r\nContent-Type: text/event-stream\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        reply.status
    )
    .expect("status line");

    for chunk in &reply.chunks {
        write!(out, "{:x}\r\n", chunk.len()).expect("chunk size");
        out.write_all(chunk).expect("chunk");
        out.write_all(b"\r\n").expect("chunk end");
        out.flush().expect("flush");
        thread::sleep(reply.pace);
    }
    out.write_all(b"0\r\n\r\n").expect("last chunk");
    out.flush().expect("flush");

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).expect("utf-8 body"),
    }
}

pub fn sse_body(increments: &[&str]) -> String {
    let mut body: String = increments
        .iter()
        .map(|text| parley::providers::mock::data_event(text))
        .collect();
    body.push_str("data: [DONE]\n\n");
    body
}
