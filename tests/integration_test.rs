//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en 127.0.0.1:0 con un directorio
//! temporal como raíz de `/files`, y habla con él por TcpStream.

use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use minihttp::config::Config;
use minihttp::server::{RunningServer, Server};

/// Directorio temporal limpio por test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("minihttp-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn start_server(directory: PathBuf) -> RunningServer {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.directory = directory;

    Server::bind(&config)
        .expect("bind")
        .start()
        .expect("start")
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

fn send(addr: SocketAddr, raw: &str) -> String {
    String::from_utf8(send_raw(addr, raw.as_bytes())).expect("utf-8 response")
}

/// Status line de la response
fn status_line(response: &str) -> &str {
    response.split("\r\n").next().unwrap_or("")
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

fn has_header(response: &str, header: &str) -> bool {
    let head = match response.find("\r\n\r\n") {
        Some(pos) => &response[..pos],
        None => response,
    };
    head.split("\r\n").skip(1).any(|line| line == header)
}

#[test]
fn test_root_endpoint() {
    let server = start_server(scratch_dir("root"));

    let response = send(server.local_addr(), "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_echo_endpoint() {
    let server = start_server(scratch_dir("echo"));

    let response = send(server.local_addr(), "GET /echo/a/b/c HTTP/1.1\r\n\r\n");

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert!(has_header(&response, "Content-Type: text/plain"));
    assert!(has_header(&response, "Content-Length: 5"));
    assert_eq!(extract_body(&response), "a/b/c");
}

#[test]
fn test_user_agent_endpoint() {
    let server = start_server(scratch_dir("ua"));

    let response = send(
        server.local_addr(),
        "GET /user-agent HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: curl/7.64\r\n\r\n",
    );

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(extract_body(&response), "curl/7.64");
}

#[test]
fn test_unknown_route_any_verb() {
    let server = start_server(scratch_dir("bogus"));

    for verb in ["GET", "POST", "PUT"] {
        let response = send(server.local_addr(), &format!("{} /bogus HTTP/1.1\r\n\r\n", verb));
        assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n", "verb {}", verb);
    }
}

#[test]
fn test_files_get() {
    let dir = scratch_dir("get");
    let contents: &[u8] = b"binary\x00\x01\xfe\xffdata";
    fs::write(dir.join("blob"), contents).unwrap();
    let server = start_server(dir);

    let response = send_raw(server.local_addr(), b"GET /files/blob HTTP/1.1\r\n\r\n");
    let split = response.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8_lossy(&response[..split]).into_owned();

    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert!(head.contains("Content-Type: application/octet-stream"));
    assert!(head.contains(&format!("Content-Length: {}", contents.len())));
    assert_eq!(&response[split + 4..], contents);
}

#[test]
fn test_files_get_missing() {
    let server = start_server(scratch_dir("missing"));

    let response = send(server.local_addr(), "GET /files/non_existent HTTP/1.1\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_files_post_then_get() {
    let dir = scratch_dir("post");
    let server = start_server(dir.clone());
    let addr = server.local_addr();

    let response = send(
        addr,
        "POST /files/new_file HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 12\r\n\r\nhello world!",
    );
    assert_eq!(response, "HTTP/1.1 201 Created\r\n\r\n");
    assert_eq!(fs::read(dir.join("new_file")).unwrap(), b"hello world!");

    let response = send(addr, "GET /files/new_file HTTP/1.1\r\n\r\n");
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(extract_body(&response), "hello world!");
}

#[test]
fn test_files_post_short_body() {
    let dir = scratch_dir("short");
    let server = start_server(dir.clone());

    // Declara 10 bytes pero cierra la escritura después de 4
    let mut stream = TcpStream::connect(server.local_addr()).unwrap();
    stream
        .write_all(b"POST /files/short HTTP/1.1\r\nContent-Length: 10\r\n\r\nabcd")
        .unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    assert_eq!(status_line(&response), "HTTP/1.1 201 Created");
    assert_eq!(fs::read(dir.join("short")).unwrap(), b"abcd");
}

#[test]
fn test_files_traversal_is_refused() {
    let dir = scratch_dir("traversal");
    let root = dir.join("public");
    fs::create_dir_all(&root).unwrap();
    fs::write(dir.join("secret"), b"s3cr3t").unwrap();
    let server = start_server(root);

    let response = send(server.local_addr(), "GET /files/../secret HTTP/1.1\r\n\r\n");
    assert_eq!(status_line(&response), "HTTP/1.1 404 Not Found");
}

#[test]
fn test_gzip_negotiation() {
    let server = start_server(scratch_dir("gzip"));
    let addr = server.local_addr();

    let response = send(addr, "GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip, deflate\r\n\r\n");
    assert!(has_header(&response, "Content-Encoding: gzip"));
    assert_eq!(extract_body(&response), "abc");

    let response = send(addr, "GET /echo/abc HTTP/1.1\r\nAccept-Encoding: deflate\r\n\r\n");
    assert!(!response.contains("Content-Encoding"));
}

#[test]
fn test_malformed_request() {
    let server = start_server(scratch_dir("malformed"));

    let response = send(server.local_addr(), "GET / HTTP/1.1\r\nthis is not a header\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 400 Bad Request\r\n\r\n");
}

#[test]
fn test_concurrent_connections() {
    let server = start_server(scratch_dir("concurrent"));
    let addr = server.local_addr();

    // Una conexión lenta no debe bloquear a las demás
    let mut slow = TcpStream::connect(addr).unwrap();
    slow.write_all(b"GET /echo/slow HTTP/1.1\r\n").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let response = send(addr, &format!("GET /echo/{} HTTP/1.1\r\n\r\n", i));
                assert_eq!(extract_body(&response), i.to_string());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    slow.write_all(b"\r\n").unwrap();
    let mut response = String::new();
    slow.read_to_string(&mut response).unwrap();
    assert_eq!(extract_body(&response), "slow");
}

#[test]
fn test_server_stops() {
    let server = start_server(scratch_dir("stop"));
    let addr = server.local_addr();
    let handle = server.shutdown_handle();

    server.stop();
    assert!(!handle.is_running());

    // Con el listener cerrado ya no se aceptan conexiones
    assert!(TcpStream::connect(addr).is_err());
}
