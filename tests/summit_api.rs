use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use qsogeo::{
    config::SummitApiConfig,
    summit::{
        SummitLocation, SummitLookup,
        sota::{LookupError, SotaApiLookup},
    },
};

/// Local HTTP endpoint answering exactly one request with a fixed response.
struct CannedServer {
    base_url: String,
    request_lines: mpsc::Receiver<String>,
}

impl CannedServer {
    fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            loop {
                let mut header = String::new();
                let n = reader.read_line(&mut header).expect("header");
                if n == 0 || header == "\r\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).expect("respond");
            let _ = tx.send(request_line.trim_end().to_string());
        });

        Self {
            // Trailing slash is trimmed by the client.
            base_url: format!("http://{addr}/api/summits/"),
            request_lines: rx,
        }
    }

    fn client(&self) -> SotaApiLookup {
        client_for(&self.base_url)
    }

    fn request_line(&self) -> String {
        self.request_lines.recv().expect("request served")
    }
}

fn client_for(base_url: &str) -> SotaApiLookup {
    let config = SummitApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..SummitApiConfig::default()
    };
    SotaApiLookup::new(&config).expect("client")
}

#[test]
fn found_summit_carries_position_and_altitude() {
    let server = CannedServer::start(
        "200 OK",
        r#"{"summitCode":"HB/BE-001","latitude":46.5,"longitude":8.0,"altM":4158}"#,
    );

    let found = server.client().lookup(" HB/BE-001 ");

    assert_eq!(
        found,
        Some(SummitLocation {
            lat: 46.5,
            lon: 8.0,
            alt_m: Some(4158.0),
        })
    );
    assert_eq!(server.request_line(), "GET /api/summits/HB/BE-001 HTTP/1.1");
}

#[test]
fn missing_altitude_is_allowed() {
    let server = CannedServer::start("200 OK", r#"{"latitude":45.0,"longitude":6.0}"#);
    let found = server.client().lookup("F/AB-123").expect("found");
    assert_eq!(found.alt_m, None);
    assert_eq!(found.to_coordinate().alt_m, 0.0);
}

#[test]
fn error_status_is_not_found() {
    let server = CannedServer::start("404 Not Found", "{}");
    let client = server.client();
    assert_eq!(client.lookup("XX/NO-999"), None);
}

#[test]
fn error_status_is_reported_by_fetch() {
    let server = CannedServer::start("503 Service Unavailable", "");
    let err = server.client().fetch("HB/BE-001").unwrap_err();
    assert!(matches!(err, LookupError::Status(503)), "{err}");
}

#[test]
fn body_without_position_is_not_found() {
    let server = CannedServer::start("200 OK", r#"{"summitCode":"HB/BE-001","altM":4158}"#);
    let err = server.client().fetch("HB/BE-001").unwrap_err();
    assert!(matches!(err, LookupError::MissingPosition), "{err}");

    let server = CannedServer::start("200 OK", r#"{"longitude":8.0}"#);
    assert_eq!(server.client().lookup("HB/BE-001"), None);
}

#[test]
fn undecodable_body_is_not_found() {
    let server = CannedServer::start("200 OK", "<html>maintenance</html>");
    assert_eq!(server.client().lookup("HB/BE-001"), None);
}

#[test]
fn refused_connection_is_not_found() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let client = client_for(&format!("http://{addr}/api/summits"));

    assert_eq!(client.lookup("HB/BE-001"), None);
    assert!(matches!(client.fetch("HB/BE-001"), Err(LookupError::Http(_))));
}
