use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use replay_viewer::{FrameSource, HttpSource, LoadError, LoaderCommand, LoaderEvent};
use url::Url;

const RECV_TIMEOUT: Duration = Duration::from_secs(10);

struct Route {
    path: &'static str,
    status: u16,
    body: &'static str,
}

/// Minimal HTTP/1.1 responder on a loopback port. Returns its base url.
fn serve(routes: Vec<Route>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            respond(stream, &routes);
        }
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn respond(mut stream: TcpStream, routes: &[Route]) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
            break;
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = routes
        .iter()
        .find(|route| route.path == path)
        .map(|route| (route.status, route.body))
        .unwrap_or((404, r#"{"error":"not found"}"#));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .unwrap();
}

fn load(base: Url, server_id: &str) -> LoaderEvent {
    let channel = HttpSource::new(base).spawn();
    assert!(channel.request(LoaderCommand::LoadFrames {
        request_id: 1,
        server_id: server_id.to_string(),
    }));
    channel
        .recv_timeout(RECV_TIMEOUT)
        .expect("loader should answer")
}

#[test]
fn lists_servers() {
    let base = serve(vec![Route {
        path: "/api/servers",
        status: 200,
        body: r#"[{"server_id":"abc","game_name":"Obby","frame_count":42},
                  {"server_id":"def","frame_count":3}]"#,
    }]);
    let channel = HttpSource::new(base).spawn();

    assert!(channel.request(LoaderCommand::ListServers));
    let event = channel.recv_timeout(RECV_TIMEOUT).unwrap();

    let LoaderEvent::ServersListed(Ok(servers)) = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].label(), "Obby (42 frames)");
    assert_eq!(servers[1].label(), "Unknown Game (3 frames)");
}

#[test]
fn loads_frames_for_server() {
    let base = serve(vec![Route {
        path: "/api/server/abc/frames",
        status: 200,
        body: r#"[{"frame":0,"timestamp":1700000000.5,"parts":[
                    {"Name":"Base","FullPath":"Workspace.Base",
                     "Position":{"X":0,"Y":0,"Z":0},"Rotation":{"X":0,"Y":0,"Z":0},
                     "Size":{"X":100,"Y":1,"Z":100},"Material":"Grass",
                     "Color":{"R":0.2,"G":0.6,"B":0.2}}],"players":[]},
                  {"frame":1,"parts":[],"players":[]}]"#,
    }]);

    match load(base, "abc") {
        LoaderEvent::FramesLoaded {
            request_id,
            server_id,
            frames,
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(server_id, "abc");
            assert_eq!(frames.len(), 2);
            assert_eq!(frames[0].parts[0].full_path, "Workspace.Base");
            assert_eq!(frames[0].timestamp, Some(1_700_000_000.5));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn server_ids_are_path_escaped() {
    let base = serve(vec![Route {
        path: "/api/server/a%2Fb/frames",
        status: 200,
        body: r#"[{"frame":0}]"#,
    }]);

    assert!(matches!(load(base, "a/b"), LoaderEvent::FramesLoaded { .. }));
}

#[test]
fn error_status_fails_load() {
    let base = serve(vec![Route {
        path: "/api/server/abc/frames",
        status: 500,
        body: r#"{"error":"boom"}"#,
    }]);

    match load(base, "abc") {
        LoaderEvent::LoadFailed {
            error: LoadError::Status { status, .. },
            ..
        } => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn malformed_body_fails_load() {
    let base = serve(vec![Route {
        path: "/api/server/abc/frames",
        status: 200,
        body: r#"[{"frame":"zero"}]"#,
    }]);

    assert!(matches!(
        load(base, "abc"),
        LoaderEvent::LoadFailed {
            error: LoadError::Parse { .. },
            ..
        }
    ));
}

#[test]
fn empty_recording_fails_load() {
    let base = serve(vec![Route {
        path: "/api/server/abc/frames",
        status: 200,
        body: "[]",
    }]);

    assert!(matches!(
        load(base, "abc"),
        LoaderEvent::LoadFailed {
            error: LoadError::Empty { .. },
            ..
        }
    ));
}

#[test]
fn unreachable_api_fails_load() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base = Url::parse(&format!("http://{addr}")).unwrap();

    assert!(matches!(
        load(base, "abc"),
        LoaderEvent::LoadFailed {
            error: LoadError::Http { .. },
            ..
        }
    ));
}

#[test]
fn reports_health() {
    let base = serve(vec![Route {
        path: "/api/health",
        status: 200,
        body: r#"{"status":"healthy","servers":2,"frames":512}"#,
    }]);
    let channel = HttpSource::new(base).spawn();

    assert!(channel.request(LoaderCommand::Health));
    match channel.recv_timeout(RECV_TIMEOUT).unwrap() {
        LoaderEvent::Health(Ok(report)) => {
            assert_eq!(report.status, "healthy");
            assert_eq!(report.servers, Some(2));
            assert_eq!(report.frames, Some(512));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
