//! Launcher Tests
//!
//! Tests for starting the renderer as a detached process.

use std::net::TcpStream;
use std::path::Path;

use vhand::config::Config;
use vhand::launcher::launch;
use vhand::network::{Connection, ConnectionState};

#[test]
fn test_launch_missing_executable_is_not_fatal() {
    assert_eq!(launch(Path::new("/definitely/not/a/renderer")), None);
}

#[test]
fn test_listen_survives_failed_launch() {
    let config = Config::builder()
        .listen_addr("127.0.0.1:0")
        .app_path("/definitely/not/a/renderer")
        .build();

    let mut connection = Connection::new(config);
    connection.listen().unwrap();
    assert_eq!(connection.state(), ConnectionState::Listening);

    let _client = TcpStream::connect(connection.local_addr().unwrap()).unwrap();
    connection.accept().unwrap();
    assert_eq!(connection.state(), ConnectionState::Connected);
}

#[cfg(unix)]
#[test]
fn test_launch_runs_detached() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::thread;
    use std::time::{Duration, Instant};

    let dir = tempfile::TempDir::new().unwrap();
    let marker = dir.path().join("launched");
    let script = dir.path().join("renderer.sh");

    fs::write(
        &script,
        format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let pid = launch(&script);
    assert!(pid.is_some());

    let deadline = Instant::now() + Duration::from_secs(5);
    while !marker.exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(marker.exists(), "launched script never ran");
}

#[cfg(target_os = "linux")]
#[test]
fn test_exited_renderer_is_reaped() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::thread;
    use std::time::{Duration, Instant};

    let dir = tempfile::TempDir::new().unwrap();
    let script = dir.path().join("renderer.sh");
    fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let pid = launch(&script).unwrap();

    // An unreaped child stays in /proc as a zombie
    let proc_entry = format!("/proc/{}", pid);
    let deadline = Instant::now() + Duration::from_secs(5);
    while Path::new(&proc_entry).exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(!Path::new(&proc_entry).exists(), "pid {} was never reaped", pid);
}
