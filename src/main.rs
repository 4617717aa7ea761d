//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` on a local port (`ORB_PORT`, default 8000).

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

// Lives here rather than in build.rs: wasm-pack runs cargo, which would wait
// forever on the lock the outer build is holding.
fn build_pkg() -> io::Result<ExitStatus> {
    Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
}

fn port() -> u16 {
    env::var("ORB_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn main() {
    // Only meaningful on non-wasm targets.
    if cfg!(target_arch = "wasm32") {
        return;
    }

    println!("Building WASM pkg …");
    match build_pkg() {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure the wasm32-unknown-unknown target is installed.");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Serving whatever is already in static/pkg.");
        }
    }

    let port = port();
    println!("Serving http://127.0.0.1:{port} (query options: ?dotScale=6&clock=realtime&directRender)");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            std::process::exit(1);
        }
    };

    // Keep process alive while the server runs.
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                std::process::exit(status.code().unwrap_or(1));
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(e) => {
                eprintln!("lost track of http server: {e}");
                std::process::exit(1);
            }
        }
    }
}
