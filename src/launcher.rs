//! Renderer launcher
//!
//! Starts the rendering application as a detached process. The process is
//! not supervised: nothing restarts it, and a failed launch only shows up in
//! the log (and as a peer that never connects). A background thread waits on
//! the child so its exit is logged and it does not linger as a zombie.

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Start the application at `path` and forget about it
///
/// Returns the child's pid when the launch succeeded.
pub fn launch(path: &Path) -> Option<u32> {
    let spawned = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(mut child) => {
            let pid = child.id();
            tracing::info!("Launched {} (pid {})", path.display(), pid);

            let reaper = thread::Builder::new()
                .name("vhand-reaper".to_string())
                .spawn(move || match child.wait() {
                    Ok(status) => tracing::debug!("Renderer (pid {}) exited: {}", pid, status),
                    Err(e) => tracing::warn!("Failed to wait on renderer (pid {}): {}", pid, e),
                });
            if let Err(e) = reaper {
                tracing::warn!("Renderer (pid {}) will not be reaped: {}", pid, e);
            }

            Some(pid)
        }
        Err(e) => {
            tracing::warn!("Failed to launch {}: {}", path.display(), e);
            None
        }
    }
}
