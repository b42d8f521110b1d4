//! Opens liked repositories in the system browser.

use githubba_core::feed::LinkOpener;
use tokio::process::Command;

/// Hands URLs to the platform's opener command.
///
/// The child is spawned detached with null stdio; tokio reaps it. A failure to
/// launch is logged and otherwise ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open_external(&self, url: &str) {
        for (program, args) in launchers(url) {
            let spawned = Command::new(program)
                .args(&args)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .kill_on_drop(false)
                .spawn();
            match spawned {
                Ok(_) => {
                    tracing::debug!(url, program, "opened link");
                    return;
                }
                Err(e) => tracing::debug!(url, program, error = %e, "opener failed"),
            }
        }
        tracing::warn!(url, "could not open link in a browser");
    }
}

/// Commands to try, in order.
fn launchers(url: &str) -> Vec<(&'static str, Vec<String>)> {
    if cfg!(target_os = "macos") {
        vec![("open", vec![url.to_owned()])]
    } else if cfg!(target_os = "windows") {
        // The empty argument is the window title `start` would otherwise take from the URL.
        vec![("cmd", vec!["/C".into(), "start".into(), String::new(), url.to_owned()])]
    } else {
        vec![
            ("xdg-open", vec![url.to_owned()]),
            ("gio", vec!["open".into(), url.to_owned()]),
        ]
    }
}
