use log::{debug, warn};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use crate::third_party::coingecko::api_path::COINGECKO_COIN_PAGE;

pub fn detail_url(id: &str) -> String {
    format!("{COINGECKO_COIN_PAGE}{id}")
}

fn opener(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Hand the url to the system browser. Output is discarded so the opener
/// cannot scribble over the terminal UI.
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    spawn_detached(opener(url)).map(|_| ())
}

/// Start `cmd` with null stdio and reap it on a background thread so no
/// zombie is left behind.
fn spawn_detached(mut cmd: Command) -> std::io::Result<thread::JoinHandle<Option<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            debug!("Opener exited with {}", status);
            Some(status)
        }
        Err(e) => {
            warn!("Failed to wait for opener: {}", e);
            None
        }
    }))
}
