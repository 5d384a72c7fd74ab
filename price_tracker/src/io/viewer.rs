//! Opens a saved image in the desktop's default viewer.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// The platform command that opens `path` with its associated application.
pub fn open_command(path: &Path) -> Command {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(path);
    cmd
}

/// Launches the viewer and returns without waiting for it to close.
pub fn show(path: &Path) -> std::io::Result<()> {
    let mut cmd = open_command(path);
    debug!(?cmd, "opening image viewer");
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_targets_the_given_file() {
        let cmd = open_command(Path::new("stock_chart.png"));
        let last = cmd.get_args().last().map(|a| a.to_os_string());
        assert_eq!(last, Some("stock_chart.png".into()));
    }
}
