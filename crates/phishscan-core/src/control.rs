//! Batch control over IPC: pause, resume and reset a running `phishscan batch`.
//!
//! The batch process listens on a Unix socket in the XDG state dir; control
//! clients write one command per line.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A line of the control protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Pause,
    Resume,
    Reset,
}

impl ControlCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlCommand::Pause => "pause",
            ControlCommand::Resume => "resume",
            ControlCommand::Reset => "reset",
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a line that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control command: {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for ControlCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pause" => Ok(ControlCommand::Pause),
            "resume" | "start" => Ok(ControlCommand::Resume),
            "reset" => Ok(ControlCommand::Reset),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Default path for the control socket (XDG state dir).
pub fn default_control_socket_path() -> std::io::Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("phishscan")?.get_state_home();
    Ok(dir.join("control.sock"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!("pause".parse(), Ok(ControlCommand::Pause));
        assert_eq!(" Resume \n".parse(), Ok(ControlCommand::Resume));
        assert_eq!("start".parse(), Ok(ControlCommand::Resume));
        assert_eq!("reset".parse(), Ok(ControlCommand::Reset));
        assert!("cancel 1".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn display_roundtrips() {
        for cmd in [ControlCommand::Pause, ControlCommand::Resume, ControlCommand::Reset] {
            assert_eq!(cmd.to_string().parse(), Ok(cmd));
        }
    }
}
