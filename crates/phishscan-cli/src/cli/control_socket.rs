//! Control socket: server (during `phishscan batch`) and client (for `phishscan pause`).
//! Protocol: one command per line: "pause", "resume" or "reset".

use anyhow::Result;
use phishscan_core::control::ControlCommand;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

/// Spawns a task that listens on `path` and forwards each parsed command to `commands`.
/// Ignores malformed lines. Binding happens before this returns.
pub fn spawn_control_listener(
    commands: mpsc::Sender<ControlCommand>,
    path: impl AsRef<Path>,
) -> Result<tokio::task::JoinHandle<()>> {
    let path = path.as_ref().to_path_buf();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path)?;

    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let commands = commands.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(stream).lines();
                        while let Ok(Some(line)) = reader.next_line().await {
                            match line.parse::<ControlCommand>() {
                                Ok(cmd) => {
                                    if commands.send(cmd).await.is_err() {
                                        return;
                                    }
                                }
                                Err(e) => tracing::debug!("control socket: {}", e),
                            }
                        }
                    });
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
        }
    });
    Ok(handle)
}

/// Sends one command line to the control socket. Returns false if no batch is listening.
pub async fn send_command(socket_path: &Path, command: ControlCommand) -> Result<bool> {
    if !socket_path.exists() {
        return Ok(false);
    }
    let mut stream = match UnixStream::connect(socket_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    stream
        .write_all(format!("{}\n", command).as_bytes())
        .await?;
    stream.shutdown().await?;
    Ok(true)
}
