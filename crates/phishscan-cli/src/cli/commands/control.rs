//! `phishscan pause|resume|reset` – signal a running `phishscan batch`.

use anyhow::Result;
use phishscan_core::control::{default_control_socket_path, ControlCommand};

use crate::cli::control_socket;

pub async fn run_control(command: ControlCommand) -> Result<()> {
    let path = default_control_socket_path()?;
    if control_socket::send_command(&path, command).await? {
        println!("Sent {command} to running batch");
    } else {
        println!("No batch is running.");
    }
    Ok(())
}
