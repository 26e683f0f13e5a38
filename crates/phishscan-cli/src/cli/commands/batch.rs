//! `phishscan batch [FILE]` – sequential batch analysis with live progress.
//!
//! The run is controlled from other terminals over the control socket
//! (`phishscan pause|resume|reset`). Ctrl-C pauses; a second Ctrl-C while
//! paused stops and exports what has completed.

use anyhow::{Context, Result};
use phishscan_core::batch::{
    default_export_filename, write_csv, BatchError, BatchEvent, BatchOrchestrator, ItemState,
    RunOutcome,
};
use phishscan_core::config::PhishscanConfig;
use phishscan_core::control::{default_control_socket_path, ControlCommand};
use phishscan_core::scorer::scorer_from_config;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use crate::cli::control_socket;

pub async fn run_batch(
    cfg: &PhishscanConfig,
    input: Option<&Path>,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    let text = read_input(input).await?;

    let (event_tx, event_rx) = mpsc::channel(64);
    let orch = BatchOrchestrator::new(scorer_from_config(cfg))
        .with_events(event_tx)
        .with_item_timeout(cfg.batch.item_timeout());
    let run = orch.submit(text.lines())?;
    let total = run.len();
    if !json {
        println!("Submitted {} URLs", total);
    }
    let printer = tokio::spawn(print_events(event_rx, total, json));

    let socket_path = default_control_socket_path()?;
    let (cmd_tx, mut cmd_rx) = mpsc::channel(8);
    let listener = match control_socket::spawn_control_listener(cmd_tx, &socket_path) {
        Ok(h) => Some(h),
        Err(e) => {
            tracing::warn!("control socket unavailable: {}", e);
            None
        }
    };

    let (done_tx, mut done_rx) = mpsc::channel::<Result<RunOutcome, BatchError>>(4);
    let mut workers = 0usize;
    spawn_worker(&orch, &done_tx);
    workers += 1;

    loop {
        tokio::select! {
            Some(outcome) = done_rx.recv() => {
                workers = workers.saturating_sub(1);
                match outcome? {
                    RunOutcome::Finished | RunOutcome::Reset => break,
                    RunOutcome::Paused => {
                        eprintln!("Paused. `phishscan resume` continues, Ctrl-C again stops.");
                    }
                    RunOutcome::AlreadyRunning | RunOutcome::Resumed => {}
                }
            }
            Some(cmd) = cmd_rx.recv() => {
                tracing::info!(command = %cmd, "control command received");
                match cmd {
                    ControlCommand::Pause => orch.pause(),
                    ControlCommand::Resume => {
                        spawn_worker(&orch, &done_tx);
                        workers += 1;
                    }
                    ControlCommand::Reset => {
                        orch.reset();
                        eprintln!("Batch reset.");
                        if workers == 0 {
                            break;
                        }
                    }
                }
            }
            res = tokio::signal::ctrl_c() => {
                res?;
                if orch.snapshot().is_paused() {
                    break;
                }
                eprintln!("Pausing after the current URL...");
                orch.pause();
            }
        }
    }

    if let Some(h) = listener {
        h.abort();
    }
    let _ = std::fs::remove_file(&socket_path);

    let snapshot = orch.snapshot();
    let rows = orch.export_completed();
    if workers == 0 {
        drop(orch);
        let _ = printer.await;
    } else {
        printer.abort();
    }

    if !json {
        let counts = snapshot.counts();
        println!(
            "Done: {} completed, {} errors, {} not analyzed ({:.0}%)",
            counts.completed,
            counts.errored,
            counts.pending + counts.analyzing,
            snapshot.progress_percent()
        );
    }

    if let Some(target) = export {
        let path = export_path(target);
        write_csv(&path, &rows)?;
        if !json {
            println!("Exported {} rows to {}", rows.len(), path.display());
        }
    }
    Ok(())
}

fn spawn_worker(orch: &BatchOrchestrator, done: &mpsc::Sender<Result<RunOutcome, BatchError>>) {
    let orch = orch.clone();
    let done = done.clone();
    tokio::spawn(async move {
        let outcome = orch.start().await;
        let _ = done.send(outcome).await;
    });
}

async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read batch input: {}", path.display())),
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("read batch input from stdin")?;
            Ok(text)
        }
    }
}

/// A directory target gets the dated default file name.
fn export_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(default_export_filename())
    } else {
        target.to_path_buf()
    }
}

async fn print_events(mut rx: mpsc::Receiver<BatchEvent>, total: usize, json: bool) {
    while let Some(event) = rx.recv().await {
        if json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("encode event: {}", e),
            }
            continue;
        }
        match event {
            BatchEvent::ItemStarted { index, url } => {
                println!("[{}/{}] {}", index + 1, total, url);
            }
            BatchEvent::ItemFinished { item, .. } => match item.state() {
                ItemState::Completed {
                    result,
                    elapsed_secs,
                } => {
                    println!(
                        "  {:>3}  {:<10}  {:.2}s",
                        result.risk_score(),
                        result.classification(),
                        elapsed_secs
                    );
                    for signal in result.contributing_signals() {
                        println!("       - {}", signal);
                    }
                }
                ItemState::Errored {
                    error,
                    elapsed_secs,
                } => println!("  error: {} ({:.2}s)", error, elapsed_secs),
                ItemState::Pending | ItemState::Analyzing => {}
            },
            BatchEvent::Progress(p) => {
                let eta = p
                    .eta_secs()
                    .map(|s| format!("{:.0}s", s))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  progress {:.0}% ({}/{}), {:.2} URLs/s, eta {}",
                    p.percent(),
                    p.counts.finished(),
                    p.counts.total,
                    p.items_per_sec(),
                    eta
                );
            }
            BatchEvent::Stopped { .. } => {}
        }
    }
}
