//! `phishscan analyze <url>...` – score URLs one at a time.

use anyhow::{bail, Result};
use phishscan_core::config::PhishscanConfig;
use phishscan_core::history::AnalysisHistory;
use phishscan_core::scorer::{scorer_from_config, AnalysisResult};

pub async fn run_analyze(cfg: &PhishscanConfig, urls: &[String], json: bool) -> Result<()> {
    let scorer = scorer_from_config(cfg);
    let mut history = AnalysisHistory::new(cfg.batch.history_size);
    let mut failures = 0usize;

    for url in urls {
        match scorer.analyze(url).await {
            Ok(result) => {
                print_result(&result, json)?;
                history.record(result);
            }
            // A lone URL surfaces its error directly.
            Err(e) if urls.len() == 1 => return Err(e.into()),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", url, e);
            }
        }
    }

    if urls.len() > 1 && !json && !history.is_empty() {
        println!();
        println!("Recent analyses (newest first):");
        for r in history.iter() {
            println!(
                "  {:>3}  {:<10}  {}",
                r.risk_score(),
                r.classification(),
                r.url()
            );
        }
    }

    if failures > 0 {
        bail!("{} of {} URLs could not be analyzed", failures, urls.len());
    }
    Ok(())
}

fn print_result(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }
    println!("{}", result.url());
    println!(
        "  risk score: {}  classification: {}",
        result.risk_score(),
        result.classification()
    );
    if result.contributing_signals().is_empty() {
        println!("  no risk signals");
    }
    for signal in result.contributing_signals() {
        println!("  - {}", signal);
    }
    Ok(())
}
