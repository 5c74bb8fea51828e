// CubeX - variant inspection tool
// Reads canonical variant text from stdin, one value per line, and prints JSON lines

use anyhow::Context;
use cubex_core::Variant;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting cubex...");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let mut parsed = 0usize;
    let mut rejected = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        match Variant::from_text(line) {
            Ok(value) => {
                serde_json::to_writer(&mut out, &value).context("Failed to write JSON")?;
                writeln!(out)?;
                parsed += 1;
            }
            Err(e) => {
                tracing::warn!("Line {}: {}", index + 1, e);
                rejected += 1;
            }
        }
    }

    tracing::info!("Parsed {} values, rejected {}", parsed, rejected);
    Ok(())
}
