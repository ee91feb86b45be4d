//! `overdue color` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::urgency::{compute_color, Phase, Rgb};

#[derive(Args)]
pub struct ColorArgs {
    /// Time since the task was last done (e.g. 36h)
    elapsed: String,

    /// Minimum threshold
    #[arg(long)]
    min: String,

    /// Maximum threshold
    #[arg(long)]
    max: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ColorJson {
    hex: String,
    rgb: Rgb,
    phase: Phase,
}

pub async fn run(args: ColorArgs) -> Result<()> {
    let elapsed = crate::task::parse_threshold(&args.elapsed)? as f64;
    let min = crate::task::parse_threshold(&args.min)?;
    let max = crate::task::parse_threshold(&args.max)?;

    let color = compute_color(elapsed, min, max)?;
    let phase = Phase::of(elapsed, min, max)?;

    if args.json {
        let out = ColorJson {
            hex: color.to_hex(),
            rgb: color,
            phase,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", color.to_hex());
    println!("  RGB:   ({}, {}, {})", color.r, color.g, color.b);
    println!("  Phase: {}", phase);

    Ok(())
}
