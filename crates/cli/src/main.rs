use anyhow::{Context, Result};
use barycenter::geom2::GeomCfg;
use barycenter::tension::{TensionProblem, WrenchMatrix};
use clap::{Parser, Subcommand};
use nalgebra::Vector6;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod records;
mod snapshots;

use provenance::{code_rev, Provenance};
use records::{replay, Record};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Barycenter of band-constrained polygons: replay, sample, tension")]
struct Cmd {
    /// Feasibility slack applied to every band during vertex enumeration
    #[arg(long, global = true, default_value_t = GeomCfg::default().eps_feas)]
    eps_feas: f64,

    /// Log every frame, not only summaries
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Replay recorded snapshots (headerless CSV, 32 values per row) and write per-row results
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write random valid snapshots as CSV
    Sample {
        #[arg(long, default_value_t = 10)]
        count: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Distribute cable tensions at the barycenter for one wrench (JSON in, JSON out)
    Tension {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let cfg = GeomCfg::default().with_eps_feas(cmd.eps_feas);
    match cmd.action {
        Action::Run { input, out } => run(&input, &out, cfg),
        Action::Sample { count, seed, out } => sample(count, seed, &out),
        Action::Tension { input, out } => tension(&input, &out, cfg),
        Action::Report => report(cfg),
    }
}

fn run(input: &Path, out: &Path, cfg: GeomCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), eps_feas = cfg.eps_feas, "run");
    let rows = snapshots::read_rows(input)?;
    let recs = replay(&rows, cfg);
    write_json(out, &recs)?;
    Provenance::new("run", serde_json::json!({ "input": input.to_string_lossy() }))
        .with_cfg(cfg)
        .with_summary(summarize(&recs))
        .write_beside(out)?;
    Ok(())
}

/// Counts per outcome plus the indices of rows dropped at the boundary.
fn summarize(recs: &[Record]) -> serde_json::Value {
    let count = |f: fn(&Record) -> bool| recs.iter().filter(|r| f(r)).count();
    let rejected_rows: Vec<usize> = recs
        .iter()
        .filter_map(|r| match r {
            Record::Rejected { row, .. } => Some(*row),
            _ => None,
        })
        .collect();
    serde_json::json!({
        "rows": recs.len(),
        "polygons": count(|r| matches!(r, Record::Polygon { .. })),
        "degenerate": count(|r| matches!(r, Record::Degenerate { .. })),
        "rejected": rejected_rows.len(),
        "rejected_rows": rejected_rows,
    })
}

fn sample(count: u64, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(count, seed, out = %out.display(), "sample");
    snapshots::write_sample(out, count, seed)?;
    Provenance::new("sample", serde_json::json!({ "count": count, "seed": seed }))
        .write_beside(out)?;
    Ok(())
}

/// Input of the `tension` command: wrench matrix rows, desired wrench, limits.
#[derive(Debug, Deserialize)]
struct TensionInput {
    w: [[f64; 8]; 6],
    wrench: [f64; 6],
    tau_min: f64,
    tau_max: f64,
}

#[derive(Debug, Serialize)]
struct TensionOutput {
    /// The 32-value snapshot a feed would carry for this step.
    snapshot: Vec<f64>,
    particular: Vec<f64>,
    result: Record,
    tensions: Option<Vec<f64>>,
}

fn tension_output(input: &TensionInput, cfg: GeomCfg) -> Result<TensionOutput> {
    let w = WrenchMatrix::from_fn(|r, c| input.w[r][c]);
    let prob = TensionProblem::new(w, input.tau_min, input.tau_max)?;
    let dist = prob.distribute(&Vector6::from_row_slice(&input.wrench), cfg)?;
    let frame = match &dist.outcome {
        Ok((polygon, centroid, _)) => barycenter::feed::Frame::Polygon {
            polygon: polygon.clone(),
            centroid: *centroid,
        },
        Err(d) => barycenter::feed::Frame::Degenerate(*d),
    };
    Ok(TensionOutput {
        snapshot: barycenter::feed::encode(&dist.constraints).to_vec(),
        particular: dist.split.particular.iter().copied().collect(),
        result: Record::from_frame(0, &frame),
        tensions: dist
            .outcome
            .as_ref()
            .ok()
            .map(|(_, _, tau)| tau.iter().copied().collect()),
    })
}

fn tension(input: &Path, out: &Path, cfg: GeomCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "tension");
    let text =
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let parsed: TensionInput =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))?;
    let output = tension_output(&parsed, cfg)?;
    write_json(out, &output)?;
    Provenance::new("tension", serde_json::json!({ "input": input.to_string_lossy() }))
        .with_cfg(cfg)
        .with_summary(serde_json::json!({ "feasible": output.tensions.is_some() }))
        .write_beside(out)?;
    Ok(())
}

fn report(cfg: GeomCfg) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": code_rev(),
        "barycenter_version": barycenter::VERSION,
        "params": {
            "eps_det": cfg.eps_det,
            "eps_feas": cfg.eps_feas,
            "eps_area": cfg.eps_area,
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
