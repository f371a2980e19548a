//! `<artifact>.provenance.json` sidecars: which command, tolerances, and outcome.

use anyhow::{Context, Result};
use barycenter::geom2::GeomCfg;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Tolerances a result was computed with.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Tolerances {
    pub eps_det: f64,
    pub eps_feas: f64,
    pub eps_area: f64,
}

impl From<GeomCfg> for Tolerances {
    fn from(cfg: GeomCfg) -> Self {
        Self {
            eps_det: cfg.eps_det,
            eps_feas: cfg.eps_feas,
            eps_area: cfg.eps_area,
        }
    }
}

/// Sidecar document.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub cmd: &'static str,
    pub code_rev: String,
    pub barycenter_version: &'static str,
    pub tolerances: Option<Tolerances>,
    pub params: Value,
    pub summary: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(cmd: &'static str, params: Value) -> Self {
        Self {
            cmd,
            code_rev: code_rev(),
            barycenter_version: barycenter::VERSION,
            tolerances: None,
            params,
            summary: Value::Null,
            outputs: Vec::new(),
        }
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.tolerances = Some(cfg.into());
        self
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }

    /// Write next to `artifact`, which is recorded as the output.
    pub fn write_beside(mut self, artifact: &Path) -> Result<PathBuf> {
        self.outputs.push(artifact.to_string_lossy().into_owned());
        let path = sidecar_path(artifact);
        std::fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit from `GIT_COMMIT` (build time first, then run time), else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
