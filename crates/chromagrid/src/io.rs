//! JSON configuration and report helpers for the calibration driver.

use crate::pipeline::{CalibrationOutcome, PipelineParams};
use chromagrid_calib::{MarginDetection, RotationEstimate};
use chromagrid_core::ColorLabel;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for one calibration run over an image on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrateConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to write an RGBA preview of the calibrated grid.
    #[serde(default)]
    pub preview_path: Option<String>,
    #[serde(default)]
    pub enable_lines: bool,
    #[serde(default)]
    pub params: PipelineParams,
}

impl CalibrateConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            preview_path: None,
            enable_lines: false,
            params: PipelineParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("chromagrid_report.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub image_path: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub rotation: Option<RotationEstimate>,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub margins: Option<MarginDetection>,
    /// Calibrated grid, top row first.
    #[serde(default)]
    pub rows: Option<Vec<Vec<ColorLabel>>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CalibrationReport {
    pub fn new(image_path: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            image_path: image_path.into(),
            width,
            height,
            rotation: None,
            rotated: false,
            margins: None,
            rows: None,
            error: None,
        }
    }

    /// Populate report fields from a successful calibration.
    pub fn set_outcome(&mut self, outcome: &CalibrationOutcome) {
        self.rotation = Some(outcome.rotation);
        self.rotated = outcome.rotated;
        self.margins = Some(outcome.margins);
        self.rows = Some(outcome.grid.rows().map(<[ColorLabel]>::to_vec).collect());
        self.error = None;
    }

    /// Record a failure.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
