use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculation::{Calculation, GlobalMargin};
use crate::error::{ReportError, Result};

/// Content of a calculations data file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CalculationData {
    #[serde(default)]
    pub calculations: Vec<Calculation>,
}

impl CalculationData {
    pub fn find(&self, id: u32) -> Result<&Calculation> {
        self.calculations
            .iter()
            .find(|c| c.id == id)
            .ok_or(ReportError::CalculationNotFound(id))
    }
}

/// Load calculations from a TOML file, or a JSON file when the extension is
/// `.json`, and resolve their global margins from `ranges`.
pub fn load_calculations(path: &Path, ranges: &[GlobalMargin]) -> Result<CalculationData> {
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut data: CalculationData = if is_json {
        serde_json::from_str(&content).map_err(|e| ReportError::DataParse {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        toml::from_str(&content).map_err(|e| ReportError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    for calculation in &mut data.calculations {
        calculation.resolve_global_margin(ranges);
    }
    debug!(
        "{} calculation(s) loaded from {}",
        data.calculations.len(),
        path.display()
    );
    Ok(data)
}
