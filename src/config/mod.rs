mod company;
mod data;

pub use company::{Company, Config, PdfSettings, ReportSettings};
pub use data::{load_calculations, CalculationData};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the calculations data file inside the config directory.
pub const CALCULATIONS_FILE: &str = "calculations.toml";

/// Get the config directory path (~/.calcreport/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "calcreport") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.calcreport/
    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".calcreport"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Load the calculations from `data`, or calculations.toml in the config directory
pub fn load_data(
    config_dir: &Path,
    config: &Config,
    data: Option<&Path>,
) -> Result<CalculationData> {
    let path = match data {
        Some(path) => path.to_path_buf(),
        None => config_dir.join(CALCULATIONS_FILE),
    };
    load_calculations(&path, &config.global_margins)
}

/// Directory receiving generated reports; relative paths are taken from the config directory.
pub fn resolve_output_dir(config_dir: &Path, config: &Config) -> PathBuf {
    let dir = expand_path(&config.pdf.output_dir);
    if dir.is_absolute() {
        dir
    } else {
        config_dir.join(dir)
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Your Company Name"
address = "Rue du Lac 1"          # optional
zip = "1000"                      # optional
city = "Lausanne"                 # optional
# phone = "+41 21 000 00 00"      # optional
# email = "info@yourcompany.com"  # optional
# url = "https://yourcompany.com" # optional, clickable in the header
# logo = "~/logo.png"             # optional, file path or http(s) URL

[report]
locale = "en-US"        # en-US, en-GB, fr-CH, de-CH, fr-FR, de-DE
minimum_margin = 0.1    # margins below 10% are printed in red
page_format = "a4"      # a4 or letter
orientation = "portrait"
application = "calcreport"
# application_url = "https://yourcompany.com/calculations"

[pdf]
output_dir = "output"   # relative to this directory, or absolute / ~/...

# Global margin applied to the groups total of calculations without
# a stored global margin, for totals in [minimum, maximum).
[[global_margins]]
minimum = 0.0
maximum = 1000.0
margin = 0.1

[[global_margins]]
minimum = 1000.0
maximum = 1000000000.0
margin = 0.05
"#;

/// Template content for calculations.toml
pub const CALCULATIONS_TEMPLATE: &str = r#"# Calculations listed by the reports. Each calculation holds groups,
# each group holds categories and each category holds items.
#
# Example:
#   calcreport report items --id 1

[[calculations]]
id = 1
date = "2024-03-15"
customer = "Example Customer"
description = "Kitchen shelves"
state = "draft"
user_margin = 0.0

[[calculations.groups]]
code = "Material"
margin = 0.2

[[calculations.groups.categories]]
code = "Wood"

[[calculations.groups.categories.items]]
description = "Oak board"
unit = "m2"
price = 85.0
quantity = 4.0

[[calculations.groups.categories.items]]
description = "Screws"
unit = "box"
price = 0.0
quantity = 2.0

[[calculations.groups]]
code = "Labour"
margin = 0.1

[[calculations.groups.categories]]
code = "Assembly"

[[calculations.groups.categories.items]]
description = "Assembly"
unit = "h"
price = 65.0
quantity = 3.0

[[calculations.groups.categories.items]]
description = "assembly"
unit = "h"
price = 65.0
quantity = 1.0

[[calculations]]
id = 2
date = "2024-04-02"
customer = "Another Customer"
description = "Office desk"
state = "accepted"
global_margin = 0.0

[[calculations.groups]]
code = "Material"
margin = 0.02

[[calculations.groups.categories]]
code = "Metal"

[[calculations.groups.categories.items]]
description = "Steel frame"
unit = "pc"
price = 240.0
quantity = 1.0
"#;
