use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UnitrackError};

pub const REGISTRY_FILE: &str = "programs.json";
pub const CATALOG_DIR: &str = "catalogs";

/// One academic program and the catalog file it is tracked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(alias = "slug")]
    pub id: String,
    pub name: String,
    #[serde(alias = "csvFile")]
    pub catalog: String,
    #[serde(default, alias = "guidePdf")]
    pub guide: String,
    #[serde(default)]
    pub description: String,
}

/// Load the ordered program list from `data_dir`. A missing file means no programs.
pub fn load_programs(data_dir: &Path) -> Result<Vec<Program>> {
    let path = data_dir.join(REGISTRY_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn find<'a>(programs: &'a [Program], id: &str) -> Result<&'a Program> {
    programs
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| UnitrackError::UnknownProgram(id.to_string()))
}

/// Pick the program to work on: an explicit id, else the configured default, else
/// the only registered program.
pub fn select<'a>(
    programs: &'a [Program],
    requested: Option<&str>,
    default: Option<&str>,
) -> Result<&'a Program> {
    if let Some(id) = requested.or(default) {
        return find(programs, id);
    }
    match programs {
        [only] => Ok(only),
        [] => Err(UnitrackError::Other(format!(
            "No programs registered. Add one to {REGISTRY_FILE} in the data directory."
        ))),
        _ => Err(UnitrackError::Other(
            "Several programs are registered; pass --program".to_string(),
        )),
    }
}

/// Resolve a program's catalog file; relative paths live under `catalogs/`.
pub fn catalog_path(data_dir: &Path, program: &Program) -> PathBuf {
    let path = PathBuf::from(&program.catalog);
    if path.is_absolute() {
        path
    } else {
        data_dir.join(CATALOG_DIR).join(path)
    }
}
