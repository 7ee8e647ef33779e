pub mod import;
pub mod init;
pub mod programs;
pub mod reset;
pub mod show;
pub mod status;
pub mod toggle;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;

use crate::db;
use crate::error::Result;
use crate::registry;
use crate::session::Session;
use crate::settings::load_settings;
use crate::store::{progress_key, SqliteStore};

#[derive(Parser)]
#[command(name = "unitrack", about = "Track degree-requirement progress against a course catalog.")]
pub struct Cli {
    /// Print debug logging to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which catalog to work on: a registered program, or a bare catalog file.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Program id from programs.json (default: settings, or the only program)
    #[arg(long)]
    pub program: Option<String>,
    /// Catalog file to use directly, without the program registry
    #[arg(long, conflicts_with = "program")]
    pub catalog: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up unitrack: choose a data directory and initialize the database.
    Init {
        /// Path for unitrack data (default: ~/Documents/unitrack)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Program to use when --program is not given
        #[arg(long = "default-program")]
        default_program: Option<String>,
    },
    /// List registered programs.
    Programs,
    /// Show course groups, courses and progress.
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Flip a course between passed and not passed.
    Toggle {
        /// Group number as listed by `show`
        group: usize,
        /// Course number within the group as listed by `show`
        course: usize,
        #[command(flatten)]
        target: Target,
    },
    /// Mark courses passed from an exported transcript (HTML).
    Import {
        /// Path to the transcript HTML file
        file: String,
        #[command(flatten)]
        target: Target,
    },
    /// Mark every course as not passed.
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        #[command(flatten)]
        target: Target,
    },
    /// Overall progress and transcript import history.
    Status {
        #[command(flatten)]
        target: Target,
    },
}

pub(crate) struct LoadedCatalog {
    pub key: String,
    pub title: String,
    pub source: String,
    pub text: String,
}

pub(crate) fn load_catalog(data_dir: &Path, target: &Target) -> Result<LoadedCatalog> {
    if let Some(file) = &target.catalog {
        let text = std::fs::read_to_string(file)?;
        return Ok(LoadedCatalog {
            key: progress_key(None),
            title: file.clone(),
            source: file.clone(),
            text,
        });
    }

    let settings = load_settings();
    let programs = registry::load_programs(data_dir)?;
    let program = registry::select(
        &programs,
        target.program.as_deref(),
        settings.default_program.as_deref(),
    )?;
    let path = registry::catalog_path(data_dir, program);
    let text = std::fs::read_to_string(&path)?;
    Ok(LoadedCatalog {
        key: progress_key(Some(&program.id)),
        title: program.name.clone(),
        source: path.display().to_string(),
        text,
    })
}

/// Open the database and a session for `target`, then hand both to `f`.
pub(crate) fn with_session<T>(
    data_dir: PathBuf,
    target: &Target,
    f: impl FnOnce(&mut Session<'_, SqliteStore<'_>>, &Connection, &str) -> Result<T>,
) -> Result<T> {
    let conn = db::open(&data_dir)?;
    let loaded = load_catalog(&data_dir, target)?;
    let store = SqliteStore::new(&conn);
    let mut session = Session::open(&store, &loaded.key, &loaded.source, &loaded.text)?;
    f(&mut session, &conn, &loaded.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitrackError;

    #[test]
    fn test_load_catalog_from_file_uses_global_key() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("c.csv");
        std::fs::write(&file, "A - 3,,\nMath,M1,3\n").unwrap();
        let target = Target {
            program: None,
            catalog: Some(file.display().to_string()),
        };
        let loaded = load_catalog(dir.path(), &target).unwrap();
        assert_eq!(loaded.key, "courseProgress");
        assert!(loaded.text.contains("M1"));
    }

    #[test]
    fn test_load_catalog_for_program() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(registry::CATALOG_DIR)).unwrap();
        std::fs::write(dir.path().join("catalogs/cs.csv"), "A - 3,,\nMath,M1,3\n").unwrap();
        std::fs::write(
            dir.path().join(registry::REGISTRY_FILE),
            r#"[{"id":"cs","name":"Computer Engineering","catalog":"cs.csv"}]"#,
        )
        .unwrap();
        let target = Target {
            program: Some("cs".to_string()),
            catalog: None,
        };
        let loaded = load_catalog(dir.path(), &target).unwrap();
        assert_eq!(loaded.key, "courseProgress-cs");
        assert_eq!(loaded.title, "Computer Engineering");
    }

    #[test]
    fn test_load_catalog_unreachable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target {
            program: None,
            catalog: Some(dir.path().join("gone.csv").display().to_string()),
        };
        assert!(matches!(load_catalog(dir.path(), &target), Err(UnitrackError::Io(_))));
    }
}
