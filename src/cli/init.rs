use crate::db;
use crate::error::Result;
use crate::registry::{CATALOG_DIR, REGISTRY_FILE};
use crate::settings::{expand_path, load_settings, save_settings, Settings};

pub fn run(data_dir: Option<String>, default_program: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let defaults = Settings::default();

    if let Some(dir) = data_dir {
        settings.data_dir = expand_path(&dir);
    } else if settings.data_dir == defaults.data_dir {
        // First run: ask for the data dir
        println!("Data directory [{}]: ", settings.data_dir.display());
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = expand_path(chosen);
        }
    }
    if default_program.is_some() {
        settings.default_program = default_program;
    }

    save_settings(&settings)?;

    let resolved = settings.data_dir.clone();
    std::fs::create_dir_all(resolved.join(CATALOG_DIR))?;
    let registry = resolved.join(REGISTRY_FILE);
    if !registry.exists() {
        std::fs::write(&registry, "[]\n")?;
    }
    db::open(&resolved)?;

    println!("Initialized unitrack at {}", resolved.display());
    println!("Register programs in {}", registry.display());
    Ok(())
}
