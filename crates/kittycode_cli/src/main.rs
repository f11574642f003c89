//! Admin probe for the content core.
//!
//! Usage: `kittycode_cli [config.json]`
//!
//! Loads config (defaults when no path is given), opens the configured
//! document store and prints per-collection counts and grouped skills.

use kittycode_core::db::{open_db, open_db_in_memory};
use kittycode_core::{
    core_version, init_logging_from_config, load_config, CollectionManager, CoreConfig,
    RequiredFields, SkillService, SqliteCollectionStore,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => {
            let mut config = CoreConfig::default();
            config.apply_env_overrides();
            config
        }
    };
    init_logging_from_config(&config)?;

    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteCollectionStore::try_new(&conn)?;

    println!("kittycode_core version={}", core_version());
    let names = &config.collections;
    for collection in [&names.skills, &names.team_members, &names.contacts] {
        let manager = CollectionManager::new(&store, collection.as_str(), RequiredFields::none());
        println!("collection={collection} count={}", manager.list()?.len());
    }

    let skills = SkillService::new(&store, names.skills.as_str());
    for group in skills.list_grouped()? {
        println!("[{}]", group.label);
        for (id, skill) in group.skills {
            println!("  {id} {} level={}", skill.name, skill.level);
        }
    }
    Ok(())
}
