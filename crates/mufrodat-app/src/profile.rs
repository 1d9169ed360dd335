use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mufrodat_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn profile_path(profiles_dir: &Path, name: &str) -> PathBuf {
    profiles_dir.join(format!("{name}.json"))
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, config: Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value: config,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}

/// Create the profiles folder and the main profile if missing
pub fn init_user_config(profiles_dir: &Path, defaults: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir)?;

    let main_profile = profile_path(profiles_dir, "main");
    if !main_profile.exists() {
        write_profile(&main_profile, "main", defaults.clone())?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(profiles_dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(profiles_dir, name);

    if profile_file.exists() {
        read_profile(&profile_file)
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile");
        let main_file = profile_path(profiles_dir, "main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::default())
        }
    }
}

/// Add a new profile cloned from main
pub fn add_profile_from_default(profiles_dir: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    let default_config = load_user_profile(profiles_dir, "main")?;
    let file = profile_path(profiles_dir, new_name);
    write_profile(&file, new_name, default_config)?;
    tracing::info!("Created new profile: {new_name}");
    Ok(file)
}

/// Resolve the effective config: profile values, then environment, then CLI overrides.
///
/// Unknown profile names are created from main so they can be edited later.
pub fn load_config(name: &str, data_dir: Option<&Path>) -> anyhow::Result<Config> {
    let mut defaults = Config::new();
    if let Some(dir) = data_dir {
        defaults.storage.data_dir = dir.to_path_buf();
    }

    let profiles_dir = defaults.storage.profiles_dir();
    init_user_config(&profiles_dir, &defaults)
        .with_context(|| format!("Failed to prepare {}", profiles_dir.display()))?;

    if !profile_path(&profiles_dir, name).exists() {
        add_profile_from_default(&profiles_dir, name)?;
    }

    let mut config = load_user_profile(&profiles_dir, name)?;
    config.apply_env();
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir.to_path_buf();
    }

    tracing::debug!("Using profile {name}, data in {}", config.storage.data_dir.display());
    Ok(config)
}
