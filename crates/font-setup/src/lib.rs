use std::path::{Path, PathBuf};
use dialoguer::{Confirm, Input, Select};
use directories::ProjectDirs;
use font_core::{FontError, FontResult, KeywordMatch, PairingConfig, RoleChanceMode, SortOrder};
use tracing::debug;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "GOOGLE_FONTS_API_KEY";

pub fn interactive_setup() -> PairingConfig {
    println!("\n{}", "=".repeat(50));
    println!("🎨 FONT PAIRING - QUICK SETUP");
    println!("{}", "=".repeat(50));

    // Question 1: API key
    println!("\n🔑 1. Google Fonts API key:");
    println!("   ↪ Needed to browse the full web catalog");
    println!("   ↪ Leave empty to work from the built-in popular list");

    let api_key: String = Input::new()
        .with_prompt("   API key")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    // Question 2: Catalog order
    println!("\n📊 2. Catalog order:");
    println!("   ↪ Recommendations keep the catalog's order inside each rank");

    let orders = [SortOrder::Popularity, SortOrder::Trending, SortOrder::Alpha];
    let labels: Vec<&str> = orders.iter().map(|o| o.as_str()).collect();
    let sort_index = Select::new()
        .with_prompt("   Sort catalog by")
        .items(&labels)
        .default(0)
        .interact()
        .unwrap_or(0);

    // Question 3: Offline snapshot
    println!("\n💾 3. Offline snapshot:");
    println!("   ↪ Keeps the last fetched catalog on disk");
    println!("   ↪ Used when the API can't be reached");

    let disk_snapshot = Confirm::new()
        .with_prompt("   Keep an offline snapshot?")
        .default(true)
        .interact()
        .unwrap_or(true);

    println!("\n{}", "=".repeat(50));

    let confirm = Confirm::new()
        .with_prompt("\nApply these settings?")
        .default(true)
        .interact()
        .unwrap_or(true);

    if confirm {
        PairingConfig {
            api_key: Some(api_key.trim().to_string()).filter(|key| !key.is_empty()),
            sort_order: orders[sort_index.min(orders.len() - 1)],
            disk_snapshot,
            ..PairingConfig::default()
        }
    } else {
        println!("\nSetup cancelled. Using defaults.");
        println!("You can run setup later with: fp setup");
        PairingConfig::default()
    }
}

/// Load the config file, falling back to defaults when there is none, then
/// apply environment overrides
pub fn load_config() -> FontResult<PairingConfig> {
    let config = load_config_from(&get_config_path()?)?;
    Ok(apply_api_key_override(config, std::env::var(API_KEY_ENV).ok()))
}

pub fn load_config_from(path: &Path) -> FontResult<PairingConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PairingConfig::default());
    }

    let config_str = std::fs::read_to_string(path)?;
    toml::from_str(&config_str)
        .map_err(|e| FontError::Config(format!("{}: {}", path.display(), e)))
}

pub fn save_config(config: &PairingConfig) -> FontResult<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &PairingConfig, path: &Path) -> FontResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config_str = toml::to_string_pretty(config)
        .map_err(|e| FontError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, config_str)?;

    Ok(())
}

pub fn get_config_path() -> FontResult<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "font-pairing", "config")
        .ok_or_else(|| FontError::Config("Could not determine config directory".to_string()))?;

    Ok(project_dirs.config_dir().join("config.toml"))
}

/// A non-blank key from the environment replaces the configured one
pub fn apply_api_key_override(mut config: PairingConfig, env_key: Option<String>) -> PairingConfig {
    if let Some(key) = env_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        config.api_key = Some(key);
    }
    config
}

pub fn show_current_config() -> FontResult<()> {
    let config = load_config()?;

    println!("{}", "=".repeat(50));
    println!("📋 CURRENT CONFIGURATION");
    println!("{}", "=".repeat(50));

    println!("\n🌐 Catalog:");
    println!("   Endpoint: {}", config.api_url);
    println!("   API key: {}", if config.api_key.is_some() { "set" } else { "not set" });
    println!("   Sort order: {}", config.sort_order);
    println!("   Request timeout: {}s", config.request_timeout_secs);

    println!("\n💾 Cache:");
    println!("   Snapshot TTL: {}s", config.cache_ttl_secs);
    println!("   Offline snapshot: {}", config.disk_snapshot);

    println!("\n🎯 Recommendations:");
    println!("   Max results: {}", config.recommendation_limit());
    println!("   Keyword matching: {}", describe_matching(config.keyword_match));
    println!("   Role chance: {}", describe_chance(config.role_chance, config.seed));

    println!("\n{}", "=".repeat(50));

    Ok(())
}

fn describe_matching(matching: KeywordMatch) -> String {
    match matching {
        KeywordMatch::TokenContainsKeyword => format!("{} (default)", matching),
        _ => matching.to_string(),
    }
}

fn describe_chance(mode: RoleChanceMode, seed: u64) -> String {
    match mode {
        RoleChanceMode::Seeded => format!("{} (seed {})", mode, seed),
        _ => mode.to_string(),
    }
}
