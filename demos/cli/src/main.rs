use clap::{Parser, Subcommand};
use colored::*;
use font_cache::{default_snapshot_dir, CachedCatalog};
use font_catalog::{CatalogSource, GoogleFontsCatalog};
use font_core::{
    Category, FontError, Mood, PairingConfig, Recommendation, Role, RoleSet, SelectedFont, SortOrder,
};
use font_pairing::RecommendationRequest;
use font_session::{default_size, Dispatch};
use font_setup::{get_config_path, interactive_setup, load_config, save_config, show_current_config};
use indicatif::{ProgressBar, ProgressStyle};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Recommend { mood, prompt, select, offline, json } => {
            let config = load_config()?;

            if !mood.is_empty() && Mood::parse(&mood).is_none() {
                eprintln!("⚠️  Unknown mood '{}', showing every category", mood);
                eprintln!("   Moods: {}", mood_list());
            }

            let mut selection = Vec::with_capacity(select.len());
            for arg in &select {
                match parse_selection(arg) {
                    Ok(font) => selection.push(font),
                    Err(e) => {
                        eprintln!("❌ Bad --select '{}': {}", arg, e);
                        eprintln!("   Format: \"Family:category:role[:size]\", e.g. \"Roboto:sans-serif:heading:48\"");
                        process::exit(2);
                    }
                }
            }

            let dispatcher = font_pairing_workspace::dispatcher(&config, offline)?;
            let request = RecommendationRequest::new(mood.clone(), prompt.clone().unwrap_or_default(), selection);

            let pb = spinner(json)?;
            pb.set_message(format!("Pairing fonts from {}...", dispatcher.engine().source_name()));

            let recommendations = match dispatcher.dispatch(request).await {
                Dispatch::Fresh(recommendations) => recommendations,
                Dispatch::Superseded => Vec::new(),
            };
            pb.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
                return Ok(());
            }

            print_header(&mood, prompt.as_deref(), &select);
            if recommendations.is_empty() {
                println!("{}", "No recommendations".yellow());
                println!("💡 Try a mood: {}", mood_list());
            }
            for (i, rec) in recommendations.iter().enumerate() {
                print_recommendation(i + 1, rec);
            }
        }

        Commands::Popular { sort, offline } => {
            let config = load_config()?;
            let sort = sort.unwrap_or(config.sort_order);
            let catalog = font_pairing_workspace::browsable_catalog(&config, offline)?;

            let pb = spinner(false)?;
            pb.set_message(format!("Fetching catalog by {}...", sort));
            let fonts = catalog.fetch_catalog(sort).await?;
            pb.finish_and_clear();

            println!("📚 {} fonts ({})", fonts.len().to_string().bold(), sort);
            println!("{}", "-".repeat(50));
            for font in fonts.iter().take(20) {
                println!("   {:<28} {}", font.family.bold(), font.category.to_string().dimmed());
            }
            if fonts.len() > 20 {
                println!("   ... and {} more", fonts.len() - 20);
            }
        }

        Commands::Setup => {
            let config = interactive_setup();
            save_config(&config)?;

            println!("\n{}", "✅ SETUP COMPLETED".green().bold());
            println!("📁 Configuration saved to: {:?}", get_config_path()?);

            println!("\n{}", "🚀 QUICK START".bold());
            println!("   Pair by mood:   {}", "fp recommend --mood elegant".cyan());
            println!("   Pair by prompt: {}", "fp recommend --prompt \"retro poster\"".cyan());
            println!("   Around a font:  {}", "fp recommend --select \"Roboto:sans-serif:heading\"".cyan());
        }

        Commands::Config(subcommand) => match subcommand {
            ConfigCommands::Show => {
                show_current_config()?;
            }

            ConfigCommands::Set { key, value } => {
                let mut config = load_config()?;
                if let Err(e) = set_config_value(&mut config, &key, &value) {
                    println!("❌ {}", e);
                    println!("   Available keys:");
                    println!("     - api_key: Google Fonts API key (empty to clear)");
                    println!("     - sort_order: popularity, trending or alpha");
                    println!("     - timeout: Catalog request timeout (seconds)");
                    println!("     - cache_ttl: Catalog snapshot lifetime (seconds)");
                    println!("     - disk_snapshot: Keep an offline snapshot (true/false)");
                    println!("     - max_recommendations: Results per call (1-5)");
                    println!("     - keyword_match: token-contains-keyword, bidirectional or exact-token");
                    println!("     - role_chance: deterministic, random or seeded");
                    println!("     - seed: Seed for seeded role chance");
                    process::exit(1);
                }
                save_config(&config)?;
                println!("✅ {} updated", key);
                println!("   Configuration saved.");
            }

            ConfigCommands::Reset => {
                save_config(&PairingConfig::default())?;
                println!("✅ Configuration reset to defaults");
                show_current_config()?;
            }
        },

        Commands::Cache(subcommand) => match subcommand {
            CacheCommands::Refresh { sort } => {
                let config = load_config()?;
                let sort = sort.unwrap_or(config.sort_order);
                let cache = CachedCatalog::from_config(GoogleFontsCatalog::from_config(&config)?, &config)?;

                let pb = spinner(false)?;
                pb.set_message("Refreshing catalog snapshot...");
                match cache.refresh(sort).await {
                    Ok(fonts) => {
                        pb.finish_with_message("✓ Catalog refreshed");
                        println!("   {} fonts cached ({})", fonts.len(), sort);
                    }
                    Err(e) => {
                        pb.finish_and_clear();
                        println!("❌ Refresh failed: {}", e);
                        if config.api_key.is_none() {
                            println!("💡 Set an API key with: {}", "fp config set api_key <KEY>".cyan());
                        }
                    }
                }
            }

            CacheCommands::Clear => {
                let dir = default_snapshot_dir()?;
                if dir.exists() {
                    std::fs::remove_dir_all(&dir)?;
                    println!("✅ Removed catalog snapshots in {:?}", dir);
                } else {
                    println!("Nothing cached at {:?}", dir);
                }
            }
        },

        Commands::Version => {
            println!("{}", "=".repeat(60));
            println!("🎨 Font Pairing CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", "=".repeat(60));
            println!("🕒 Built: {}", env!("BUILD_TIMESTAMP"));
            println!("🎯 Moods: {}", mood_list());
            println!("🌐 Catalog: Google Fonts (offline snapshot + popular list)");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(hidden: bool) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn mood_list() -> String {
    Mood::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ")
}

/// `Family:category:role[:size]`; size defaults by role
fn parse_selection(arg: &str) -> Result<SelectedFont, FontError> {
    let parts: Vec<&str> = arg.split(':').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) || parts[0].is_empty() {
        return Err(FontError::Parse("expected Family:category:role[:size]".to_string()));
    }

    let category: Category = parts[1].parse()?;
    let role: Role = parts[2].parse()?;
    let size = match parts.get(3) {
        Some(size) => size
            .parse()
            .map_err(|_| FontError::Parse(format!("invalid size: {}", size)))?,
        None => default_size(role),
    };

    Ok(SelectedFont::new(parts[0], category, role, size))
}

fn set_config_value(config: &mut PairingConfig, key: &str, value: &str) -> Result<(), FontError> {
    let number = |value: &str| {
        value
            .parse::<u64>()
            .map_err(|_| FontError::Config(format!("{} expects a number, got '{}'", key, value)))
    };
    let flag = |value: &str| match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(FontError::Config("Use true/false, yes/no, or on/off".to_string())),
    };

    match key.to_lowercase().as_str() {
        "api_key" | "key" => {
            config.api_key = Some(value.trim().to_string()).filter(|k| !k.is_empty());
        }
        "sort_order" | "sort" => config.sort_order = value.parse()?,
        "timeout" | "request_timeout_secs" => config.request_timeout_secs = number(value)?,
        "cache_ttl" | "cache_ttl_secs" => config.cache_ttl_secs = number(value)?,
        "disk_snapshot" | "snapshot" => config.disk_snapshot = flag(value)?,
        "max_recommendations" | "limit" => {
            let limit = number(value)?;
            if !(1..=5).contains(&limit) {
                return Err(FontError::Config("max_recommendations must be between 1 and 5".to_string()));
            }
            config.max_recommendations = limit as usize;
        }
        "keyword_match" | "matching" => config.keyword_match = value.parse()?,
        "role_chance" | "chance" => config.role_chance = value.parse()?,
        "seed" => config.seed = number(value)?,
        _ => return Err(FontError::Config(format!("Unknown configuration key: {}", key))),
    }
    Ok(())
}

fn print_header(mood: &str, prompt: Option<&str>, select: &[String]) {
    println!("{}", "=".repeat(50));
    match prompt.filter(|p| !p.trim().is_empty()) {
        Some(prompt) => println!("💬 Prompt: {}", prompt.bold()),
        None if mood.is_empty() => println!("🎨 Mood: {}", "any".dimmed()),
        None => println!("🎨 Mood: {}", mood.bold()),
    }
    if !select.is_empty() {
        println!("📌 Board: {}", select.join(", "));
    }
    println!("{}", "=".repeat(50));
}

fn print_recommendation(rank: usize, rec: &Recommendation) {
    println!("{}. {} {}", rank, rec.family().bold(), format!("({})", rec.category()).dimmed());
    println!("   Roles: {}", describe_roles(rec.recommended_roles));
    if !rec.font.variants.is_empty() {
        println!("   Variants: {}", rec.font.variants.join(", "));
    }
}

fn describe_roles(roles: RoleSet) -> ColoredString {
    if roles.is_empty() {
        return "none".dimmed();
    }
    let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    if roles.contains(Role::Heading) || roles.contains(Role::Body) {
        names.join(", ").green()
    } else {
        names.join(", ").yellow()
    }
}

#[derive(Parser)]
#[command(name = "fp",
          about = "Font pairing CLI",
          version,
          long_about = "Suggests fonts that pair with what you already have,\nby mood or by a short style prompt.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend up to five fonts for a mood or prompt, around the fonts already picked.
    #[command(alias = "r")]
    Recommend {
        /// professional, creative, elegant, playful or modern
        #[arg(short = 'm', long = "mood", default_value = "professional")]
        mood: String,

        /// Free-text style description. Overrides the mood when given.
        #[arg(short = 'p', long = "prompt")]
        prompt: Option<String>,

        /// A font already on the board, as "Family:category:role[:size]". Repeatable.
        #[arg(short = 's', long = "select", value_name = "FONT")]
        select: Vec<String>,

        /// Use the built-in popular list instead of the web catalog.
        #[arg(long)]
        offline: bool,

        /// Print recommendations as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the catalog (or the built-in popular list when it can't be reached).
    Popular {
        /// popularity, trending or alpha
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Skip the web catalog.
        #[arg(long)]
        offline: bool,
    },

    /// Run the interactive configuration wizard.
    Setup,

    /// Inspect or change configuration.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Manage the catalog snapshot cache.
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version and build information.
    Version,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key (sort_order, keyword_match, etc.)
        key: String,

        /// Value to set
        value: String,
    },

    /// Reset to defaults
    Reset,
}

#[derive(Subcommand, Clone)]
enum CacheCommands {
    /// Fetch the web catalog now and store it
    Refresh {
        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Delete the on-disk catalog snapshots
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_args_parse() {
        let font = parse_selection("Playfair Display:serif:heading").unwrap();
        assert_eq!(font.family, "Playfair Display");
        assert_eq!(font.category, Category::Serif);
        assert_eq!(font.size, 48);

        let font = parse_selection("Roboto:sans:body:18").unwrap();
        assert_eq!((font.category, font.role, font.size), (Category::SansSerif, Role::Body, 18));

        assert!(parse_selection("Roboto").is_err());
        assert!(parse_selection("Roboto:gothic:body").is_err());
        assert!(parse_selection("Roboto:serif:footer").is_err());
        assert!(parse_selection("Roboto:serif:body:big").is_err());
    }

    #[test]
    fn config_keys_update_fields() {
        let mut config = PairingConfig::default();
        set_config_value(&mut config, "sort", "trending").unwrap();
        set_config_value(&mut config, "disk_snapshot", "off").unwrap();
        set_config_value(&mut config, "role_chance", "seeded").unwrap();
        set_config_value(&mut config, "seed", "42").unwrap();

        assert_eq!(config.sort_order, SortOrder::Trending);
        assert!(!config.disk_snapshot);
        assert_eq!(config.seed, 42);
        assert!(set_config_value(&mut config, "limit", "9").is_err());
        assert!(set_config_value(&mut config, "colour", "blue").is_err());
    }
}
