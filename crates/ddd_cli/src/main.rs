use clap::Parser;
use ddd_core::{Article, DateRange, DigestConfig, DigestHistoryItem, Error, ExperienceLevel, Rating, Result, Topic};
use ddd_inference::{Config, Pipeline, Provider};
use ddd_storage::{credentials, Library, StorageKind};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A trailing bare number counts as seconds
        if !current_number.is_empty() {
            total_seconds = current_number
                .parse::<u64>()
                .ok()
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| format!("Invalid number in duration: {}", s))?;
            has_unit = true;
        }

        if !has_unit || total_seconds == 0 {
            return Err("Duration must include a positive number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "ddd", author, version, about = "Daily design reading digests", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, global = true, default_value_t = StorageKind::File)]
    storage: StorageKind,
    /// Where lists and the stored API key live (defaults to DDD_DATA_DIR or ./.ddd)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Content generator; overrides DDD_PROVIDER
    #[arg(long, value_enum, global = true)]
    model: Option<Provider>,
    /// Gemini model name; overrides DDD_MODEL
    #[arg(long, global = true)]
    model_name: Option<String>,
    /// Gemini API key; overrides GEMINI_API_KEY and the stored key
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Per-request timeout (e.g. 90s, 2m, 1m30s)
    #[arg(long, global = true)]
    timeout: Option<HumanDuration>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a digest of four articles
    Digest {
        #[arg(long, value_enum, default_value_t = ExperienceLevel::MidLevel)]
        level: ExperienceLevel,
        /// Repeat to select several topics
        #[arg(long = "topic", short = 't', value_enum)]
        topics: Vec<Topic>,
        #[arg(long, value_enum, default_value_t = DateRange::LastMonth)]
        date_range: DateRange,
        /// Ignore liked and disliked articles
        #[arg(long)]
        no_preferences: bool,
        #[arg(long)]
        json: bool,
    },
    /// Summarize a single link
    Analyze {
        url: String,
        #[arg(long)]
        json: bool,
    },
    /// List past digests and analyses
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Print a history item
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// List saved articles
    Saved,
    /// Save an article seen in history, or unsave it
    Save { url: String },
    /// Rate an article seen in history; omit the rating to clear it
    Rate {
        url: String,
        #[arg(value_enum)]
        rating: Option<Rating>,
    },
    /// Manage the stored API key
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(clap::Subcommand, Debug)]
enum AuthCommands {
    Set { key: String },
    Reset,
}

/// Flag, then environment, then the key stored in the data directory.
async fn resolve_config(cli: &Cli, data_dir: &std::path::Path) -> Result<Config> {
    let mut config = Config::from_env();
    if let Some(provider) = cli.model {
        config.provider = provider;
    }
    if let Some(name) = &cli.model_name {
        config.model_name = Some(name.clone());
    }
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if !config.has_api_key() {
        config.api_key = credentials::load_api_key(data_dir).await?;
    }
    config.request_timeout = cli.timeout.as_ref().map(|t| t.0);
    Ok(config)
}

fn print_article(article: &Article) {
    println!("{}", article.title);
    println!("  {} · {} · {} · {}", article.author, article.source, article.kind, article.category);
    println!("  {}", article.url);
    for line in &article.summary {
        println!("  - {}", line);
    }
    if !article.insights.is_empty() {
        println!("  Insights:");
        for insight in &article.insights {
            println!("    * {}", insight);
        }
    }
    if !article.application_tips.is_empty() {
        println!("  Try this:");
        for tip in &article.application_tips {
            println!("    * {}", tip);
        }
    }
    if article.is_inferred() {
        println!("  (inferred from the link, not read)");
    }
    println!();
}

fn print_item(item: &DigestHistoryItem, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }
    for article in item.articles() {
        print_article(article);
    }
    Ok(())
}

fn describe(item: &DigestHistoryItem) -> String {
    let when = item.timestamp().format("%Y-%m-%d %H:%M");
    match item.config() {
        Some(config) => format!(
            "{}  {}  {} · {} · {} ({} articles)",
            item.id(),
            when,
            config.level,
            config.topics().iter().map(Topic::label).collect::<Vec<_>>().join(", "),
            config.date_range,
            item.articles().len()
        ),
        None => format!(
            "{}  {}  link: {}",
            item.id(),
            when,
            item.articles().first().map(|a| a.url.as_str()).unwrap_or("-")
        ),
    }
}

fn not_found(what: String) -> Error {
    Error::Storage(format!("{} not found", what))
}

async fn find_article(library: &Library, url: &str) -> Result<Article> {
    library
        .find_article(url)
        .await
        .ok_or_else(|| not_found(format!("article {}", url)))
}

async fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(ddd_storage::default_data_dir);

    if let Commands::Auth { command } = &cli.command {
        return match command {
            AuthCommands::Set { key } => {
                credentials::save_api_key(&data_dir, key).await?;
                info!("🔑 API key stored in {}", data_dir.display());
                Ok(())
            }
            AuthCommands::Reset => {
                credentials::clear_api_key(&data_dir).await?;
                info!("🔑 Stored API key removed");
                Ok(())
            }
        };
    }

    let store = ddd_storage::create_storage(cli.storage, Some(&data_dir)).await?;
    let library = Library::new(store);

    let config = resolve_config(&cli, &data_dir).await?;
    let pipeline = Pipeline::new(ddd_inference::create_model(&config)?);
    info!("🧠 Content generator initialized (using {})", pipeline.generator_name());

    match cli.command {
        Commands::Digest {
            level,
            topics,
            date_range,
            no_preferences,
            json,
        } => {
            let digest_config = DigestConfig::new(level, topics, date_range);
            let prefs = if no_preferences { None } else { Some(library.preferences().await) };

            let articles = pipeline.generate_digest(&digest_config, prefs.as_ref()).await?;
            let item = library.record_digest(&digest_config, &articles).await?;
            info!("📰 Digest {} ready", item.id());
            print_item(&item, json)?;
        }
        Commands::Analyze { url, json } => {
            let article = pipeline.analyze_url(&url).await?;
            let item = library.record_analysis(&article).await?;
            print_item(&item, json)?;
        }
        Commands::History { limit } => {
            for item in library.history().await.iter().take(limit) {
                println!("{}", describe(item));
            }
        }
        Commands::Show { id, json } => {
            let item = library
                .find_history(&id)
                .await
                .ok_or_else(|| not_found(format!("history item {}", id)))?;
            print_item(&item, json)?;
        }
        Commands::Saved => {
            for article in library.saved().await {
                print_article(&article);
            }
        }
        Commands::Save { url } => {
            let article = find_article(&library, &url).await?;
            if library.toggle_save(&article).await? {
                info!("📌 Saved {}", article.title);
            } else {
                info!("📌 Removed {} from saved", article.title);
            }
        }
        Commands::Rate { url, rating } => {
            let article = find_article(&library, &url).await?;
            library.rate(&article, rating).await?;
            match rating {
                Some(Rating::Up) => info!("👍 Liked {}", article.title),
                Some(Rating::Down) => info!("👎 Disliked {}", article.title),
                None => info!("Cleared rating for {}", article.title),
            }
        }
        Commands::Serve { addr } => {
            ddd_web::serve(ddd_web::AppState::new(pipeline, library), addr).await?;
        }
        Commands::Auth { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = &result {
        if e.is_authorization() {
            eprintln!("The Gemini API key was missing or rejected. Set one with `ddd auth set <KEY>` or GEMINI_API_KEY.");
        }
    }
    result
}
