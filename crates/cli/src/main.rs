use clap::{Args, Parser, Subcommand};
use std::path::Path;

use bookmeta_core::book::{BookInfo, GOOGLE_BOOKS_PROVIDER_ID};
use bookmeta_core::config::{config_path, load_config, save_config_to, set_key, AppConfig};
use bookmeta_core::lookup::{GoogleBooksProvider, MetadataProvider};
use bookmeta_core::matcher::target_comparable_name;
use bookmeta_core::parse::parse_name;
use bookmeta_core::query::search_query;
use bookmeta_core::CancellationToken;

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "bookmeta")]
#[command(about = "Look up book metadata from Google Books")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args)]
struct BookArgs {
    /// Book file path or raw title
    #[arg(required = true)]
    input: String,

    /// Series name (e.g. from the parent folder)
    #[arg(long)]
    series: Option<String>,

    /// Index within the series
    #[arg(long)]
    index: Option<u32>,

    /// Publication year
    #[arg(long)]
    year: Option<i32>,

    /// Known Google Books volume id
    #[arg(long)]
    id: Option<String>,
}

impl BookArgs {
    fn to_book_info(&self) -> BookInfo {
        let mut info = if Path::new(&self.input).is_file() {
            BookInfo::from_path(&self.input)
        } else {
            BookInfo::new(self.input.clone())
        };
        info.series_name = self.series.clone();
        info.index_number = self.index;
        info.year = self.year;
        if let Some(id) = &self.id {
            info = info.with_provider_id(GOOGLE_BOOKS_PROVIDER_ID, id.clone());
        }
        info
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file name offline and show the resulting search query
    Parse {
        #[command(flatten)]
        book: BookArgs,
    },

    /// List Google Books candidates for a book
    Search {
        #[command(flatten)]
        book: BookArgs,
    },

    /// Resolve the Google Books volume id for a book
    Identify {
        #[command(flatten)]
        book: BookArgs,
    },

    /// Fetch full metadata for a book
    Fetch {
        #[command(flatten)]
        book: BookArgs,
    },

    /// List remote images for a volume id
    Images {
        /// Google Books volume id
        #[arg(long, required = true)]
        id: String,
    },

    /// Download an image URL as-is
    Image {
        /// Image URL
        #[arg(required = true)]
        url: String,

        /// Output file
        #[arg(short, long, required = true)]
        output: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling lookup");
            on_interrupt.cancel();
        }
    });

    let result = match &cli.command {
        Commands::Parse { book } => run_parse(book, cli.json),
        Commands::Search { book } => run_search(book, &cancel, cli.json).await,
        Commands::Identify { book } => run_identify(book, &cancel, cli.json).await,
        Commands::Fetch { book } => run_fetch(book, &cancel, cli.json).await,
        Commands::Images { id } => run_images(id, &cancel, cli.json).await,
        Commands::Image { url, output } => run_image(url, output, &cancel, cli.json).await,
        Commands::Config { action } => run_config(action, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn provider() -> Result<GoogleBooksProvider, Box<dyn std::error::Error + Send + Sync>> {
    let cfg = load_config();
    Ok(GoogleBooksProvider::from_config(&cfg.google_books)?)
}

fn run_parse(book: &BookArgs, json: bool) -> CliResult {
    let mut info = book.to_book_info();
    let parsed = parse_name(&info.name);
    info.apply_parsed(parsed.clone());
    let query = search_query(&info);
    let comparable = target_comparable_name(&info);

    if json {
        let out = serde_json::json!({
            "parsed": parsed,
            "book": info,
            "query": query,
            "comparable_name": comparable,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Name: {}", info.name);
        if let Some(s) = &info.series_name {
            println!("Series: {}", s);
        }
        if let Some(i) = info.index_number {
            println!("Index: {}", i);
        }
        if let Some(y) = info.year {
            println!("Year: {}", y);
        }
        println!("Query: {}", query.as_deref().unwrap_or("(none)"));
        println!("Comparable name: {}", comparable);
    }
    Ok(())
}

async fn run_search(book: &BookArgs, cancel: &CancellationToken, json: bool) -> CliResult {
    let results = provider()?.search(&book.to_book_info(), cancel).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results found");
    } else {
        for (i, r) in results.iter().enumerate() {
            let year = r.production_year.map(|y| format!(" ({})", y)).unwrap_or_default();
            let id = r.provider_ids.get(GOOGLE_BOOKS_PROVIDER_ID).map(String::as_str).unwrap_or("?");
            println!("Result {}: {}{} [{}]", i + 1, r.name, year, id);
        }
    }
    Ok(())
}

async fn run_identify(book: &BookArgs, cancel: &CancellationToken, json: bool) -> CliResult {
    let id = provider()?.resolve_id(&book.to_book_info(), cancel).await?;
    if json {
        println!("{}", serde_json::json!({ "id": id }));
    } else {
        match id {
            Some(id) => println!("{}", id),
            None => println!("No match found"),
        }
    }
    Ok(())
}

async fn run_fetch(book: &BookArgs, cancel: &CancellationToken, json: bool) -> CliResult {
    let result = provider()?.get_metadata(&book.to_book_info(), cancel).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    let Some(item) = result.item.as_ref().filter(|_| result.has_metadata) else {
        println!("No metadata found");
        return Ok(());
    };
    println!("Title: {}", item.name.as_deref().unwrap_or("?"));
    if let Some(y) = item.production_year {
        println!("Year: {}", y);
    }
    if !result.people.is_empty() {
        let authors: Vec<&str> = result.people.iter().map(|p| p.name.as_str()).collect();
        println!("Authors: {}", authors.join(", "));
    }
    if let Some(s) = item.studios.first() {
        println!("Publisher: {}", s);
    }
    if let Some(g) = item.genres.first() {
        println!("Genre: {}", g);
    }
    if !item.tags.is_empty() {
        println!("Tags: {}", item.tags.join(", "));
    }
    if let Some(r) = item.community_rating {
        println!("Rating: {:.1}/10", r);
    }
    if let Some(lang) = &result.result_language {
        println!("Language: {}", lang);
    }
    if let Some(id) = item.provider_id(GOOGLE_BOOKS_PROVIDER_ID) {
        println!("Google Books id: {}", id);
    }
    if let Some(o) = &item.overview {
        println!("\n{}", o);
    }
    Ok(())
}

async fn run_images(id: &str, cancel: &CancellationToken, json: bool) -> CliResult {
    let info = BookInfo::default().with_provider_id(GOOGLE_BOOKS_PROVIDER_ID, id);
    let images = provider()?.get_images(&info, cancel).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
    } else if images.is_empty() {
        println!("No images found");
    } else {
        for image in &images {
            println!("{}", image.url);
        }
    }
    Ok(())
}

async fn run_image(url: &str, output: &str, cancel: &CancellationToken, json: bool) -> CliResult {
    let response = provider()?.get_image_response(url, cancel).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("Image request failed: HTTP {}", status).into());
    }
    let data = response.bytes().await?;
    std::fs::write(output, &data)?;
    if json {
        println!("{}", serde_json::json!({ "output": output, "bytes": data.len() }));
    } else {
        println!("Wrote {} bytes to {}", data.len(), output);
    }
    Ok(())
}

fn run_config(action: &ConfigAction, json: bool) -> CliResult {
    match action {
        ConfigAction::Init => {
            let path = config_path().ok_or("Could not determine config directory")?;
            save_config_to(&AppConfig::default(), &path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let cfg = load_config();
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let path = config_path().ok_or("Could not determine config directory")?;
            let mut cfg = if path.exists() {
                let s = std::fs::read_to_string(&path)?;
                toml::from_str(&s).unwrap_or_else(|_| AppConfig::default())
            } else {
                AppConfig::default()
            };

            set_key(&mut cfg, key, value)?;
            save_config_to(&cfg, &path)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}
