use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use xt_client::{BackendClient, FeedState, Pagination, SummaryPanel, SummaryState, DEFAULT_BACKEND_URL};
use xt_core::{Article, BookmarkRecord, SummaryRequest};
use xt_storage::{BookmarkStore, FileStorage};
use xt_web::ServerConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "X-Times news backend and client", long_about = None)]
pub struct Cli {
    /// Backend used by the client commands
    #[arg(long, env = "XTIMES_BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    backend_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP backend
    Serve {
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
        #[arg(long, default_value = "gemini", help = "Summary model. Available models: gemini (default), dummy")]
        model: String,
    },
    /// Page through headlines for a category
    News {
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long, default_value = "us")]
        country: String,
        #[arg(long, default_value_t = 12)]
        page_size: u32,
        /// How many pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Summarize an article into bullet points
    Summarize {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Manage locally saved articles
    Bookmarks {
        #[arg(long, env = "XTIMES_BOOKMARKS", default_value = "x-times-bookmarks.json")]
        file: PathBuf,
        #[command(subcommand)]
        command: BookmarkCommands,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkCommands {
    List,
    Add {
        url: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    Remove {
        url: String,
    },
    Clear,
}

fn print_article(index: usize, article: &Article) {
    let date = article
        .published_date
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string());
    println!("{:>3}. {} ({}, {})", index + 1, article.title, article.source_name, date);
    println!("     {}", article.url);
}

async fn news(
    client: BackendClient,
    category: String,
    country: String,
    page_size: u32,
    pages: u32,
) -> anyhow::Result<()> {
    let mut pagination = Pagination::new(client, country, page_size);
    if let FeedState::Failed { message, unreachable } = pagination.select_category(category).await {
        if *unreachable {
            anyhow::bail!("Cannot reach backend: {}", message);
        }
        anyhow::bail!("Failed to load news: {}", message);
    }

    for _ in 1..pages {
        if !pagination.load_more().await {
            break;
        }
    }

    for (i, article) in pagination.articles().iter().enumerate() {
        print_article(i, article);
    }
    if pagination.has_more() {
        println!("Showing {} of {} articles", pagination.articles().len(), pagination.total_results());
    } else if !pagination.articles().is_empty() {
        println!("You've seen all {} articles", pagination.articles().len());
    } else {
        println!("No articles found for {}", pagination.category());
    }
    Ok(())
}

async fn bookmarks(file: PathBuf, command: BookmarkCommands) -> anyhow::Result<()> {
    let store = BookmarkStore::new(Arc::new(FileStorage::new(file)));
    match command {
        BookmarkCommands::List => {
            let saved = store.list().await?;
            if saved.is_empty() {
                println!("No bookmarks yet");
            }
            for (i, bookmark) in saved.iter().enumerate() {
                println!(
                    "{:>3}. {} ({})",
                    i + 1,
                    bookmark.title,
                    bookmark.source.as_deref().unwrap_or("Unknown")
                );
                println!("     {}", bookmark.url);
            }
        }
        BookmarkCommands::Add { url, title, description, source, author } => {
            let record = BookmarkRecord {
                title,
                description,
                image_url: None,
                url,
                author,
                date: Some(chrono::Utc::now()),
                source,
            };
            let url = record.url.clone();
            if store.add(record).await? {
                println!("Saved {}", url);
            } else {
                println!("Already saved {}", url);
            }
        }
        BookmarkCommands::Remove { url } => {
            if store.remove(&url).await? {
                println!("Removed {}", url);
            } else {
                println!("Not bookmarked: {}", url);
            }
        }
        BookmarkCommands::Clear => {
            store.clear().await?;
            println!("Cleared all bookmarks");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    xt_web::logging::init_logging("info");
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, model } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            let state = xt_web::state_from_config(&config, &model)?;
            info!("🧠 Summary model initialized (using {})", state.summary_model.name());
            xt_web::serve(config, state).await?;
        }
        Commands::News { category, country, page_size, pages } => {
            let client = BackendClient::new(&cli.backend_url)?;
            news(client, category, country, page_size, pages).await?;
        }
        Commands::Summarize { title, description } => {
            let client = BackendClient::new(&cli.backend_url)?;
            let mut panel = SummaryPanel::for_request(client, SummaryRequest::new(title, description));
            match panel.generate().await {
                SummaryState::Ready(bullets) => {
                    for bullet in bullets {
                        println!("• {}", bullet);
                    }
                }
                SummaryState::Failed { message, .. } => anyhow::bail!("{}", message),
                SummaryState::Loading => {}
            }
        }
        Commands::Bookmarks { file, command } => {
            bookmarks(file.clone(), command)
                .await
                .with_context(|| format!("bookmark file {}", file.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["xtimes", "news", "--category", "anime", "--pages", "3"]).unwrap();
        match cli.command {
            Commands::News { category, pages, page_size, .. } => {
                assert_eq!(category, "anime");
                assert_eq!(pages, 3);
                assert_eq!(page_size, 12);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["xtimes", "bookmarks", "--file", "b.json", "remove", "https://a.test"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Bookmarks { command: BookmarkCommands::Remove { .. }, .. }
        ));
    }

    #[tokio::test]
    async fn test_bookmark_commands() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");

        let add = |url: &str| BookmarkCommands::Add {
            url: url.to_string(),
            title: "Story".to_string(),
            description: String::new(),
            source: Some("Wire".to_string()),
            author: None,
        };
        bookmarks(file.clone(), add("https://a.test")).await.unwrap();
        bookmarks(file.clone(), add("https://a.test")).await.unwrap();

        let store = BookmarkStore::new(Arc::new(FileStorage::new(&file)));
        assert_eq!(store.len().await.unwrap(), 1);

        bookmarks(file.clone(), BookmarkCommands::Clear).await.unwrap();
        assert!(store.is_empty().await.unwrap());
    }
}
