use std::path::PathBuf;

use clap::{Parser, Subcommand};

use textboard::board::normalize_text;
use textboard::config::load_or_default;
use textboard::lifecycle::preflight;
use textboard::store::{Post, PostStore};

#[derive(Parser)]
#[command(name = "board-cli")]
#[command(about = "Maintenance CLI for the text board's post file", long_about = None)]
struct Cli {
    /// Path to the board's TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stored posts, newest first
    List {
        /// Print the raw JSON array instead of text
        #[arg(long)]
        json: bool,
    },
    /// Append a post directly, bypassing CSRF and rate limits
    Post {
        text: String,
    },
    /// Remove every stored post
    Clear,
    /// Validate configuration and storage preconditions
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::List { json } => {
            let store = preflight(&config)?;
            let posts = store.read_all();
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else if posts.is_empty() {
                println!("(no posts)");
            } else {
                for (i, post) in posts.iter().enumerate() {
                    println!("#{} {}", i, post.text);
                }
            }
        }
        Commands::Post { text } => {
            let text = match normalize_text(&text, config.board.max_message_length) {
                Ok(text) => text,
                Err(rejection) => {
                    eprintln!("Error: post rejected ({})", rejection.label());
                    std::process::exit(2);
                }
            };
            let store = preflight(&config)?;
            let stored = store.append(Post::new(text))?;
            println!("Stored; {} post(s) on the board", stored);
        }
        Commands::Clear => {
            let store = preflight(&config)?;
            store.clear()?;
            println!("Cleared {}", store.path().display());
        }
        Commands::Check => {
            let store = preflight(&config)?;
            println!(
                "OK: {} ({} of {} posts)",
                store.path().display(),
                store.read_all().len(),
                store.max_posts()
            );
        }
    }

    Ok(())
}
