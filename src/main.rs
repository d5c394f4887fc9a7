use std::path::PathBuf;

use blog::config::Config;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blog", version, about = "Server-rendered blog")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Create a user account
    CreateUser {
        username: String,
        /// Allow the user to author posts
        #[arg(long)]
        staff: bool,
    },
    /// Import users, posts, tags, likes and comments from a JSON fixture
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "blog=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let pool = blog::db::init_pool(&config.database_url).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = blog::build_app(pool, &config);
            let addr = config.addr();
            let listener = TcpListener::bind(addr).await?;

            tracing::info!("listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Command::CreateUser { username, staff } => {
            blog::cli::create_user(&pool, &username, staff).await?;
        }
        Command::Import { path } => {
            let summary = blog::cli::import_fixture(&pool, &path).await?;
            println!(
                "Imported {} users, {} posts, {} comments",
                summary.users, summary.posts, summary.comments
            );
        }
    }

    Ok(())
}
