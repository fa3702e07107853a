use clap::{Parser, Subcommand};
mod commands;

use commands::share::ShareCommand;

#[derive(Parser)]
#[command(name = "owncloud-share")]
#[command(
    about = "OwnCloud files and public link shares",
    long_about = r#"
        owncloud-share talks to an OwnCloud server over WebDAV and the OCS share API.
        It supports:
        • Creating, listing, updating and deleting public link shares
        • Getting a public URL for a file (creates a new share each time)
        • Renaming files on the server
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the configuration file interactively
    Config,
    /// Manage public link shares
    Share {
        #[command(subcommand)]
        command: ShareCommand,
    },
    /// Print a public URL for a path (creates a new share)
    Url { path: String },
    /// Move a file or folder
    Rename { from: String, to: String },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config => commands::config::run().await,
        Commands::Share { command } => commands::share::run(command).await,
        Commands::Url { path } => commands::url::run(&path).await,
        Commands::Rename { from, to } => commands::rename::run(&from, &to).await,
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
