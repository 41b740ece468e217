//! Command-line client for a set server node.

use anyhow::Context;
use clap::{Parser, Subcommand};
use crdt_server::set::client::SetClient;

#[derive(Parser)]
#[command(name = "setctl", version, about = "Talk to a set server node")]
struct Cli {
    /// Node address, e.g. http://127.0.0.1:8080
    #[arg(short, long, env = "SETSERVER_ADDR", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an item
    Add { item: String },
    /// Remove an item
    Remove { item: String },
    /// Check whether an item is in the set
    Contains { item: String },
    /// List the peers known to the node
    Peers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let client = SetClient::new(&cli.server);

    let unreachable = || format!("cannot reach {}", client.base_url());

    let response = match &cli.command {
        Command::Add { item } => client.add(item).await.with_context(unreachable)?,
        Command::Remove { item } => client.remove(item).await.with_context(unreachable)?,
        Command::Contains { item } => client.contains(item).await.with_context(unreachable)?,
        Command::Peers => {
            let peers = client.peers().await.with_context(unreachable)?;
            if peers.is_empty() {
                println!("no peers");
            }
            for peer in peers {
                println!("{}", peer);
            }
            return Ok(());
        }
    };

    if response.is_success() {
        println!("ok (present: {})", response.present);
        Ok(())
    } else {
        eprintln!("error: {}", response.error);
        std::process::exit(1);
    }
}
