//! Smart Laundry CLI - Session tokens, catalog inspection and secrets.
//!
//! # Usage
//!
//! ```bash
//! # Mint a session token for a user (reads LAUNDRY_JWT_SECRET)
//! sl-cli token mint --identifier admin@laundry.com
//!
//! # Decode and verify a session token
//! sl-cli token inspect eyJhbGciOi...
//!
//! # Print the catalog with prices
//! sl-cli catalog
//!
//! # Generate a value for LAUNDRY_JWT_SECRET
//! sl-cli secret
//! ```
//!
//! # Commands
//!
//! - `token mint` - Sign a session token
//! - `token inspect` - Verify a session token and print its claims
//! - `catalog` - List services, options and prices
//! - `secret` - Generate a random signing secret

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(author, version, about = "Smart Laundry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint or inspect session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Print the catalog with prices
    Catalog,
    /// Generate a random signing secret
    Secret {
        /// Secret length in characters
        #[arg(short, long, default_value_t = commands::secret::DEFAULT_LENGTH)]
        length: usize,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a session token for a user
    Mint {
        /// Email address or phone number of the user
        #[arg(short, long)]
        identifier: String,
    },
    /// Verify a session token and print its claims
    Inspect {
        /// The token, without the `Bearer ` prefix
        token: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Mint { identifier } => {
                println!("{}", commands::token::mint(&identifier)?);
            }
            TokenAction::Inspect { token } => {
                println!("{}", commands::token::inspect(&token)?);
            }
        },
        Commands::Catalog => print!("{}", commands::catalog::render_builtin()),
        Commands::Secret { length } => println!("{}", commands::secret::generate(length)?),
    }
    Ok(())
}
