//! arbor-cli — Command-line front end for the arbor wallet engine.
//!
//! Exposes the three wallet operations: create a mnemonic, validate an
//! existing one, and derive the standard address/key pair for a network.
//! Mnemonics are read from a hidden prompt unless passed explicitly;
//! private keys are only printed when asked for.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use arbor_core::address::{Coin, Network};
use arbor_core::entropy::Strength;
use arbor_wallet::{create_wallet, derive_address_and_key, import_wallet};

/// HD wallet engine for Bitcoin.
#[derive(Parser)]
#[command(name = "arbor-cli")]
#[command(version, about = "One seed, a tree of keys.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new wallet and print its mnemonic phrase.
    Create(CreateArgs),
    /// Validate a mnemonic phrase.
    Import(ImportArgs),
    /// Derive the standard first address (and optionally the key).
    Address(AddressArgs),
}

#[derive(Args)]
struct CreateArgs {
    /// Entropy strength in bits (128, 160, 192, 224, or 256).
    #[arg(short, long, default_value_t = 128)]
    strength: u32,
}

#[derive(Args)]
struct ImportArgs {
    /// Mnemonic phrase. If not provided, will prompt without echo.
    #[arg(short, long)]
    mnemonic: Option<String>,
}

#[derive(Args)]
struct AddressArgs {
    /// Mnemonic phrase. If not provided, will prompt without echo.
    #[arg(short, long)]
    mnemonic: Option<String>,

    /// Coin to derive for.
    #[arg(short, long, default_value = "bitcoin")]
    coin: String,

    /// Network (mainnet or testnet).
    #[arg(short, long, default_value = "mainnet")]
    network: String,

    /// Optional BIP-39 passphrase.
    #[arg(short, long, default_value = "")]
    passphrase: String,

    /// Also print the raw private key hex.
    #[arg(long)]
    show_key: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Create(args) => create(args),
        Commands::Import(args) => import(args),
        Commands::Address(args) => address(args),
    }
}

fn create(args: CreateArgs) -> Result<()> {
    let strength = Strength::from_bits(args.strength)?;
    let mnemonic = create_wallet(strength)?;
    println!("{mnemonic}");
    eprintln!("Write these {} words down; they are the only backup.", mnemonic.word_count());
    Ok(())
}

fn import(args: ImportArgs) -> Result<()> {
    let phrase = read_phrase(args.mnemonic)?;
    import_wallet(&phrase)?;
    println!("mnemonic OK");
    Ok(())
}

fn address(args: AddressArgs) -> Result<()> {
    let coin: Coin = args.coin.parse()?;
    let network: Network = args.network.parse()?;
    let phrase = read_phrase(args.mnemonic)?;

    let result = derive_address_and_key(&phrase, &args.passphrase, coin, network)?;
    println!("{}", result.address);
    if args.show_key {
        println!("{}", result.private_key_hex);
    }
    Ok(())
}

fn read_phrase(arg: Option<String>) -> Result<String> {
    match arg {
        Some(phrase) => Ok(phrase),
        None => rpassword::prompt_password("Mnemonic phrase: ")
            .context("failed to read mnemonic from terminal"),
    }
}
