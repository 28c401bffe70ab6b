//! Multisig Wallet CLI Application
//!
//! A command-line interface for proposing, confirming and executing
//! M-of-N wallet transactions.

use clap::{Parser, Subcommand};
use multisig_wallet::cli::{self, AppState};
use multisig_wallet::crypto::Address;
use multisig_wallet::multisig::WalletConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "An M-of-N multi-signature wallet", long_about = None)]
struct Cli {
    /// Data directory for wallet storage
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new owner key pair
    Keygen,

    /// Initialize a new wallet
    Init {
        /// Owner address (repeat for each owner)
        #[arg(short, long = "owner", required = true)]
        owners: Vec<Address>,

        /// Confirmations required to execute
        #[arg(short, long)]
        required: usize,

        /// Optional wallet label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Display wallet information
    Info,

    /// Propose a new transaction
    Submit {
        /// Submitting owner
        #[arg(short, long)]
        caller: Address,

        /// Target of the action
        #[arg(short, long)]
        destination: Address,

        /// Value forwarded with the action
        #[arg(short, long, default_value = "0")]
        value: u128,

        /// Call data as hex
        #[arg(short, long, default_value = "")]
        payload: String,
    },

    /// Confirm a transaction
    Confirm {
        #[arg(short, long)]
        caller: Address,

        #[arg(short, long)]
        id: u64,
    },

    /// Revoke a confirmation
    Revoke {
        #[arg(short, long)]
        caller: Address,

        #[arg(short, long)]
        id: u64,
    },

    /// Sign a transaction digest with a private key
    Sign {
        /// Hex-encoded private key
        #[arg(short, long)]
        key: String,

        #[arg(short, long)]
        id: u64,
    },

    /// Confirm using a relayed owner signature
    ConfirmSig {
        #[arg(short, long)]
        id: u64,

        /// 65-byte signature as hex
        #[arg(short, long)]
        signature: String,
    },

    /// Confirm using concatenated owner signatures
    ConfirmPacked {
        #[arg(short, long)]
        id: u64,

        /// Concatenated 65-byte signatures as hex
        #[arg(short, long)]
        signatures: String,
    },

    /// Execute an approved transaction
    Execute {
        #[arg(short, long)]
        caller: Address,

        #[arg(short, long)]
        id: u64,
    },

    /// Show a transaction
    Show {
        #[arg(short, long)]
        id: u64,
    },

    /// List transactions
    List {
        /// Only pending transactions
        #[arg(long)]
        pending: bool,

        /// Only executed transactions
        #[arg(long)]
        executed: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle commands that don't need a loaded wallet
    if let Commands::Keygen = cli.command {
        return cli::cmd_keygen();
    }
    if let Commands::Init {
        owners,
        required,
        label,
    } = &cli.command
    {
        let config = WalletConfig::new(owners.clone(), *required, label.clone());
        return cli::cmd_init(&cli.data_dir, config);
    }

    let mut state = AppState::load(&cli.data_dir)?;

    match cli.command {
        Commands::Keygen | Commands::Init { .. } => unreachable!(),

        Commands::Info => cli::cmd_info(&state)?,

        Commands::Submit {
            caller,
            destination,
            value,
            payload,
        } => {
            let payload = cli::parse_hex(&payload)?;
            cli::cmd_submit(&mut state, &caller, destination, value, payload)?;
        }

        Commands::Confirm { caller, id } => cli::cmd_confirm(&mut state, &caller, id)?,

        Commands::Revoke { caller, id } => cli::cmd_revoke(&mut state, &caller, id)?,

        Commands::Sign { key, id } => cli::cmd_sign(&state, &key, id)?,

        Commands::ConfirmSig { id, signature } => {
            cli::cmd_confirm_signature(&mut state, id, &signature)?
        }

        Commands::ConfirmPacked { id, signatures } => {
            cli::cmd_confirm_packed(&mut state, id, &signatures)?
        }

        Commands::Execute { caller, id } => cli::cmd_execute(&mut state, &caller, id)?,

        Commands::Show { id } => cli::cmd_show(&state, id)?,

        Commands::List { pending, executed } => cli::cmd_list(&state, pending, executed)?,
    }

    Ok(())
}
