//! CLI commands for the multisig wallet
//!
//! Implements all command handlers for the CLI interface.

use crate::crypto::{Address, KeyPair};
use crate::multisig::{LoggingExecutor, MultisigWallet, Transaction, WalletConfig};
use crate::storage::{StorageConfig, WalletStore};
use std::path::Path;
use std::sync::Arc;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub wallet: MultisigWallet,
    pub store: WalletStore,
}

fn open_store(data_dir: &Path) -> CliResult<WalletStore> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    Ok(WalletStore::new(storage_config)?)
}

impl AppState {
    /// Load the wallet stored in `data_dir`
    pub fn load(data_dir: &Path) -> CliResult<Self> {
        let store = open_store(data_dir)?;

        if !store.exists() {
            return Err(format!(
                "No wallet found in {:?}. Create one with: multisig init",
                data_dir
            )
            .into());
        }

        let wallet = store.load_wallet(Arc::new(LoggingExecutor))?;
        Ok(Self { wallet, store })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.store.save(&self.wallet.snapshot())?;
        Ok(())
    }
}

/// Decode a hex argument, with or without `0x`
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    Ok(hex::decode(trimmed)?)
}

fn print_transaction(wallet: &MultisigWallet, tx: &Transaction) -> CliResult<()> {
    let confirmed = wallet.confirmations(tx.id)?;

    println!("📄 Transaction {}", tx.id);
    println!("   ├─ Destination: {}", tx.destination);
    println!("   ├─ Value: {}", tx.value);
    println!("   ├─ Payload: 0x{}", hex::encode(&tx.payload));
    println!("   ├─ Proposer: {}", tx.proposer);
    println!("   ├─ Submitted: {}", tx.submitted_at);
    println!("   ├─ Digest: {}", tx.digest());
    println!(
        "   ├─ Confirmations: {}/{}",
        confirmed.len(),
        wallet.required_confirmations()
    );
    for owner in &confirmed {
        println!("   │  └─ {}", owner);
    }
    match tx.executed_at {
        Some(at) => println!("   └─ Executed: {}", at),
        None => println!("   └─ Executed: no"),
    }
    Ok(())
}

/// Generate a new owner key pair
pub fn cmd_keygen() -> CliResult<()> {
    let kp = KeyPair::generate();

    println!("🔐 New key pair generated!");
    println!("   📍 Address: {}", kp.address());
    println!("   🔑 Public Key: {}", kp.public_key_hex());
    println!("   🗝️  Private Key: {}", kp.private_key_hex());
    println!("\n   ⚠️  IMPORTANT: The private key is not stored anywhere. Keep it safe!");

    Ok(())
}

/// Initialize a new wallet
pub fn cmd_init(data_dir: &Path, config: WalletConfig) -> CliResult<()> {
    let store = open_store(data_dir)?;

    if store.exists() {
        println!("⚠️  Wallet already exists at {:?}", data_dir);
        return Ok(());
    }

    let wallet = MultisigWallet::new(config, Arc::new(LoggingExecutor))?;
    store.save(&wallet.snapshot())?;

    println!("✅ Wallet initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🔧 Policy: {}", wallet.description());
    for owner in wallet.owners() {
        println!("   👤 {}", owner);
    }

    Ok(())
}

/// Display wallet info
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let wallet = &state.wallet;

    println!("🏦 Wallet Info");
    if let Some(label) = &wallet.config().label {
        println!("   ├─ Label: {}", label);
    }
    println!("   ├─ Policy: {}", wallet.description());
    println!("   ├─ Transactions: {}", wallet.transaction_count());
    println!("   ├─ Pending: {}", wallet.filtered_count(true, false));
    println!("   ├─ Executed: {}", wallet.filtered_count(false, true));
    println!("   └─ Owners:");
    for owner in wallet.owners() {
        println!("      └─ {}", owner);
    }

    Ok(())
}

/// Propose a new transaction
pub fn cmd_submit(
    state: &mut AppState,
    caller: &Address,
    destination: Address,
    value: u128,
    payload: Vec<u8>,
) -> CliResult<()> {
    let id = state
        .wallet
        .submit_transaction(caller, destination, value, payload)?;
    state.save()?;

    println!("📤 Transaction {} submitted", id);
    println!("   Digest to sign: {}", state.wallet.message_hash(id)?);

    Ok(())
}

/// Confirm a transaction as an owner
pub fn cmd_confirm(state: &mut AppState, caller: &Address, id: u64) -> CliResult<()> {
    state.wallet.confirm_transaction(caller, id)?;
    state.save()?;

    println!(
        "✅ Transaction {} confirmed by {} ({}/{})",
        id,
        caller,
        state.wallet.confirmation_count(id)?,
        state.wallet.required_confirmations()
    );
    Ok(())
}

/// Revoke a confirmation
pub fn cmd_revoke(state: &mut AppState, caller: &Address, id: u64) -> CliResult<()> {
    state.wallet.revoke_confirmation(caller, id)?;
    state.save()?;

    println!("↩️  Confirmation on transaction {} revoked by {}", id, caller);
    Ok(())
}

/// Sign a transaction digest with a private key
pub fn cmd_sign(state: &AppState, private_key: &str, id: u64) -> CliResult<()> {
    let kp = KeyPair::from_private_key_hex(private_key)?;
    let digest = state.wallet.message_hash(id)?;
    let signature = kp.sign_digest(digest.as_bytes())?;

    println!("✍️  Signature by {} over transaction {}", kp.address(), id);
    println!("0x{}", hex::encode(signature));
    Ok(())
}

/// Confirm with a single relayed signature
pub fn cmd_confirm_signature(state: &mut AppState, id: u64, signature: &str) -> CliResult<()> {
    let signature = parse_hex(signature)?;
    let signer = state.wallet.confirm_transaction_by_signature(id, &signature)?;
    state.save()?;

    println!("✅ Transaction {} confirmed by signature from {}", id, signer);
    Ok(())
}

/// Confirm with a packed batch of signatures
pub fn cmd_confirm_packed(state: &mut AppState, id: u64, signatures: &str) -> CliResult<()> {
    let packed = parse_hex(signatures)?;
    let accepted = state
        .wallet
        .confirm_transaction_by_packed_signatures(id, &packed)?;
    state.save()?;

    println!(
        "✅ {} owner signature(s) applied to transaction {}",
        accepted.len(),
        id
    );
    for owner in &accepted {
        println!("   └─ {}", owner);
    }
    Ok(())
}

/// Execute an approved transaction
pub fn cmd_execute(state: &mut AppState, caller: &Address, id: u64) -> CliResult<()> {
    let outcome = state.wallet.execute_transaction(caller, id)?;
    state.save()?;

    if outcome.is_success() {
        println!("🚀 Transaction {} executed", id);
    } else {
        println!("⚠️  Transaction {} dispatched but reported: {:?}", id, outcome);
    }
    Ok(())
}

/// Show a single transaction
pub fn cmd_show(state: &AppState, id: u64) -> CliResult<()> {
    let tx = state.wallet.transaction(id)?;
    print_transaction(&state.wallet, &tx)
}

/// List transactions
pub fn cmd_list(state: &AppState, pending: bool, executed: bool) -> CliResult<()> {
    // No filter flags means everything
    let (pending, executed) = if !pending && !executed {
        (true, true)
    } else {
        (pending, executed)
    };

    let ids = state
        .wallet
        .transaction_ids(0, state.wallet.transaction_count(), pending, executed);

    if ids.is_empty() {
        println!("📭 No transactions found.");
        return Ok(());
    }

    println!("📋 Transactions ({}):", ids.len());
    for id in ids {
        let tx = state.wallet.transaction(id)?;
        let status = if tx.executed { "executed" } else { "pending" };
        println!(
            "   #{} → {} value {} [{}] {}/{}",
            tx.id,
            tx.destination,
            tx.value,
            status,
            state.wallet.confirmation_count(id)?,
            state.wallet.required_confirmations()
        );
    }
    Ok(())
}
