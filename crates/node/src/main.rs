//! Header inspection tool.
//!
//! # Usage
//!
//! ```bash
//! # Hash a wire-encoded header
//! bftcore-node hash f9023d...
//!
//! # Print the decoded fields
//! bftcore-node decode f9023d...
//!
//! # Build a sample BFT header with a 4-member committee
//! bftcore-node sample --bft --members 4 --round 2
//! ```

use anyhow::{Context, Result};
use bftcore_codec::{decode_header, encode_header};
use bftcore_crypto::header_hash;
use bftcore_types::{CommitteeMember, Header, BFT_DIGEST};
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bftcore-node")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level filter (overrides RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a hex wire header and print its mode and hash
    Hash {
        /// Wire-encoded header, hex (0x prefix optional)
        input: String,
    },
    /// Decode a hex wire header and print its fields
    Decode {
        /// Wire-encoded header, hex (0x prefix optional)
        input: String,
    },
    /// Build a sample header and print its wire encoding and hash
    Sample {
        /// Mark the header with the BFT mix digest
        #[arg(long)]
        bft: bool,

        /// Committee size (BFT only)
        #[arg(long, default_value_t = 0)]
        members: u8,

        /// Consensus round (BFT only, not hashed)
        #[arg(long, default_value_t = 0)]
        round: u64,

        /// Block number
        #[arg(long, default_value_t = 1)]
        number: u64,
    },
}

fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).context("invalid hex input")
}

fn sample_header(bft: bool, members: u8, round: u64, number: u64) -> Header {
    let mut h = Header {
        number: BigUint::from(number),
        difficulty: BigUint::from(1u8),
        gas_limit: 30_000_000,
        time: 1_700_000_000 + number,
        base_fee: Some(BigUint::from(1_000_000_000u64)),
        ..Header::default()
    };
    if !bft {
        h.extra = b"bftcore".to_vec();
        return h;
    }

    h.mix_digest = BFT_DIGEST;
    h.round = round;
    for i in 0..members {
        let mut address = [0u8; 20];
        address[19] = i + 1;
        h.committee
            .push(CommitteeMember::new(address, 100u64 * (i as u64 + 1)));
    }
    h
}

fn print_header(h: &Header) {
    println!("mode:          {:?}", h.mode());
    println!("parent_hash:   0x{}", hex::encode(h.parent_hash));
    println!("uncle_hash:    0x{}", hex::encode(h.uncle_hash));
    println!("coinbase:      0x{}", hex::encode(h.coinbase));
    println!("root:          0x{}", hex::encode(h.root));
    println!("tx_hash:       0x{}", hex::encode(h.tx_hash));
    println!("receipt_hash:  0x{}", hex::encode(h.receipt_hash));
    println!("difficulty:    {}", h.difficulty);
    println!("number:        {}", h.number);
    println!("gas_limit:     {}", h.gas_limit);
    println!("gas_used:      {}", h.gas_used);
    println!("time:          {}", h.time);
    println!("extra:         0x{}", hex::encode(&h.extra));
    println!("mix_digest:    0x{}", hex::encode(h.mix_digest));
    println!("nonce:         0x{}", hex::encode(h.nonce));
    match &h.base_fee {
        Some(fee) => println!("base_fee:      {fee}"),
        None => println!("base_fee:      -"),
    }
    if h.is_bft() {
        println!("committee:     {} members", h.committee.len());
        for m in &h.committee {
            println!("  0x{} power={}", hex::encode(m.address), m.voting_power);
        }
        println!("proposer_seal: 0x{}", hex::encode(&h.proposer_seal));
        println!("round:         {}", h.round);
        println!("committed:     {} seals", h.committed_seals.len());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command {
        Command::Hash { input } => {
            let bytes = parse_hex(&input)?;
            debug!(len = bytes.len(), "hashing wire header");
            let header = decode_header(&bytes).context("decode header")?;
            println!("mode: {:?}", header.mode());
            println!("hash: 0x{}", hex::encode(header_hash(&header)));
        }

        Command::Decode { input } => {
            let bytes = parse_hex(&input)?;
            let header = decode_header(&bytes).context("decode header")?;
            print_header(&header);
            println!("hash:          0x{}", hex::encode(header_hash(&header)));
        }

        Command::Sample {
            bft,
            members,
            round,
            number,
        } => {
            let header = sample_header(bft, members, round, number);
            info!(mode = ?header.mode(), members = header.committee.len(), "built sample header");
            println!("wire: 0x{}", hex::encode(encode_header(&header)));
            println!("hash: 0x{}", hex::encode(header_hash(&header)));
        }
    }

    Ok(())
}
