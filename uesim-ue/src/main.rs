//! nr-ue-nas: 5G NAS tool for a simulated UE
//!
//! Encodes the uplink messages of an initial registration and decodes
//! downlink PDUs against a UE profile.
//!
//! # Usage
//!
//! ```bash
//! nr-ue-nas -c config/ue.yaml registration
//! nr-ue-nas -c config/ue.yaml decode 7e00560002000021...
//! nr-ue-nas -c config/ue.yaml -l debug decode "7e 00 56 ..." --length 51
//! ```

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use uesim_common::logging::{format_hex_compact, init_logging, LogLevel};
use uesim_common::UeProfile;
use uesim_nas::{MessageBody, TraceContext, UeContext};
use uesim_ue::load_and_validate_ue_profile;

/// nr-ue-nas - 5G NAS mobility management for a simulated UE
#[derive(Parser, Debug)]
#[command(name = "nr-ue-nas")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the UE profile (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short = 'l', long = "log-level", default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the initial Registration Request as hex
    Registration,

    /// Decode a downlink PDU given as hex
    Decode {
        /// PDU bytes; whitespace is ignored
        pdu: String,

        /// Declared PDU length, defaults to the number of bytes given
        #[arg(long)]
        length: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("nr-ue-nas failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    info!("Loading UE profile from: {}", args.config_file);
    let profile = load_and_validate_ue_profile(&args.config_file)
        .with_context(|| format!("Failed to load UE profile: {}", args.config_file))?;
    info!("HPLMN: {}, MSIN: {}", profile.plmn(), profile.msin);

    match args.command {
        Command::Registration => registration(profile),
        Command::Decode { pdu, length } => decode(profile, &pdu, length),
    }
}

fn registration(profile: UeProfile) -> Result<()> {
    let ctx = UeContext::new(profile);
    let pdu = ctx
        .make_registration_request()
        .context("Failed to encode Registration Request")?;
    println!("{}", hex::encode(pdu));
    Ok(())
}

fn decode(profile: UeProfile, pdu_hex: &str, length: Option<usize>) -> Result<()> {
    let compact: String = pdu_hex.chars().filter(|c| !c.is_whitespace()).collect();
    let pdu = hex::decode(&compact).context("PDU is not valid hex")?;
    if pdu.is_empty() {
        bail!("PDU is empty");
    }
    let length = length.unwrap_or(pdu.len());

    let mut ctx = UeContext::new(profile);
    let mut trace = TraceContext::recording();
    let result = ctx.decode(&pdu, length, &mut trace);

    for line in trace.take_lines() {
        println!("{line}");
    }
    let message = result.context("Failed to decode PDU")?;

    if let Some(security) = &message.security {
        info!(
            "Integrity wrapper: mac={} seq={}",
            hex::encode(security.mac),
            security.sequence_number
        );
    }

    if let MessageBody::AuthenticationRequest { .. } = message.body {
        let response = ctx
            .make_authentication_response()
            .context("Failed to encode Authentication Response")?;
        println!();
        println!("Authentication Response:");
        println!("{}", format_hex_compact(&response, 1));
    }

    Ok(())
}
