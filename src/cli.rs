use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::domain::{PartnerSecret, TransactionRequest};
use crate::ports::PartnerDirectory;
use crate::services::{discount, signature};

#[derive(Parser)]
#[command(name = "trx-gateway")]
#[command(about = "Partner transaction validation and pricing gateway", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print the effective configuration with secrets masked
    Config,

    /// Print a signed sample submission for a configured partner
    Sign(SignArgs),

    /// Print the discount a total would receive
    Quote {
        /// Total amount in minor currency units
        #[arg(value_name = "TOTAL", allow_hyphen_values = true)]
        total: i64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// Partner key, e.g. FAKEGOOGLE
    #[arg(long)]
    pub partner_key: String,

    /// Partner reference number
    #[arg(long)]
    pub ref_no: String,

    /// Total amount in minor currency units
    #[arg(long, allow_hyphen_values = true)]
    pub total: i64,

    /// Submission timestamp; defaults to the current UTC time
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Shared secret; looked up in the configured partners when omitted
    #[arg(long, env = "PARTNER_SECRET", hide_env_values = true)]
    pub secret: Option<String>,
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");
    print!("{}", render_config(config));
    println!("✓ Configuration is valid");

    Ok(())
}

pub fn render_config(config: &Config) -> String {
    let mut out = String::from("Configuration:\n");
    out.push_str(&format!("  Server Port: {}\n", config.server_port));
    out.push_str(&format!(
        "  Freshness Window: {}s\n",
        config.freshness_window_secs
    ));
    out.push_str(&format!("  Log Level: {}\n", config.log_level));
    out.push_str(&format!("  Log Format: {:?}\n", config.log_format));
    out.push_str(&format!("  Log Request Body: {}\n", config.log_request_body));
    out.push_str(&format!("  Partners ({}):\n", config.partners.len()));
    for partner in &config.partners {
        out.push_str(&format!(
            "    {}: {}\n",
            partner.partner_key,
            mask_secret(partner.secret.expose())
        ));
    }
    out
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    format!("{}****", visible)
}

pub fn handle_sign(config: &Config, args: SignArgs) -> anyhow::Result<()> {
    let request = signed_request(config, args)?;
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

/// Builds a submission without items, signed with the partner's secret.
pub fn signed_request(config: &Config, args: SignArgs) -> anyhow::Result<TransactionRequest> {
    let secret = match args.secret {
        Some(secret) => PartnerSecret::new(secret),
        None => config
            .partner_directory()
            .lookup(&args.partner_key)?
            .with_context(|| format!("partner {} is not configured", args.partner_key))?,
    };

    let timestamp = args
        .timestamp
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let mut request = TransactionRequest {
        partner_key: args.partner_key,
        partner_ref_no: args.ref_no,
        partner_password: secret.expose().to_string(),
        total_amount: args.total,
        items: None,
        timestamp,
        sig: String::new(),
    };

    request.sig = signature::compute_signature(&request, secret.expose())
        .context("timestamp is not a recognised date-time")?;

    Ok(request)
}

pub fn handle_quote(total: i64) -> anyhow::Result<()> {
    print!("{}", render_quote(total));
    Ok(())
}

pub fn render_quote(total: i64) -> String {
    let pricing = discount::price(total);
    let rate_bps = if total > 0 {
        discount::discount_rate_bps(total)
    } else {
        0
    };

    format!(
        "Total:    {}\nRate:     {}.{:02}%\nDiscount: {}\nFinal:    {}\n",
        pricing.total_amount,
        rate_bps / 100,
        rate_bps % 100,
        pricing.discount_amount,
        pricing.final_amount
    )
}
