// src/main.rs
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use solana_quote_router::{
    config::load_config,
    routing::QuoteRouter,
    utils::setup_logging,
    SwapParams,
};
use solana_sdk::pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(author, version, about = "Best-quote router over Solana swap backends")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the best quote for a swap
    Quote(QuoteArgs),
    /// Print every backend's quote, best output first
    Compare(QuoteArgs),
    /// Find the best quote and build a signable transaction for it
    Swap {
        #[command(flatten)]
        quote: QuoteArgs,
        /// Wallet that will sign the transaction
        #[arg(long)]
        wallet: Pubkey,
    },
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Input mint
    #[arg(long)]
    input: Pubkey,
    /// Output mint
    #[arg(long)]
    output: Pubkey,
    /// Amount in the input mint's smallest unit
    #[arg(long)]
    amount: u64,
    #[arg(long, default_value_t = 50)]
    slippage_bps: u16,
    /// Routing hint: age of the newer token in milliseconds
    #[arg(long)]
    token_age_ms: Option<u64>,
    /// Routing hint: pair liquidity in USD
    #[arg(long)]
    liquidity_usd: Option<f64>,
}

impl QuoteArgs {
    fn params(&self) -> SwapParams {
        SwapParams::new(self.input, self.output, self.amount, self.slippage_bps)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config()?;
    setup_logging(config.log_level_filter()).context("Failed to initialize logging")?;
    info!("🚀 Solana quote router starting...");
    config.log_summary();

    let router = QuoteRouter::from_config(&config)?;

    match cli.command {
        Command::Quote(args) => {
            let quote = router
                .best_quote(&args.params(), args.token_age_ms, args.liquidity_usd)
                .await;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Compare(args) => {
            let quotes = router.all_quotes(&args.params()).await;
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }
        Command::Swap { quote: args, wallet } => {
            let params = args.params().with_wallet(wallet);
            let quote = router
                .best_quote(&params, args.token_age_ms, args.liquidity_usd)
                .await
                .ok_or_else(|| anyhow!("no route for {} -> {}", params.input_mint, params.output_mint))?;
            let result = router.execute_swap(&quote, &wallet).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
