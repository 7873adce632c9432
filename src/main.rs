use anyhow::{Context, Result};
use clap::{Arg, Command};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainhop_router::{
    BridgeCatalog, ChainId, CrossChainRouter, OptimizationCriterion, Priority, RouterConfig,
    RoutingRequest, TxCategory,
};
use chainhop_router::mocks::StaticSignals;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("chainhop-router")
        .version("0.1.0")
        .author("chainhop Team <team@chainhop.dev>")
        .about("🌉 Cross-chain bridge route discovery and scoring engine")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file path (TOML); defaults apply when omitted"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .default_value("info"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("CHAIN_ID")
                .required(true)
                .help("Source chain id"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("CHAIN_ID")
                .required(true)
                .help("Destination chain id"),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .value_name("USD")
                .required(true)
                .help("Transfer amount in USD"),
        )
        .arg(
            Arg::new("priority")
                .long("priority")
                .value_name("LEVEL")
                .default_value("medium")
                .help("Gas priority: low, medium, high, urgent"),
        )
        .arg(
            Arg::new("criterion")
                .long("criterion")
                .value_name("CRITERION")
                .default_value("balanced")
                .help("Optimization criterion: security, cost, speed, balanced"),
        )
        .get_matches();

    let log_filter = format!(
        "chainhop_router={level},router={level}",
        level = matches.get_one::<String>("log-level").map(String::as_str).unwrap_or("info")
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            info!("📋 loading config from {}", path);
            RouterConfig::load_from_file(path)?
        }
        None => RouterConfig::default(),
    };

    let parse_chain = |name: &str| -> Result<ChainId> {
        let raw: u64 = matches
            .get_one::<String>(name)
            .expect("required arg")
            .parse()
            .with_context(|| format!("--{name} must be a positive integer chain id"))?;
        ChainId::new(raw).with_context(|| format!("--{name}: chain id 0 is invalid"))
    };
    let source = parse_chain("from")?;
    let destination = parse_chain("to")?;
    let amount: f64 = matches
        .get_one::<String>("amount")
        .expect("required arg")
        .parse()
        .context("--amount must be a number")?;
    let priority: Priority = matches
        .get_one::<String>("priority")
        .expect("defaulted arg")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let criterion: OptimizationCriterion = matches
        .get_one::<String>("criterion")
        .expect("defaulted arg")
        .parse()
        .map_err(anyhow::Error::msg)?;

    // Demo signal source: representative static numbers per chain. A real
    // deployment injects live collectors through the same provider traits.
    let providers = StaticSignals::new()
        .with_latency_ms(ChainId::ETHEREUM, 120.0)
        .with_latency_ms(ChainId::OPTIMISM, 60.0)
        .with_latency_ms(ChainId::POLYGON, 90.0)
        .with_latency_ms(ChainId::ARBITRUM, 70.0)
        .with_security(ChainId::ETHEREUM, 95.0)
        .with_security(ChainId::OPTIMISM, 85.0)
        .with_security(ChainId::POLYGON, 78.0)
        .with_security(ChainId::ARBITRUM, 86.0)
        .with_reliability(ChainId::ETHEREUM, 99.0)
        .with_reliability(ChainId::OPTIMISM, 96.0)
        .with_reliability(ChainId::POLYGON, 93.0)
        .with_reliability(ChainId::ARBITRUM, 97.0)
        .with_gas(ChainId::ETHEREUM, TxCategory::BridgeLeg, 8.0)
        .with_gas(ChainId::ETHEREUM, TxCategory::TransferLeg, 3.5)
        .with_gas(ChainId::OPTIMISM, TxCategory::BridgeLeg, 0.4)
        .with_gas(ChainId::OPTIMISM, TxCategory::TransferLeg, 0.2)
        .with_gas(ChainId::POLYGON, TxCategory::BridgeLeg, 0.1)
        .with_gas(ChainId::POLYGON, TxCategory::TransferLeg, 0.05)
        .with_gas(ChainId::ARBITRUM, TxCategory::BridgeLeg, 0.5)
        .with_gas(ChainId::ARBITRUM, TxCategory::TransferLeg, 0.25)
        .into_providers();

    let router = CrossChainRouter::new(BridgeCatalog::default_mainnet(), providers, config);
    let request = RoutingRequest::new(source, destination, amount).with_priority(priority);

    info!(
        "🔍 routing {} -> {} (${}, {:?}, {:?})",
        source, destination, amount, priority, criterion
    );
    let outcome = router.route(&request, criterion).await?;

    if let Some(selected) = &outcome.selected {
        let validation = router.validate_route(selected).await;
        if !validation.ok {
            for issue in &validation.issues {
                tracing::warn!("⚠️ selected route issue: {}", issue);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
