use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use storefront_api::domain::store::ItemSearchQuery;
use storefront_api::utils::logger;
use storefront_api::{ApiError, CasingPolicy, CliConfig, Command, StorefrontApi, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Command::Convert { to, input } = &cli.command {
        let policy = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?.casing,
            None => CasingPolicy::default(),
        };

        let content = match input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).context("input is not valid JSON")?;
        println!("{}", serde_json::to_string_pretty(&to.convert(value, &policy))?);
        return Ok(());
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Request failed: {} (status: {:?})", e, e.status());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), ApiError> {
    let config = cli.resolve()?;
    tracing::info!("🔗 Backend: {}", config.api.base_url);

    let api = StorefrontApi::from_config(&config)?;

    match &cli.command {
        Command::Store { store_id } => print_json(&api.get_store(store_id).await?),
        Command::Items { store_id, keyword } => {
            let query = ItemSearchQuery {
                store_id: store_id.clone(),
                keyword: keyword.clone(),
            };
            print_json(&api.search_items(&query).await?)
        }
        Command::Counties => print_json(&api.counties().await?),
        Command::Districts => print_json(&api.districts().await?),
        Command::Convert { .. } => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
