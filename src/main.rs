use anyhow::Context;
use clap::Parser;
use search_travels::{cli, config, error, recognizer, recommend, scanner};
use search_travels_common::{CategoryTable, DestinationResolver};
use cli::{Cli, Commands};
use config::Config;
use recognizer::VisionApiRecognizer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "search_travels=debug" } else { "search_travels=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: Option<&std::path::Path>) -> anyhow::Result<CategoryTable> {
    match path {
        Some(p) => CategoryTable::from_file(p)
            .with_context(|| format!("テーブルを読み込めません: {}", p.display())),
        None => Ok(CategoryTable::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let table = load_table(cli.table.as_deref())?;

    match cli.command {
        Commands::Recognize { path, json } => {
            let images = scanner::collect_images(&path)?;
            if images.is_empty() {
                return Err(error::SearchTravelsError::NoImagesFound(path.display().to_string()).into());
            }

            let token = config.get_token()?;
            let recognizer = Arc::new(VisionApiRecognizer::new(&config, table.clone())?);
            let resolver = DestinationResolver::new(table);

            let results = recommend::recommend_images(
                recognizer,
                &images,
                &token,
                config.timeout(),
                &resolver,
            )
            .await;

            for item in &results {
                if json {
                    println!("{}", serde_json::to_string(item)?);
                } else {
                    println!("{}: {}", item.file_name, item.recommendation);
                }
            }
        }

        Commands::Resolve { category } => {
            let resolver = DestinationResolver::new(table);
            println!("{}", resolver.resolve(&category));
        }

        Commands::Categories => {
            for (category, destination) in table.entries() {
                println!("  {:<10} {}", category, destination);
            }
            println!("  {:<10} {}", "(default)", table.default_destination());
        }

        Commands::Config { set_token, set_endpoint, show } => {
            let mut config = config;
            let changed = set_token.is_some() || set_endpoint.is_some();

            if let Some(token) = set_token {
                config.token = Some(token);
            }
            if let Some(endpoint) = set_endpoint {
                config.endpoint = endpoint;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  トークン: {}", if config.get_token().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
