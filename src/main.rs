mod commands;
mod config;
mod discord_bot;
mod emoticons;
mod error;
mod groq;
mod models;
mod persona;
mod platform;
mod relations;
mod service;
mod voice;

use crate::config::Config;
use crate::groq::GroqClient;
use crate::relations::RelationStore;
use crate::service::ReplyService;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let groq = Arc::new(GroqClient::new(
        &config.groq_endpoint,
        &config.groq_model,
        &config.groq_api_key,
    ));
    let relations = Arc::new(RelationStore::new());
    let service = Arc::new(ReplyService::new(groq, relations, config.request_timeout));

    info!("Starting up with model {}", config.groq_model);
    discord_bot::run(&config.discord_token, service).await?;
    Ok(())
}
