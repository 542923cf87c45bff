use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Clone, Deserialize)]
pub struct Config {
    pub discord_token: String,
    pub application_id: u64,
    pub command_prefix: String,
    /// Default round budget: how many history pages a search may walk.
    pub max_query_rounds: usize,
    /// Page size requested per fetch round (Discord caps this at 100).
    pub per_msg_count: u8,
    pub status_message: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN must be set"))?,
            application_id: env::var("APPLICATION_ID")
                .map_err(|_| anyhow::anyhow!("APPLICATION_ID must be set"))?
                .parse()
                .map_err(|_| anyhow::anyhow!("APPLICATION_ID must be a valid u64"))?,
            command_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
            max_query_rounds: env::var("MAX_QUERY_ROUNDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            per_msg_count: env::var("PER_MSG_COUNT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20u8)
                .clamp(1, 100),
            status_message: env::var("STATUS_MESSAGE")
                .unwrap_or_else(|_| "Digging through the backscroll".to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .field("command_prefix", &self.command_prefix)
            .field("max_query_rounds", &self.max_query_rounds)
            .field("per_msg_count", &self.per_msg_count)
            .field("status_message", &self.status_message)
            .finish()
    }
}
