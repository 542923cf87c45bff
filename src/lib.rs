pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod search;
pub mod segments;

/// Custom data passed to all commands
pub struct Data {
    pub config: config::Config,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
