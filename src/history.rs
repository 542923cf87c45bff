//! Paginated access to a channel's message history.
//!
//! The scanner only ever sees `HistoryMessage` pages through the
//! `HistoryFetcher` trait, so it can be driven by an in-memory feed in tests
//! and by the Discord REST API in production.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::GetMessages;
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId, UserId};

use crate::error::SearchError;
use crate::segments::extract_segments;

/// One piece of a message, as far as the matcher cares. Anything that is
/// neither a user mention nor plain text collapses into `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Mention(UserId),
    Text(String),
    Other,
}

/// A message as seen by the scanner: its id (which doubles as a pagination
/// cursor) and its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub id: MessageId,
    pub segments: Vec<Segment>,
}

/// One bounded request per call against an external history feed.
#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    /// Fetch the page of up to `page_size` messages strictly older than
    /// `cursor` (or the newest page when `cursor` is `None`), ordered
    /// newest-to-oldest. An empty page means no older history exists.
    async fn fetch(
        &self,
        cursor: Option<MessageId>,
        page_size: u8,
    ) -> Result<Vec<HistoryMessage>, SearchError>;
}

/// Fetches history from one Discord channel. The channel is fixed at
/// construction and immutable for the lifetime of a search.
pub struct ChannelHistoryFetcher {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelHistoryFetcher {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl HistoryFetcher for ChannelHistoryFetcher {
    async fn fetch(
        &self,
        cursor: Option<MessageId>,
        page_size: u8,
    ) -> Result<Vec<HistoryMessage>, SearchError> {
        let mut builder = GetMessages::new().limit(page_size);
        if let Some(before) = cursor {
            builder = builder.before(before);
        }

        // Discord delivers these newest-first, which is exactly the scan order.
        let messages = self.channel_id.messages(&*self.http, builder).await?;

        Ok(messages
            .iter()
            .map(|message| HistoryMessage {
                id: message.id,
                segments: extract_segments(message),
            })
            .collect())
    }
}
