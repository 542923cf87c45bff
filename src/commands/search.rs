use crate::error::SearchError;
use crate::history::ChannelHistoryFetcher;
use crate::search::{run_search, SearchOutcome, SearchRequest, Target};
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::builder::CreateMessage;
use serenity::model::id::MessageId;
use tracing::{error, info};

/// Find who last pinged you (or someone else) and quote that message
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn whopinged(
    ctx: Context<'_>,
    #[description = "Which hit to return, counting back from the newest (default 1)"]
    occurrence: Option<usize>,
    #[description = "How many pages of history to walk before giving up"]
    rounds: Option<usize>,
    #[description = "Look for pings of this user instead of yourself"]
    user: Option<serenity::User>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let target_id = user.as_ref().map(|u| u.id).unwrap_or_else(|| ctx.author().id);
    let request = SearchRequest {
        target: Target::ByMention(target_id),
        occurrence: occurrence.unwrap_or(1),
        round_budget: rounds.unwrap_or(ctx.data().config.max_query_rounds),
        exclude: trigger_message_id(&ctx),
    };

    match execute(&ctx, &request).await? {
        Some(SearchOutcome::Found(message_id)) => cite_message(&ctx, message_id).await?,
        Some(SearchOutcome::NotFound(reason)) => {
            info!(
                "no ping of {} found in channel {} ({:?})",
                target_id,
                ctx.channel_id(),
                reason
            );
            let who = if target_id == ctx.author().id {
                "you".to_string()
            } else {
                user.map(|u| u.name).unwrap_or_else(|| target_id.to_string())
            };
            ctx.say(format!("No one has pinged {} recently.", who)).await?;
        }
        None => {}
    }
    Ok(())
}

/// Find the last message containing some text and quote it
#[poise::command(slash_command, prefix_command, guild_only, rename = "findmsg")]
pub async fn find_msg(
    ctx: Context<'_>,
    #[description = "Substring to look for (exact match)"] text: String,
    #[description = "Which hit to return, counting back from the newest (default 1)"]
    occurrence: Option<usize>,
    #[description = "How many pages of history to walk before giving up"]
    rounds: Option<usize>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let request = SearchRequest {
        target: Target::ByText(text),
        occurrence: occurrence.unwrap_or(1),
        round_budget: rounds.unwrap_or(ctx.data().config.max_query_rounds),
        exclude: trigger_message_id(&ctx),
    };

    match execute(&ctx, &request).await? {
        Some(SearchOutcome::Found(message_id)) => cite_message(&ctx, message_id).await?,
        Some(SearchOutcome::NotFound(reason)) => {
            info!(
                "no text match found in channel {} ({:?})",
                ctx.channel_id(),
                reason
            );
            ctx.say("No matching message found.").await?;
        }
        None => {}
    }
    Ok(())
}

/// Run the scanner against this channel's history. Errors that should reach
/// the user as a message (rather than as a found/not-found outcome) are
/// reported here and collapse to `None`.
async fn execute(
    ctx: &Context<'_>,
    request: &SearchRequest,
) -> Result<Option<SearchOutcome>, Error> {
    let fetcher = ChannelHistoryFetcher::new(
        ctx.serenity_context().http.clone(),
        ctx.channel_id(),
    );
    match run_search(&fetcher, request, ctx.data().config.per_msg_count).await {
        Ok(outcome) => Ok(Some(outcome)),
        Err(SearchError::InvalidRequest(reason)) => {
            ctx.say(format!("Bad search arguments: {}.", reason)).await?;
            Ok(None)
        }
        Err(err @ SearchError::SourceUnavailable(_)) => {
            error!("history search failed in channel {}: {}", ctx.channel_id(), err);
            // Deliberately distinct from the not-found replies.
            ctx.say("Search failed: could not read the channel history.")
                .await?;
            Ok(None)
        }
    }
}

/// The id of the message that triggered this invocation, if it exists in
/// channel history. Slash interactions never do.
fn trigger_message_id(ctx: &Context<'_>) -> Option<MessageId> {
    match ctx {
        poise::Context::Prefix(prefix) => Some(prefix.msg.id),
        poise::Context::Application(_) => None,
    }
}

/// Cite the found message back into the channel: a reply referencing it for
/// prefix invocations, a jump link for slash invocations.
async fn cite_message(ctx: &Context<'_>, found: MessageId) -> Result<(), Error> {
    match ctx {
        poise::Context::Prefix(prefix) => {
            let builder = CreateMessage::new()
                .content("↑")
                .reference_message((prefix.msg.channel_id, found));
            prefix
                .msg
                .channel_id
                .send_message(ctx.serenity_context(), builder)
                .await?;
        }
        poise::Context::Application(_) => {
            let link = found.link(ctx.channel_id(), ctx.guild_id());
            ctx.say(format!("↑ {}", link)).await?;
        }
    }
    Ok(())
}
