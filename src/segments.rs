use poise::serenity_prelude as serenity;
use serenity::model::id::UserId;

use crate::history::Segment;

/// Break a Discord message into matcher segments: `<@id>` / `<@!id>` tokens
/// become `Mention`, the content between them becomes `Text`, attachments
/// become `Other`. Role mentions and malformed tokens stay plain text.
pub fn extract_segments(message: &serenity::Message) -> Vec<Segment> {
    let content = message.content.as_str();
    let mut segments = Vec::new();

    let mut text_start = 0;
    let mut pos = 0;
    while let Some(found) = content[pos..].find("<@") {
        let at = pos + found;
        match parse_mention(&content[at..]) {
            Some((user_id, consumed)) => {
                if at > text_start {
                    segments.push(Segment::Text(content[text_start..at].to_string()));
                }
                segments.push(Segment::Mention(user_id));
                pos = at + consumed;
                text_start = pos;
            }
            // Not a mention token; skip past the "<@" and keep scanning.
            None => pos = at + 2,
        }
    }
    if text_start < content.len() {
        segments.push(Segment::Text(content[text_start..].to_string()));
    }

    for _ in &message.attachments {
        segments.push(Segment::Other);
    }

    segments
}

/// Parse a mention token at the start of `input` (which begins with "<@").
/// Returns the mentioned user and the number of bytes consumed.
fn parse_mention(input: &str) -> Option<(UserId, usize)> {
    let body = input.strip_prefix("<@")?;
    let body = body.strip_prefix('!').unwrap_or(body);
    let end = body.find('>')?;
    let id: u64 = body[..end].parse().ok()?;
    if id == 0 {
        return None;
    }
    let consumed = (input.len() - body.len()) + end + 1;
    Some((UserId::new(id), consumed))
}
