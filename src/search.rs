//! The reverse match scanner.
//!
//! Walks a paginated history feed backward in bounded rounds, counting
//! predicate hits newest-to-oldest until the requested occurrence is reached.
//! Pure over the `HistoryFetcher` seam; no state outlives one call.

use serenity::model::id::{MessageId, UserId};

use crate::error::SearchError;
use crate::history::{HistoryFetcher, Segment};

/// What to look for. Exactly one of the two, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Messages containing a mention of this participant.
    ByMention(UserId),
    /// Messages with a text segment containing this literal substring.
    ByText(String),
}

impl Target {
    fn matches(&self, segments: &[Segment]) -> bool {
        segments.iter().any(|segment| match (self, segment) {
            (Target::ByMention(user), Segment::Mention(mentioned)) => user == mentioned,
            (Target::ByText(literal), Segment::Text(content)) => {
                content.contains(literal.as_str())
            }
            _ => false,
        })
    }
}

/// One search invocation. `exclude` is the triggering message's id, so a
/// query can never count itself as a hit.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub target: Target,
    /// 1-based rank of the desired match, counting back from the newest.
    pub occurrence: usize,
    /// Maximum number of fetch rounds before giving up.
    pub round_budget: usize,
    pub exclude: Option<MessageId>,
}

impl SearchRequest {
    fn validate(&self) -> Result<(), SearchError> {
        if self.occurrence < 1 {
            return Err(SearchError::InvalidRequest(
                "occurrence index must be at least 1",
            ));
        }
        if self.round_budget < 1 {
            return Err(SearchError::InvalidRequest(
                "round budget must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Why a search came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The feed ran out of older history before the occurrence was satisfied.
    HistoryExhausted,
    /// The round budget ran out with reachable history left unscanned.
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(MessageId),
    NotFound(NotFoundReason),
}

/// Drive up to `round_budget` fetch rounds, scanning each page newest-first
/// for the `occurrence`-th match across the whole multi-round walk.
///
/// Cancellation is cooperative: dropping the returned future abandons any
/// in-flight fetch and issues no further rounds.
pub async fn run_search<F>(
    fetcher: &F,
    request: &SearchRequest,
    page_size: u8,
) -> Result<SearchOutcome, SearchError>
where
    F: HistoryFetcher + ?Sized,
{
    request.validate()?;

    let mut cursor: Option<MessageId> = None;
    let mut hits = 0usize;

    for _ in 0..request.round_budget {
        let page = fetcher.fetch(cursor, page_size).await?;
        if page.is_empty() {
            return Ok(SearchOutcome::NotFound(NotFoundReason::HistoryExhausted));
        }

        for message in &page {
            // The trigger is skipped before the predicate ever runs, every
            // round: its position in history is not known in advance.
            if request.exclude == Some(message.id) {
                continue;
            }
            if request.target.matches(&message.segments) {
                hits += 1;
                if hits == request.occurrence {
                    return Ok(SearchOutcome::Found(message.id));
                }
            }
        }

        // Advance past this page whether it matched or not; a short but
        // non-empty page still gets a further round.
        cursor = page.last().map(|message| message.id);
    }

    Ok(SearchOutcome::NotFound(NotFoundReason::BudgetExhausted))
}
