//! Pure derivations over borrowed catalogs. Nothing here mutates its input and
//! nothing here formats numbers or dates; that is the shell's job.

use serde::Serialize;
use tracing::debug;

use crate::display::{self, Badge, IconKey, Tone};
use crate::state::{
    ActiveChallenge, CategoryFilter, ChallengeBook, Direction, Reward, SortOrder, Transaction,
    TransactionFilter,
};

// ---------------------------------------------------------------------------
// Tier progress
// ---------------------------------------------------------------------------

/// Percent of the way to the next tier. Out-of-range input is not clamped:
/// `points_to_next_tier > span` yields a negative percentage.
pub fn tier_progress(points_to_next_tier: u64, span: u64) -> f64 {
    let span = span as f64;
    (span - points_to_next_tier as f64) / span * 100.0
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

pub fn affordable(reward: &Reward, user_points: u64) -> bool {
    user_points >= reward.points
}

/// Points still missing before `reward` can be redeemed; zero when affordable.
pub fn shortfall(reward: &Reward, user_points: u64) -> u64 {
    reward.points.saturating_sub(user_points)
}

pub fn reward_matches(reward: &Reward, query: &str, category: CategoryFilter) -> bool {
    let matches_search = reward
        .name
        .to_lowercase()
        .contains(&query.to_lowercase());
    let matches_category = match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(c) => reward.category == c,
    };
    matches_search && matches_category
}

/// Stable subsequence of `rewards` matching both the query and the category.
pub fn filter_rewards<'a>(
    rewards: &'a [Reward],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a Reward> {
    let out: Vec<&Reward> = rewards
        .iter()
        .filter(|r| reward_matches(r, query, category))
        .collect();
    debug!(query, %category, matched = out.len(), "filtered rewards");
    out
}

/// A reward card as the catalog tab shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RewardCard<'a> {
    #[serde(flatten)]
    pub reward: &'a Reward,
    pub affordable: bool,
    pub shortfall: u64,
    pub icon: IconKey,
}

pub fn reward_cards<'a>(
    rewards: &'a [Reward],
    query: &str,
    category: CategoryFilter,
    user_points: u64,
) -> Vec<RewardCard<'a>> {
    filter_rewards(rewards, query, category)
        .into_iter()
        .map(|reward| RewardCard {
            reward,
            affordable: affordable(reward, user_points),
            shortfall: shortfall(reward, user_points),
            icon: display::reward_icon(reward.category),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

pub fn transaction_matches(tx: &Transaction, filter: TransactionFilter) -> bool {
    match filter {
        TransactionFilter::All => true,
        TransactionFilter::Direction(d) => tx.direction == d,
        TransactionFilter::Category(c) => tx.category == c,
    }
}

/// Filter, then stable-sort by calendar date. Same-day entries keep their
/// catalog order in both directions.
pub fn history<'a>(
    transactions: &'a [Transaction],
    filter: TransactionFilter,
    order: SortOrder,
) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| transaction_matches(t, filter))
        .collect();
    match order {
        SortOrder::Newest => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => out.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    debug!(%filter, ?order, matched = out.len(), "derived history");
    out
}

/// Summary cards of the history tab. Always computed over the full ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_earned: u64,
    pub total_redeemed: u64,
    pub count: usize,
}

pub fn ledger_summary(transactions: &[Transaction]) -> LedgerSummary {
    let total_earned: i64 = transactions
        .iter()
        .filter(|t| t.direction == Direction::Earned)
        .map(|t| t.points)
        .sum();
    let total_redeemed: i64 = transactions
        .iter()
        .filter(|t| t.direction == Direction::Redeemed)
        .map(|t| t.points)
        .sum();
    LedgerSummary {
        total_earned: total_earned.unsigned_abs(),
        total_redeemed: total_redeemed.unsigned_abs(),
        count: transactions.len(),
    }
}

/// A history row with its display hints resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerRow<'a> {
    #[serde(flatten)]
    pub transaction: &'a Transaction,
    pub badge: Badge,
    pub tone: Tone,
    pub icon: IconKey,
}

pub fn ledger_rows<'a>(
    transactions: &'a [Transaction],
    filter: TransactionFilter,
    order: SortOrder,
) -> Vec<LedgerRow<'a>> {
    history(transactions, filter, order)
        .into_iter()
        .map(|transaction| LedgerRow {
            transaction,
            badge: display::category_badge(transaction.category),
            tone: display::direction_tone(transaction.direction),
            icon: display::direction_icon(transaction.direction),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    pub active: usize,
    pub completed: usize,
    pub completed_points: u64,
}

pub fn challenge_summary(book: &ChallengeBook) -> ChallengeSummary {
    ChallengeSummary {
        active: book.active.len(),
        completed: book.completed.len(),
        completed_points: book.completed.iter().map(|c| c.info.reward).sum(),
    }
}

/// `progress / target`, unclamped: overshooting challenges report more than 1.0.
pub fn progress_ratio(challenge: &ActiveChallenge) -> f64 {
    challenge.progress as f64 / challenge.target as f64
}
