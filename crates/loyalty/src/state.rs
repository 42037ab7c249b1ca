use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::display::IconKey;
use crate::errors::SelectorError;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// One rung of the tier ladder. An account belongs to the highest tier whose
/// `min_points` it has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierRule {
    pub name: &'static str,
    pub min_points: u64,
}

pub const TIERS: [TierRule; 4] = [
    TierRule { name: "Bronze", min_points: 0 },
    TierRule { name: "Silver", min_points: 5_000 },
    TierRule { name: "Gold", min_points: 10_000 },
    TierRule { name: "Platinum", min_points: 15_000 },
];

/// Width of the progress bar between two tiers.
pub const DEFAULT_TIER_SPAN: u64 = 15_000;

pub fn tier_index(name: &str) -> Option<usize> {
    TIERS.iter().position(|t| t.name == name)
}

pub fn tier_for_points(points: u64) -> usize {
    TIERS
        .iter()
        .rposition(|t| points >= t.min_points)
        .unwrap_or(0)
}

/// The tier after `index`. The top tier is its own successor.
pub fn next_tier_index(index: usize) -> usize {
    (index + 1).min(TIERS.len() - 1)
}

/// Points still needed to reach the next boundary, floored at zero.
pub fn points_to_next_tier(points: u64) -> u64 {
    let next = next_tier_index(tier_for_points(points));
    TIERS[next].min_points.saturating_sub(points)
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Supplied by the identity/session provider; never mutated by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub points: u64,
    pub tier: String,
    pub next_tier: String,
    pub points_to_next_tier: u64,
    pub member_since: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub lifetime_earned: u64,
    pub lifetime_redeemed: u64,
    pub this_month: i64,
    pub streak_days: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub icon: IconKey,
    pub unlocked: bool,
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Food,
    Electronics,
    Travel,
    Automotive,
    Home,
    #[serde(other)]
    Other,
}

impl RewardCategory {
    pub const ALL: [RewardCategory; 5] = [
        RewardCategory::Food,
        RewardCategory::Electronics,
        RewardCategory::Travel,
        RewardCategory::Automotive,
        RewardCategory::Home,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RewardCategory::Food => "food",
            RewardCategory::Electronics => "electronics",
            RewardCategory::Travel => "travel",
            RewardCategory::Automotive => "automotive",
            RewardCategory::Home => "home",
            RewardCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RewardCategory::Food => "Food & Dining",
            RewardCategory::Electronics => "Electronics",
            RewardCategory::Travel => "Travel",
            RewardCategory::Automotive => "Automotive",
            RewardCategory::Home => "Home & Services",
            RewardCategory::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u32,
    pub name: String,
    pub points: u64,
    pub category: RewardCategory,
    pub description: String,
    #[serde(default)]
    pub popular: bool,
}

/// Category selector of the rewards search, `All` being the wildcard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(RewardCategory),
}

impl CategoryFilter {
    /// Menu order: the wildcard first, then every known category.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(RewardCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "all" {
            return Ok(CategoryFilter::All);
        }
        RewardCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .map(CategoryFilter::Only)
            .ok_or_else(|| SelectorError::RewardCategory(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => f.write_str(c.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Purchase,
    Timing,
    Spending,
    Social,
    Variety,
    #[default]
    #[serde(other)]
    Other,
}

/// Fields every challenge carries regardless of its bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub reward: u64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(rename = "type", default)]
    pub kind: ChallengeKind,
}

/// A progress-tracked challenge. `progress` may run past `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveChallenge {
    #[serde(flatten)]
    pub info: ChallengeInfo,
    pub progress: u64,
    pub target: u64,
    pub time_left: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableChallenge {
    #[serde(flatten)]
    pub info: ChallengeInfo,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChallenge {
    #[serde(flatten)]
    pub info: ChallengeInfo,
    pub completed_date: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeBook {
    #[serde(default)]
    pub active: Vec<ActiveChallenge>,
    #[serde(default)]
    pub available: Vec<AvailableChallenge>,
    #[serde(default)]
    pub completed: Vec<CompletedChallenge>,
}

impl ChallengeBook {
    /// Every challenge header, bucket by bucket.
    pub fn infos(&self) -> impl Iterator<Item = &ChallengeInfo> {
        self.active
            .iter()
            .map(|c| &c.info)
            .chain(self.available.iter().map(|c| &c.info))
            .chain(self.completed.iter().map(|c| &c.info))
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Earned,
    Redeemed,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Earned => "earned",
            Direction::Redeemed => "redeemed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Purchase,
    Challenge,
    Bonus,
    Redemption,
    Referral,
    #[serde(other)]
    Other,
}

impl TransactionCategory {
    pub const ALL: [TransactionCategory; 5] = [
        TransactionCategory::Purchase,
        TransactionCategory::Challenge,
        TransactionCategory::Bonus,
        TransactionCategory::Redemption,
        TransactionCategory::Referral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionCategory::Purchase => "purchase",
            TransactionCategory::Challenge => "challenge",
            TransactionCategory::Bonus => "bonus",
            TransactionCategory::Redemption => "redemption",
            TransactionCategory::Referral => "referral",
            TransactionCategory::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub description: String,
    /// Signed delta: positive when earned, negative when redeemed.
    pub points: i64,
    pub category: TransactionCategory,
}

/// Selector of the history list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    #[default]
    All,
    Direction(Direction),
    Category(TransactionCategory),
}

impl TransactionFilter {
    /// The entries offered by the filter menu, in display order.
    pub const MENU: [TransactionFilter; 6] = [
        TransactionFilter::All,
        TransactionFilter::Direction(Direction::Earned),
        TransactionFilter::Direction(Direction::Redeemed),
        TransactionFilter::Category(TransactionCategory::Purchase),
        TransactionFilter::Category(TransactionCategory::Challenge),
        TransactionFilter::Category(TransactionCategory::Bonus),
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransactionFilter::All => "All Transactions",
            TransactionFilter::Direction(Direction::Earned) => "Points Earned",
            TransactionFilter::Direction(Direction::Redeemed) => "Points Redeemed",
            TransactionFilter::Category(TransactionCategory::Purchase) => "Purchases",
            TransactionFilter::Category(TransactionCategory::Challenge) => "Challenges",
            TransactionFilter::Category(TransactionCategory::Bonus) => "Bonuses",
            TransactionFilter::Category(TransactionCategory::Redemption) => "Redemptions",
            TransactionFilter::Category(TransactionCategory::Referral) => "Referrals",
            TransactionFilter::Category(TransactionCategory::Other) => "Other",
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        match needle.as_str() {
            "all" => return Ok(TransactionFilter::All),
            "earned" => return Ok(TransactionFilter::Direction(Direction::Earned)),
            "redeemed" => return Ok(TransactionFilter::Direction(Direction::Redeemed)),
            _ => {}
        }
        TransactionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .map(TransactionFilter::Category)
            .ok_or_else(|| SelectorError::TransactionFilter(s.to_string()))
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionFilter::All => f.write_str("all"),
            TransactionFilter::Direction(d) => f.write_str(d.as_str()),
            TransactionFilter::Category(c) => f.write_str(c.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Newest => f.write_str("newest"),
            SortOrder::Oldest => f.write_str("oldest"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(SelectorError::SortOrder(s.to_string())),
        }
    }
}
