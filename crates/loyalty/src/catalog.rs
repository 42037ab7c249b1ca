use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::display::IconKey;
use crate::errors::CatalogError;
use crate::state::{
    self, AccountStats, Achievement, ActiveChallenge, AvailableChallenge, ChallengeBook,
    ChallengeInfo, ChallengeKind, CompletedChallenge, Difficulty, Direction, Reward,
    RewardCategory, Transaction, TransactionCategory, UserAccount, TIERS,
};

/// Everything the dashboard reads. Loaded once, then only borrowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub account: UserAccount,
    #[serde(default)]
    pub stats: AccountStats,
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub challenges: ChallengeBook,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl Catalog {
    /// Check every record invariant. Unknown category/type strings are not
    /// errors; they already deserialized into their fallback variants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for reward in &self.rewards {
            if !seen.insert(reward.id) {
                return Err(CatalogError::DuplicateReward(reward.id));
            }
            if reward.points == 0 {
                return Err(CatalogError::FreeReward(reward.id));
            }
        }

        let mut seen = HashSet::new();
        for info in self.challenges.infos() {
            if !seen.insert(info.id) {
                return Err(CatalogError::DuplicateChallenge(info.id));
            }
            if info.reward == 0 {
                return Err(CatalogError::ZeroChallengeReward(info.id));
            }
        }
        if let Some(c) = self.challenges.active.iter().find(|c| c.target == 0) {
            return Err(CatalogError::ZeroTarget(c.info.id));
        }

        let mut seen = HashSet::new();
        for tx in &self.transactions {
            if !seen.insert(tx.id) {
                return Err(CatalogError::DuplicateTransaction(tx.id));
            }
            let sign_ok = match tx.direction {
                Direction::Earned => tx.points > 0,
                Direction::Redeemed => tx.points < 0,
            };
            if !sign_ok {
                return Err(CatalogError::SignMismatch {
                    id: tx.id,
                    direction: tx.direction.as_str(),
                    points: tx.points,
                });
            }
        }

        validate_account(&self.account)
    }
}

fn validate_account(account: &UserAccount) -> Result<(), CatalogError> {
    let index = state::tier_index(&account.tier)
        .ok_or_else(|| CatalogError::UnknownTier(account.tier.clone()))?;

    let earned = state::tier_for_points(account.points);
    if earned != index {
        return Err(CatalogError::TierMismatch {
            points: account.points,
            expected: TIERS[earned].name.to_string(),
            found: account.tier.clone(),
        });
    }

    let next = TIERS[state::next_tier_index(index)].name;
    if account.next_tier != next {
        return Err(CatalogError::NextTierMismatch {
            tier: account.tier.clone(),
            expected: next.to_string(),
            found: account.next_tier.clone(),
        });
    }

    let expected = state::points_to_next_tier(account.points);
    if account.points_to_next_tier != expected {
        return Err(CatalogError::PointsToNextTierMismatch {
            expected,
            found: account.points_to_next_tier,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where the dashboard gets its catalog. A live backend plugs in here.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// The built-in demo data.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeedCatalog;

impl CatalogSource for SeedCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = seed();
        catalog.validate()?;
        info!(
            rewards = catalog.rewards.len(),
            transactions = catalog.transactions.len(),
            "loaded seed catalog"
        );
        Ok(catalog)
    }
}

/// A JSON document with the same shape as [`Catalog`].
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonFileSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&body)?;
        catalog.validate()?;
        info!(
            path = %self.path.display(),
            rewards = catalog.rewards.len(),
            transactions = catalog.transactions.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn info(
    id: u32,
    title: &str,
    description: &str,
    reward: u64,
    difficulty: Difficulty,
    kind: ChallengeKind,
) -> ChallengeInfo {
    ChallengeInfo {
        id,
        title: title.into(),
        description: description.into(),
        reward,
        difficulty,
        kind,
    }
}

fn reward(
    id: u32,
    name: &str,
    points: u64,
    category: RewardCategory,
    description: &str,
    popular: bool,
) -> Reward {
    Reward {
        id,
        name: name.into(),
        points,
        category,
        description: description.into(),
        popular,
    }
}

fn tx(
    id: u32,
    date: NaiveDate,
    direction: Direction,
    description: &str,
    points: i64,
    category: TransactionCategory,
) -> Transaction {
    Transaction {
        id,
        date,
        direction,
        description: description.into(),
        points,
        category,
    }
}

/// The demo account and its catalogs.
pub fn seed() -> Catalog {
    use ChallengeKind as K;
    use Difficulty as D;
    use Direction::{Earned, Redeemed};
    use RewardCategory as R;
    use TransactionCategory as T;

    let account = UserAccount {
        name: "Sarah Johnson".into(),
        email: "sarah.johnson@email.com".into(),
        points: 12_350,
        tier: "Gold".into(),
        next_tier: "Platinum".into(),
        points_to_next_tier: 2_650,
        member_since: "2021".into(),
    };

    let stats = AccountStats {
        lifetime_earned: 24_750,
        lifetime_redeemed: 12_400,
        this_month: 1_250,
        streak_days: 15,
    };

    let rewards = vec![
        reward(
            1,
            "$10 Coffee Shop Voucher",
            1_000,
            R::Food,
            "Redeem at any participating coffee shop",
            true,
        ),
        reward(
            2,
            "Wireless Earbuds",
            8_500,
            R::Electronics,
            "Premium quality wireless earbuds with noise cancellation",
            false,
        ),
        reward(
            3,
            "$50 Flight Discount",
            5_000,
            R::Travel,
            "Discount on domestic flights with partner airlines",
            true,
        ),
        reward(
            4,
            "Free Car Wash",
            1_500,
            R::Automotive,
            "Premium car wash service at participating locations",
            false,
        ),
        reward(
            5,
            "Home Cleaning Service",
            6_000,
            R::Home,
            "3-hour professional home cleaning service",
            false,
        ),
        reward(
            6,
            "$25 Restaurant Voucher",
            2_500,
            R::Food,
            "Dine at over 500 partner restaurants",
            true,
        ),
    ];

    let challenges = ChallengeBook {
        active: vec![
            ActiveChallenge {
                info: info(
                    1,
                    "Coffee Lover's Quest",
                    "Purchase 5 coffee drinks this month",
                    500,
                    D::Easy,
                    K::Purchase,
                ),
                progress: 3,
                target: 5,
                time_left: "12 days".into(),
            },
            ActiveChallenge {
                info: info(
                    2,
                    "Weekend Warrior",
                    "Make purchases on 3 weekends",
                    750,
                    D::Medium,
                    K::Timing,
                ),
                progress: 1,
                target: 3,
                time_left: "3 weeks".into(),
            },
            ActiveChallenge {
                info: info(
                    3,
                    "Big Spender",
                    "Spend $200 in a single month",
                    1_200,
                    D::Hard,
                    K::Spending,
                ),
                progress: 120,
                target: 200,
                time_left: "18 days".into(),
            },
        ],
        available: vec![
            AvailableChallenge {
                info: info(
                    4,
                    "Social Butterfly",
                    "Refer 3 friends to join the loyalty program",
                    2_000,
                    D::Medium,
                    K::Social,
                ),
                duration: "30 days".into(),
            },
            AvailableChallenge {
                info: info(
                    5,
                    "Early Bird",
                    "Make 5 purchases before 10 AM",
                    800,
                    D::Easy,
                    K::Timing,
                ),
                duration: "2 weeks".into(),
            },
            AvailableChallenge {
                info: info(
                    6,
                    "Category Explorer",
                    "Purchase from 4 different categories",
                    1_000,
                    D::Medium,
                    K::Variety,
                ),
                duration: "1 month".into(),
            },
        ],
        completed: vec![
            CompletedChallenge {
                info: info(
                    7,
                    "First Steps",
                    "Make your first loyalty purchase",
                    100,
                    D::Unknown,
                    K::Other,
                ),
                completed_date: date(2024, 1, 15),
            },
            CompletedChallenge {
                info: info(
                    8,
                    "Point Collector",
                    "Accumulate 1,000 points",
                    200,
                    D::Unknown,
                    K::Other,
                ),
                completed_date: date(2024, 1, 28),
            },
        ],
    };

    let transactions = vec![
        tx(1, date(2024, 1, 10), Earned, "Purchase at Coffee Shop Downtown", 125, T::Purchase),
        tx(2, date(2024, 1, 9), Redeemed, "$10 Coffee Shop Voucher", -1_000, T::Redemption),
        tx(3, date(2024, 1, 8), Earned, "Challenge Completed: Coffee Lover", 500, T::Challenge),
        tx(4, date(2024, 1, 7), Earned, "Purchase at Electronics Store", 200, T::Purchase),
        tx(5, date(2024, 1, 6), Earned, "Bonus Points - Weekend Special", 300, T::Bonus),
        tx(6, date(2024, 1, 5), Redeemed, "Free Car Wash Service", -1_500, T::Redemption),
        tx(7, date(2024, 1, 4), Earned, "Friend Referral Bonus", 2_000, T::Referral),
        tx(8, date(2024, 1, 3), Earned, "Purchase at Restaurant", 75, T::Purchase),
    ];

    let achievements = vec![
        Achievement { name: "First Purchase".into(), icon: IconKey::Star, unlocked: true },
        Achievement { name: "Point Collector".into(), icon: IconKey::Trophy, unlocked: true },
        Achievement { name: "Loyal Customer".into(), icon: IconKey::Award, unlocked: true },
        Achievement { name: "Challenge Master".into(), icon: IconKey::Target, unlocked: false },
    ];

    Catalog {
        account,
        stats,
        rewards,
        challenges,
        transactions,
        achievements,
    }
}
