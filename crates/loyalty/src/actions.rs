//! Redeem and start-challenge intents. Neither touches the catalog: the only
//! output is an acknowledgement or the precondition that failed.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::state::{AvailableChallenge, Reward};
use crate::views;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Acknowledgement {
    Redeem { reward_id: u32, points: u64, message: String },
    StartChallenge { challenge_id: u32, message: String },
}

impl Acknowledgement {
    pub fn message(&self) -> &str {
        match self {
            Acknowledgement::Redeem { message, .. } => message,
            Acknowledgement::StartChallenge { message, .. } => message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    UnknownReward { reward_id: u32 },
    Unaffordable { reward_id: u32, shortfall: u64 },
    UnknownChallenge { challenge_id: u32 },
    /// The challenge exists but is already active or completed.
    NotStartable { challenge_id: u32 },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::UnknownReward { reward_id } => write!(f, "No reward with id {reward_id}"),
            Rejection::Unaffordable { shortfall, .. } => {
                write!(f, "Need {shortfall} more points")
            }
            Rejection::UnknownChallenge { challenge_id } => {
                write!(f, "No challenge with id {challenge_id}")
            }
            Rejection::NotStartable { challenge_id } => {
                write!(f, "Challenge {challenge_id} is not available to start")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Acknowledged(Acknowledgement),
    Rejected(Rejection),
}

impl ActionOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, ActionOutcome::Acknowledged(_))
    }
}

/// Acknowledge a redemption if the balance covers it. The balance is not
/// debited and no transaction is recorded.
pub fn redeem(reward: &Reward, user_points: u64) -> ActionOutcome {
    if !views::affordable(reward, user_points) {
        let shortfall = views::shortfall(reward, user_points);
        warn!(reward_id = reward.id, shortfall, "redeem rejected");
        return ActionOutcome::Rejected(Rejection::Unaffordable {
            reward_id: reward.id,
            shortfall,
        });
    }
    info!(reward_id = reward.id, points = reward.points, "redeem acknowledged");
    ActionOutcome::Acknowledged(Acknowledgement::Redeem {
        reward_id: reward.id,
        points: reward.points,
        message: format!("Redeeming {} for {} points!", reward.name, reward.points),
    })
}

pub fn start_challenge(challenge: &AvailableChallenge) -> ActionOutcome {
    info!(challenge_id = challenge.info.id, "start challenge acknowledged");
    ActionOutcome::Acknowledged(Acknowledgement::StartChallenge {
        challenge_id: challenge.info.id,
        message: format!("Starting challenge: {}", challenge.info.title),
    })
}

/// Look the reward up by id, then [`redeem`] it.
pub fn redeem_by_id(catalog: &Catalog, reward_id: u32) -> ActionOutcome {
    match catalog.rewards.iter().find(|r| r.id == reward_id) {
        Some(reward) => redeem(reward, catalog.account.points),
        None => {
            warn!(reward_id, "redeem rejected: unknown reward");
            ActionOutcome::Rejected(Rejection::UnknownReward { reward_id })
        }
    }
}

/// Only challenges from the available bucket can be started.
pub fn start_challenge_by_id(catalog: &Catalog, challenge_id: u32) -> ActionOutcome {
    if let Some(challenge) = catalog
        .challenges
        .available
        .iter()
        .find(|c| c.info.id == challenge_id)
    {
        return start_challenge(challenge);
    }
    let rejection = if catalog.challenges.infos().any(|c| c.id == challenge_id) {
        Rejection::NotStartable { challenge_id }
    } else {
        Rejection::UnknownChallenge { challenge_id }
    };
    warn!(challenge_id, ?rejection, "start challenge rejected");
    ActionOutcome::Rejected(rejection)
}
