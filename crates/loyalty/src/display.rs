//! Total mappings from domain values to display hints. The shell decides what a
//! tone or an icon key looks like on screen; this module only names them.

use serde::{Deserialize, Serialize};

use crate::state::{ChallengeKind, Difficulty, Direction, RewardCategory, TransactionCategory};

/// Color family of a badge or figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Blue,
    Purple,
    Orange,
    Gray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Target,
    Clock,
    Trophy,
    Star,
    Zap,
    Award,
    Coffee,
    Smartphone,
    Plane,
    Car,
    Home,
    Gift,
    Plus,
    Minus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

pub fn difficulty_tone(difficulty: Difficulty) -> Tone {
    match difficulty {
        Difficulty::Easy => Tone::Green,
        Difficulty::Medium => Tone::Yellow,
        Difficulty::Hard => Tone::Red,
        Difficulty::Unknown => Tone::Gray,
    }
}

pub fn challenge_icon(kind: ChallengeKind) -> IconKey {
    match kind {
        ChallengeKind::Purchase => IconKey::Target,
        ChallengeKind::Timing => IconKey::Clock,
        ChallengeKind::Spending => IconKey::Trophy,
        ChallengeKind::Social => IconKey::Star,
        ChallengeKind::Variety => IconKey::Zap,
        ChallengeKind::Other => IconKey::Target,
    }
}

pub fn reward_icon(category: RewardCategory) -> IconKey {
    match category {
        RewardCategory::Food => IconKey::Coffee,
        RewardCategory::Electronics => IconKey::Smartphone,
        RewardCategory::Travel => IconKey::Plane,
        RewardCategory::Automotive => IconKey::Car,
        RewardCategory::Home => IconKey::Home,
        RewardCategory::Other => IconKey::Gift,
    }
}

pub fn category_badge(category: TransactionCategory) -> Badge {
    let (label, tone) = match category {
        TransactionCategory::Purchase => ("Purchase", Tone::Blue),
        TransactionCategory::Challenge => ("Challenge", Tone::Purple),
        TransactionCategory::Bonus => ("Bonus", Tone::Orange),
        TransactionCategory::Redemption => ("Redemption", Tone::Red),
        TransactionCategory::Referral => ("Referral", Tone::Green),
        TransactionCategory::Other => ("Other", Tone::Gray),
    };
    Badge {
        label: label.to_string(),
        tone,
    }
}

pub fn direction_tone(direction: Direction) -> Tone {
    match direction {
        Direction::Earned => Tone::Green,
        Direction::Redeemed => Tone::Red,
    }
}

pub fn direction_icon(direction: Direction) -> IconKey {
    match direction {
        Direction::Earned => IconKey::Plus,
        Direction::Redeemed => IconKey::Minus,
    }
}
