use loyalty::catalog::{seed, Catalog, CatalogSource, JsonFileSource, SeedCatalog};
use loyalty::display::{self, IconKey, Tone};
use loyalty::errors::{CatalogError, SelectorError};
use loyalty::state::{
    points_to_next_tier, tier_for_points, CategoryFilter, ChallengeKind, Difficulty, Direction,
    RewardCategory, SortOrder, TransactionCategory, TransactionFilter, TIERS,
};

fn temp_file(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("loyalty-{}-{}", std::process::id(), name));
    std::fs::write(&path, body).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn seed_catalog_is_valid() {
    let catalog = SeedCatalog.load().unwrap();
    assert_eq!(catalog.rewards.len(), 6);
    assert_eq!(catalog.transactions.len(), 8);
    assert_eq!(catalog.account.points_to_next_tier, 2_650);
}

#[test]
fn rejects_duplicate_reward_id() {
    let mut catalog = seed();
    catalog.rewards[1].id = catalog.rewards[0].id;
    assert!(matches!(catalog.validate(), Err(CatalogError::DuplicateReward(1))));
}

#[test]
fn rejects_free_reward() {
    let mut catalog = seed();
    catalog.rewards[2].points = 0;
    assert!(matches!(catalog.validate(), Err(CatalogError::FreeReward(3))));
}

#[test]
fn rejects_duplicate_challenge_across_buckets() {
    let mut catalog = seed();
    catalog.challenges.completed[0].info.id = catalog.challenges.active[0].info.id;
    assert!(matches!(catalog.validate(), Err(CatalogError::DuplicateChallenge(1))));
}

#[test]
fn rejects_zero_target() {
    let mut catalog = seed();
    catalog.challenges.active[1].target = 0;
    assert!(matches!(catalog.validate(), Err(CatalogError::ZeroTarget(2))));
}

#[test]
fn progress_past_target_is_valid() {
    let mut catalog = seed();
    catalog.challenges.active[0].progress = 50;
    assert!(catalog.validate().is_ok());
}

#[test]
fn rejects_sign_mismatch() {
    let mut catalog = seed();
    catalog.transactions[1].points = 1_000;
    match catalog.validate() {
        Err(CatalogError::SignMismatch { id, direction, points }) => {
            assert_eq!(id, 2);
            assert_eq!(direction, "redeemed");
            assert_eq!(points, 1_000);
        }
        other => panic!("expected sign mismatch, got {other:?}"),
    }

    let mut catalog = seed();
    catalog.transactions[0].direction = Direction::Redeemed;
    assert!(matches!(catalog.validate(), Err(CatalogError::SignMismatch { id: 1, .. })));
}

#[test]
fn rejects_inconsistent_account() {
    let mut catalog = seed();
    catalog.account.tier = "Diamond".into();
    assert!(matches!(catalog.validate(), Err(CatalogError::UnknownTier(_))));

    let mut catalog = seed();
    catalog.account.tier = "Silver".into();
    assert!(matches!(catalog.validate(), Err(CatalogError::TierMismatch { .. })));

    let mut catalog = seed();
    catalog.account.next_tier = "Gold".into();
    assert!(matches!(catalog.validate(), Err(CatalogError::NextTierMismatch { .. })));

    let mut catalog = seed();
    catalog.account.points_to_next_tier = 100;
    assert!(matches!(
        catalog.validate(),
        Err(CatalogError::PointsToNextTierMismatch { expected: 2_650, found: 100 })
    ));
}

#[test]
fn tier_table_boundaries() {
    assert_eq!(TIERS[tier_for_points(0)].name, "Bronze");
    assert_eq!(TIERS[tier_for_points(4_999)].name, "Bronze");
    assert_eq!(TIERS[tier_for_points(5_000)].name, "Silver");
    assert_eq!(TIERS[tier_for_points(12_350)].name, "Gold");
    assert_eq!(TIERS[tier_for_points(40_000)].name, "Platinum");
    assert_eq!(points_to_next_tier(12_350), 2_650);
    assert_eq!(points_to_next_tier(40_000), 0);
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[test]
fn json_file_source_round_trips_seed() {
    let body = serde_json::to_string_pretty(&seed()).unwrap();
    let path = temp_file("seed.json", &body);
    let loaded = JsonFileSource::new(&path).load().unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, seed());
}

#[test]
fn json_file_source_reports_missing_file() {
    let err = JsonFileSource::new("/definitely/not/here.json").load().unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn json_file_source_validates() {
    let mut catalog = seed();
    catalog.rewards[0].points = 0;
    let path = temp_file("invalid.json", &serde_json::to_string(&catalog).unwrap());
    let err = JsonFileSource::new(&path).load().unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, CatalogError::FreeReward(1)));
}

#[test]
fn unknown_strings_fall_back() {
    let body = r#"{
        "account": {
            "name": "Test User",
            "points": 500,
            "tier": "Bronze",
            "nextTier": "Silver",
            "pointsToNextTier": 4500,
            "memberSince": "2024"
        },
        "rewards": [
            {"id": 1, "name": "Mystery Box", "points": 100, "category": "toys", "description": ""}
        ],
        "challenges": {
            "active": [
                {"id": 1, "title": "Hike", "description": "", "reward": 10,
                 "difficulty": "Extreme", "type": "outdoors",
                 "progress": 1, "target": 2, "timeLeft": "1 day"}
            ],
            "completed": [
                {"id": 2, "title": "Hello", "description": "", "reward": 5,
                 "completedDate": "2024-03-01"}
            ]
        },
        "transactions": [
            {"id": 1, "date": "2024-03-02", "type": "earned", "description": "Gift",
             "points": 40, "category": "gift"}
        ]
    }"#;
    let catalog: Catalog = serde_json::from_str(body).unwrap();
    catalog.validate().unwrap();

    let reward = &catalog.rewards[0];
    assert_eq!(reward.category, RewardCategory::Other);
    assert_eq!(display::reward_icon(reward.category), IconKey::Gift);

    let active = &catalog.challenges.active[0];
    assert_eq!(active.info.difficulty, Difficulty::Unknown);
    assert_eq!(active.info.kind, ChallengeKind::Other);
    assert_eq!(display::difficulty_tone(active.info.difficulty), Tone::Gray);
    assert_eq!(display::challenge_icon(active.info.kind), IconKey::Target);

    let completed = &catalog.challenges.completed[0];
    assert_eq!(completed.info.difficulty, Difficulty::Unknown);

    let tx = &catalog.transactions[0];
    assert_eq!(tx.category, TransactionCategory::Other);
    let badge = display::category_badge(tx.category);
    assert_eq!(badge.tone, Tone::Gray);
    assert_eq!(badge.label, "Other");
    assert!(catalog.achievements.is_empty());
}

// ---------------------------------------------------------------------------
// Display mappings and selectors
// ---------------------------------------------------------------------------

#[test]
fn difficulty_and_type_mappings() {
    assert_eq!(display::difficulty_tone(Difficulty::Easy), Tone::Green);
    assert_eq!(display::difficulty_tone(Difficulty::Medium), Tone::Yellow);
    assert_eq!(display::difficulty_tone(Difficulty::Hard), Tone::Red);
    assert_eq!(display::challenge_icon(ChallengeKind::Timing), IconKey::Clock);
    assert_eq!(display::challenge_icon(ChallengeKind::Spending), IconKey::Trophy);
    assert_eq!(display::challenge_icon(ChallengeKind::Social), IconKey::Star);
    assert_eq!(display::challenge_icon(ChallengeKind::Variety), IconKey::Zap);
}

#[test]
fn selectors_parse() {
    assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
    assert_eq!(
        "Travel".parse::<CategoryFilter>(),
        Ok(CategoryFilter::Only(RewardCategory::Travel))
    );
    assert_eq!(
        "toys".parse::<CategoryFilter>(),
        Err(SelectorError::RewardCategory("toys".into()))
    );

    assert_eq!(
        "redeemed".parse::<TransactionFilter>(),
        Ok(TransactionFilter::Direction(Direction::Redeemed))
    );
    assert_eq!(
        "referral".parse::<TransactionFilter>(),
        Ok(TransactionFilter::Category(TransactionCategory::Referral))
    );
    assert!("other".parse::<TransactionFilter>().is_err());

    assert_eq!("oldest".parse::<SortOrder>(), Ok(SortOrder::Oldest));
    assert!("random".parse::<SortOrder>().is_err());
}
