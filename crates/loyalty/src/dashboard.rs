use std::num::NonZeroU64;

use serde::Serialize;

use crate::actions::{self, ActionOutcome};
use crate::catalog::{Catalog, CatalogSource};
use crate::errors::{CatalogError, ConfigError};
use crate::state::{
    AccountStats, Achievement, CategoryFilter, SortOrder, TransactionFilter, UserAccount,
    DEFAULT_TIER_SPAN,
};
use crate::views::{self, ChallengeSummary, LedgerRow, LedgerSummary, RewardCard};

const DEFAULT_SPAN: NonZeroU64 = match NonZeroU64::new(DEFAULT_TIER_SPAN) {
    Some(span) => span,
    None => NonZeroU64::MIN,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    tier_span: NonZeroU64,
}

impl DashboardConfig {
    /// `tier_span` is the number of points between two tier boundaries.
    pub fn new(tier_span: u64) -> Result<Self, ConfigError> {
        let tier_span = NonZeroU64::new(tier_span).ok_or(ConfigError::ZeroTierSpan)?;
        Ok(Self { tier_span })
    }

    pub fn tier_span(&self) -> u64 {
        self.tier_span.get()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tier_span: DEFAULT_SPAN,
        }
    }
}

/// Session scope: owns the loaded catalog and hands out derived views.
pub struct Dashboard {
    catalog: Catalog,
    config: DashboardConfig,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview<'a> {
    pub account: &'a UserAccount,
    pub tier_progress: f64,
    pub tier_span: u64,
    pub stats: &'a AccountStats,
    pub achievements: &'a [Achievement],
}

impl Dashboard {
    pub fn new(catalog: Catalog, config: DashboardConfig) -> Self {
        Self { catalog, config }
    }

    pub fn load(source: &dyn CatalogSource, config: DashboardConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(source.load()?, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn account(&self) -> &UserAccount {
        &self.catalog.account
    }

    pub fn tier_progress(&self) -> f64 {
        views::tier_progress(
            self.catalog.account.points_to_next_tier,
            self.config.tier_span(),
        )
    }

    pub fn overview(&self) -> Overview<'_> {
        Overview {
            account: &self.catalog.account,
            tier_progress: self.tier_progress(),
            tier_span: self.config.tier_span(),
            stats: &self.catalog.stats,
            achievements: &self.catalog.achievements,
        }
    }

    pub fn rewards(&self, query: &str, category: CategoryFilter) -> Vec<RewardCard<'_>> {
        views::reward_cards(
            &self.catalog.rewards,
            query,
            category,
            self.catalog.account.points,
        )
    }

    pub fn history(&self, filter: TransactionFilter, order: SortOrder) -> Vec<LedgerRow<'_>> {
        views::ledger_rows(&self.catalog.transactions, filter, order)
    }

    pub fn ledger_summary(&self) -> LedgerSummary {
        views::ledger_summary(&self.catalog.transactions)
    }

    pub fn challenge_summary(&self) -> ChallengeSummary {
        views::challenge_summary(&self.catalog.challenges)
    }

    pub fn redeem(&self, reward_id: u32) -> ActionOutcome {
        actions::redeem_by_id(&self.catalog, reward_id)
    }

    pub fn start_challenge(&self, challenge_id: u32) -> ActionOutcome {
        actions::start_challenge_by_id(&self.catalog, challenge_id)
    }
}

// ---------------------------------------------------------------------------
// UI-local selection state
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Rewards,
    Challenges,
    History,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Rewards, Tab::Challenges, Tab::History];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Rewards => "Rewards",
            Tab::Challenges => "Challenges",
            Tab::History => "History",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Selection state of one interactive session. Leaving a tab resets that
/// tab's search, filter and sort to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub reward_query: String,
    pub reward_category: CategoryFilter,
    pub history_filter: TransactionFilter,
    pub history_sort: SortOrder,
    /// Row cursor inside the current tab.
    pub cursor: usize,
}

impl ViewState {
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        self.reset_tab(self.tab);
        self.tab = tab;
        self.cursor = 0;
    }

    fn reset_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Rewards => {
                self.reward_query.clear();
                self.reward_category = CategoryFilter::All;
            }
            Tab::History => {
                self.history_filter = TransactionFilter::All;
                self.history_sort = SortOrder::Newest;
            }
            Tab::Overview | Tab::Challenges => {}
        }
    }

    /// Advance the reward category through the menu, wrapping around.
    pub fn cycle_reward_category(&mut self) {
        let options = CategoryFilter::options();
        let at = options
            .iter()
            .position(|c| *c == self.reward_category)
            .unwrap_or(0);
        self.reward_category = options[(at + 1) % options.len()];
        self.cursor = 0;
    }

    /// Advance the history filter through the menu, wrapping around. A
    /// selector outside the menu restarts at the first entry.
    pub fn cycle_history_filter(&mut self) {
        let menu = TransactionFilter::MENU;
        self.history_filter = match menu.iter().position(|f| *f == self.history_filter) {
            Some(at) => menu[(at + 1) % menu.len()],
            None => menu[0],
        };
        self.cursor = 0;
    }

    pub fn toggle_history_sort(&mut self) {
        self.history_sort = self.history_sort.toggled();
        self.cursor = 0;
    }
}
