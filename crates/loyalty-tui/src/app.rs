use std::io;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::info;

use loyalty::{Acknowledgement, ActionOutcome, Dashboard, Tab, ViewState};

use crate::ui;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Search,
    Confirm,
    Result,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Redeem(u32),
    StartChallenge(u32),
}

pub struct PendingAction {
    pub title: String,
    pub description: Vec<String>,
    pub intent: Intent,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub dashboard: Dashboard,
    pub view: ViewState,
    pub should_quit: bool,
    pub screen: Screen,
    pub message_log: Vec<String>,

    // Confirm state
    pub pending_action: Option<PendingAction>,

    // Result screen state
    pub last_ack: Option<Acknowledgement>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let mut app = Self {
            dashboard,
            view: ViewState::default(),
            should_quit: false,
            screen: Screen::Dashboard,
            message_log: Vec::new(),
            pending_action: None,
            last_ack: None,
        };
        let name = app.dashboard.account().name.clone();
        app.push_log(format!("Welcome back, {}!", name));
        app.push_log("Manage your rewards and discover new ways to earn points");
        app
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        info!(target: "loyalty_tui::log", "{}", msg);
        self.message_log.push(msg);
        if self.message_log.len() > 100 {
            self.message_log.remove(0);
        }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    self.should_quit = true;
                    continue;
                }
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Dashboard => self.handle_dashboard(key),
            Screen::Search => self.handle_search(key),
            Screen::Confirm => self.handle_confirm(key),
            Screen::Result => self.handle_result(key),
        }
    }

    // -----------------------------------------------------------------------
    // Dashboard handler
    // -----------------------------------------------------------------------

    fn handle_dashboard(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,

            // Tab navigation
            KeyCode::Tab | KeyCode::Right => self.view.select_tab(self.view.tab.next()),
            KeyCode::BackTab | KeyCode::Left => self.view.select_tab(self.view.tab.prev()),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.view.select_tab(Tab::ALL[idx]);
            }

            // Row cursor
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.cursor = self.view.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.list_len();
                if len > 0 && self.view.cursor < len - 1 {
                    self.view.cursor += 1;
                }
            }

            // Rewards
            KeyCode::Char('/') if self.view.tab == Tab::Rewards => {
                self.screen = Screen::Search;
            }
            KeyCode::Char('c') if self.view.tab == Tab::Rewards => {
                self.view.cycle_reward_category();
                let label = self.view.reward_category.label();
                self.push_log(format!("Category: {}", label));
            }
            KeyCode::Enter | KeyCode::Char('r') if self.view.tab == Tab::Rewards => {
                self.enter_redeem()
            }

            // Challenges
            KeyCode::Enter | KeyCode::Char('s') if self.view.tab == Tab::Challenges => {
                self.enter_start_challenge()
            }

            // History
            KeyCode::Char('f') if self.view.tab == Tab::History => {
                self.view.cycle_history_filter();
                let label = self.view.history_filter.label();
                self.push_log(format!("Filter: {}", label));
            }
            KeyCode::Char('s') if self.view.tab == Tab::History => {
                self.view.toggle_history_sort();
                let label = self.view.history_sort.label();
                self.push_log(format!("Sort: {}", label));
            }
            _ => {}
        }
    }

    /// Rows the cursor can move over on the current tab.
    pub fn list_len(&self) -> usize {
        match self.view.tab {
            Tab::Overview => 0,
            Tab::Rewards => self
                .dashboard
                .rewards(&self.view.reward_query, self.view.reward_category)
                .len(),
            Tab::Challenges => self.dashboard.catalog().challenges.available.len(),
            Tab::History => self
                .dashboard
                .history(self.view.history_filter, self.view.history_sort)
                .len(),
        }
    }

    // -----------------------------------------------------------------------
    // Search handler
    // -----------------------------------------------------------------------

    fn handle_search(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.view.reward_query.clear();
                self.view.cursor = 0;
                self.screen = Screen::Dashboard;
            }
            KeyCode::Enter => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Backspace => {
                self.view.reward_query.pop();
                self.view.cursor = 0;
            }
            KeyCode::Char(c) => {
                self.view.reward_query.push(c);
                self.view.cursor = 0;
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Confirm handler
    // -----------------------------------------------------------------------

    fn handle_confirm(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(action) = self.pending_action.take() {
                    let outcome = match action.intent {
                        Intent::Redeem(id) => self.dashboard.redeem(id),
                        Intent::StartChallenge(id) => self.dashboard.start_challenge(id),
                    };
                    match outcome {
                        ActionOutcome::Acknowledged(ack) => {
                            self.push_log(ack.message().to_string());
                            self.last_ack = Some(ack);
                            self.screen = Screen::Result;
                        }
                        ActionOutcome::Rejected(rejection) => {
                            self.push_log(rejection.to_string());
                            self.screen = Screen::Dashboard;
                        }
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_action = None;
                self.screen = Screen::Dashboard;
                self.push_log("Action cancelled.");
            }
            _ => {}
        }
    }

    fn handle_result(&mut self, _key: KeyCode) {
        self.last_ack = None;
        self.screen = Screen::Dashboard;
    }

    // -----------------------------------------------------------------------
    // Action entry points
    // -----------------------------------------------------------------------

    fn enter_redeem(&mut self) {
        let balance = self.dashboard.account().points;
        let prepared = {
            let cards = self
                .dashboard
                .rewards(&self.view.reward_query, self.view.reward_category);
            let Some(card) = cards.get(self.view.cursor) else {
                return;
            };
            if card.affordable {
                Ok(PendingAction {
                    title: format!("Redeem {}?", card.reward.name),
                    description: vec![
                        card.reward.description.clone(),
                        format!("Cost: {} points", format_points(card.reward.points)),
                        format!("Balance: {} points", format_points(balance)),
                    ],
                    intent: Intent::Redeem(card.reward.id),
                })
            } else {
                // Disabled action: never invoke the stub.
                Err(format!(
                    "Need {} more points for {}",
                    format_points(card.shortfall),
                    card.reward.name
                ))
            }
        };
        match prepared {
            Ok(action) => self.goto_confirm(action),
            Err(msg) => self.push_log(msg),
        }
    }

    fn enter_start_challenge(&mut self) {
        let available = &self.dashboard.catalog().challenges.available;
        let Some(challenge) = available.get(self.view.cursor) else {
            return;
        };
        let action = PendingAction {
            title: format!("Start {}?", challenge.info.title),
            description: vec![
                challenge.info.description.clone(),
                format!("Reward: +{} points", format_points(challenge.info.reward)),
                format!("Duration: {}", challenge.duration),
            ],
            intent: Intent::StartChallenge(challenge.info.id),
        };
        self.goto_confirm(action);
    }

    fn goto_confirm(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
        self.screen = Screen::Confirm;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Group digits by thousands: 12350 -> "12,350".
pub fn format_points(points: u64) -> String {
    let digits = points.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed points with a leading `+` on gains.
pub fn format_delta(points: i64) -> String {
    if points >= 0 {
        format!("+{}", format_points(points.unsigned_abs()))
    } else {
        format!("-{}", format_points(points.unsigned_abs()))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Percent with no decimals, left unclamped.
pub fn format_percent(percent: f64) -> String {
    format!("{:.0}%", percent)
}

/// First letter of each word of the name: "Sarah Johnson" -> "SJ".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loyalty::catalog::seed;
    use loyalty::state::{CategoryFilter, SortOrder};
    use loyalty::DashboardConfig;

    fn app() -> App {
        App::new(Dashboard::new(seed(), DashboardConfig::default()))
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key);
        }
    }

    #[test]
    fn helpers_format_like_the_dashboard() {
        assert_eq!(format_points(12_350), "12,350");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(1_000_000), "1,000,000");
        assert_eq!(format_delta(125), "+125");
        assert_eq!(format_delta(-1_500), "-1,500");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            "Jan 10, 2024"
        );
        assert_eq!(format_percent(82.4), "82%");
        assert_eq!(format_percent(-100.0), "-100%");
        assert_eq!(initials("Sarah Johnson"), "SJ");
    }

    #[test]
    fn number_keys_and_tab_switch_tabs() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.view.tab, Tab::Challenges);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.view.tab, Tab::History);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.view.tab, Tab::Overview);
        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.view.tab, Tab::History);
    }

    #[test]
    fn search_narrows_rewards_and_resets_on_leave() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('/')]);
        assert_eq!(app.screen, Screen::Search);
        press(
            &mut app,
            &[KeyCode::Char('C'), KeyCode::Char('a'), KeyCode::Char('r'), KeyCode::Enter],
        );
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.view.reward_query, "Car");
        assert_eq!(app.list_len(), 1);

        press(&mut app, &[KeyCode::Char('1')]);
        assert!(app.view.reward_query.is_empty());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2')]);
        for _ in 0..20 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.view.cursor, 5);
        for _ in 0..20 {
            app.handle_key(KeyCode::Up);
        }
        assert_eq!(app.view.cursor, 0);
    }

    #[test]
    fn redeem_goes_through_confirm_and_result() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Confirm);
        assert_eq!(
            app.pending_action.as_ref().map(|a| a.intent),
            Some(Intent::Redeem(1))
        );

        press(&mut app, &[KeyCode::Char('y')]);
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(
            app.message_log.last().map(String::as_str),
            Some("Redeeming $10 Coffee Shop Voucher for 1000 points!")
        );
        assert_eq!(app.dashboard.account().points, 12_350);

        press(&mut app, &[KeyCode::Char(' ')]);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.last_ack.is_none());
    }

    #[test]
    fn unaffordable_reward_never_reaches_confirm() {
        let mut catalog = seed();
        catalog.account.points = 8_000;
        catalog.account.tier = "Silver".into();
        catalog.account.next_tier = "Gold".into();
        catalog.account.points_to_next_tier = 2_000;
        let mut app = App::new(Dashboard::new(catalog, DashboardConfig::default()));

        // Wireless Earbuds (8,500) is the second card.
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.pending_action.is_none());
        assert_eq!(
            app.message_log.last().map(String::as_str),
            Some("Need 500 more points for Wireless Earbuds")
        );
    }

    #[test]
    fn cancel_confirm() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.pending_action.is_none());
        assert_eq!(app.message_log.last().map(String::as_str), Some("Action cancelled."));
    }

    #[test]
    fn start_challenge_acknowledges() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Down, KeyCode::Enter]);
        assert_eq!(
            app.pending_action.as_ref().map(|a| a.intent),
            Some(Intent::StartChallenge(5))
        );
        press(&mut app, &[KeyCode::Char('Y')]);
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(
            app.message_log.last().map(String::as_str),
            Some("Starting challenge: Early Bird")
        );
    }

    #[test]
    fn history_keys_cycle_filter_and_sort() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('4'), KeyCode::Char('f')]);
        assert_eq!(app.list_len(), 6);
        press(&mut app, &[KeyCode::Char('s')]);
        assert_eq!(app.view.history_sort, SortOrder::Oldest);
        press(&mut app, &[KeyCode::Char('c')]);
        assert_eq!(app.view.reward_category, CategoryFilter::All);
    }

    #[test]
    fn q_quits_only_from_dashboard() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('/'), KeyCode::Char('q')]);
        assert!(!app.should_quit);
        assert_eq!(app.view.reward_query, "q");
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]);
        assert!(app.should_quit);
    }
}
