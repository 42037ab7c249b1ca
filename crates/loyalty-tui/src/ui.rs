use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Tabs, Wrap};

use loyalty::display::{self, IconKey, Tone};
use loyalty::views;
use loyalty::Tab;

use crate::app::{self, App, Screen};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title bar
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // main content
            Constraint::Length(3), // action bar
            Constraint::Length(6), // message log
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);

    match app.screen {
        Screen::Dashboard | Screen::Search => match app.view.tab {
            Tab::Overview => draw_overview(frame, app, chunks[2]),
            Tab::Rewards => draw_rewards(frame, app, chunks[2]),
            Tab::Challenges => draw_challenges(frame, app, chunks[2]),
            Tab::History => draw_history(frame, app, chunks[2]),
        },
        Screen::Confirm => draw_confirm(frame, app, chunks[2]),
        Screen::Result => draw_result(frame, app, chunks[2]),
    }

    draw_action_bar(frame, app, chunks[3]);
    draw_message_log(frame, app, chunks[4]);
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::Green,
        Tone::Yellow => Color::Yellow,
        Tone::Red => Color::Red,
        Tone::Blue => Color::Blue,
        Tone::Purple => Color::Magenta,
        Tone::Orange => Color::LightRed,
        Tone::Gray => Color::Gray,
    }
}

pub fn icon_glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::Target => "◎",
        IconKey::Clock => "◷",
        IconKey::Trophy => "♛",
        IconKey::Star => "★",
        IconKey::Zap => "ϟ",
        IconKey::Award => "✪",
        IconKey::Coffee => "☕",
        IconKey::Smartphone => "▯",
        IconKey::Plane => "✈",
        IconKey::Car => "◘",
        IconKey::Home => "⌂",
        IconKey::Gift => "✉",
        IconKey::Plus => "+",
        IconKey::Minus => "-",
    }
}

/// The gauge widget only draws fills in [0, 1]; the label keeps the raw value.
fn gauge(percent: f64, color: Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(app::format_percent(percent))
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let account = app.dashboard.account();
    let title = format!(
        " LoyaltyPlus Rewards Program | {} ({}) | {} Member | Current Balance: {} pts ",
        account.name,
        app::initials(&account.name),
        account.tier,
        app::format_points(account.points),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!(" {} {} ", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.view.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(5)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    draw_account_panel(frame, app, top[0]);
    draw_quick_stats(frame, app, top[1]);
    draw_achievements(frame, app, rows[1]);
}

fn draw_account_panel(frame: &mut Frame, app: &App, area: Rect) {
    let overview = app.dashboard.overview();
    let account = overview.account;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Account Status ")
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(2),
        ])
        .split(inner);

    let header = vec![
        Line::from(vec![
            Span::raw(format!("  {}", account.email)),
            Span::styled("    Member since ", Style::default().fg(Color::Gray)),
            Span::raw(account.member_since.clone()),
            Span::raw("    "),
            Span::styled(
                format!("{} Member", account.tier),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  Progress to {}", account.next_tier),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled(
                format!("{} points to go", app::format_points(account.points_to_next_tier)),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);
    frame.render_widget(gauge(overview.tier_progress, Color::Magenta), chunks[1]);

    let figures = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ♛ Available Points: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app::format_points(account.points),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("★ Current Tier: ", Style::default().fg(Color::Gray)),
            Span::styled(
                account.tier.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(figures), chunks[2]);
}

fn draw_quick_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.dashboard.overview().stats;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Quick Stats ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = vec![
        Row::new(vec![
            Cell::from("Total Earned").style(Style::default().fg(Color::Green)),
            Cell::from(format!("{} pts", app::format_points(stats.lifetime_earned))),
        ]),
        Row::new(vec![
            Cell::from("Total Redeemed").style(Style::default().fg(Color::Blue)),
            Cell::from(format!("{} pts", app::format_points(stats.lifetime_redeemed))),
        ]),
        Row::new(vec![
            Cell::from("This Month").style(Style::default().fg(Color::Magenta)),
            Cell::from(format!("{} pts", app::format_delta(stats.this_month))),
        ]),
        Row::new(vec![
            Cell::from("Streak Days").style(Style::default().fg(Color::LightRed)),
            Cell::from(format!("{} days", stats.streak_days)),
        ]),
    ];
    let widths = [Constraint::Min(16), Constraint::Length(14)];
    frame.render_widget(Table::new(rows, widths), inner);
}

fn draw_achievements(frame: &mut Frame, app: &App, area: Rect) {
    let achievements = app.dashboard.overview().achievements;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Achievements ")
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if achievements.is_empty() {
        frame.render_widget(Paragraph::new("  No achievements yet."), inner);
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for a in achievements {
        let (style, suffix) = if a.unlocked {
            (Style::default().fg(Color::Green), " (Unlocked)")
        } else {
            (Style::default().fg(Color::DarkGray), "")
        };
        spans.push(Span::styled(
            format!("{} {}{}", icon_glyph(a.icon), a.name, suffix),
            style,
        ));
        spans.push(Span::raw("   "));
    }
    let para = Paragraph::new(vec![Line::from(""), Line::from(spans)]).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

fn draw_rewards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = app
        .dashboard
        .rewards(&app.view.reward_query, app.view.reward_category);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Rewards Catalog ({}) ", cards.len()))
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    let searching = app.screen == Screen::Search;
    let query_style = if searching {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if searching { "_" } else { "" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("  Search: ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{}{}", app.view.reward_query, cursor), query_style),
        Span::raw("    "),
        Span::styled("Category: ", Style::default().fg(Color::Gray)),
        Span::raw(app.view.reward_category.label()),
    ]));
    frame.render_widget(header, chunks[0]);

    if cards.is_empty() {
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No rewards found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Try adjusting your search or category filter"),
        ]);
        frame.render_widget(text, chunks[1]);
        return;
    }

    let header = Row::new(vec!["", "", "Reward", "Category", "Points", "Status", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let selected = i == app.view.cursor;
            let marker = if selected { ">" } else { " " };
            let base = if !card.affordable {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let status = if card.affordable {
                Cell::from("Available").style(Style::default().fg(Color::Green))
            } else {
                Cell::from(format!(
                    "Need {} more points",
                    app::format_points(card.shortfall)
                ))
                .style(Style::default().fg(Color::DarkGray))
            };
            let popular = if card.reward.popular {
                Cell::from("Popular").style(Style::default().fg(Color::LightRed))
            } else {
                Cell::from("")
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(icon_glyph(card.icon)),
                Cell::from(card.reward.name.clone()),
                Cell::from(card.reward.category.label()),
                Cell::from(app::format_points(card.reward.points)),
                status,
                popular,
            ])
            .style(base)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(26),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(24),
        Constraint::Length(8),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), chunks[1]);

    if let Some(card) = cards.get(app.view.cursor) {
        let detail = Paragraph::new(Line::from(Span::styled(
            format!("  {}", card.reward.description),
            Style::default().fg(Color::Gray),
        )));
        frame.render_widget(detail, chunks[2]);
    }
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

fn draw_challenges(frame: &mut Frame, app: &App, area: Rect) {
    let book = &app.dashboard.catalog().challenges;
    let summary = app.dashboard.challenge_summary();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(book.active.len() as u16 + 3),
            Constraint::Min(4),
            Constraint::Length(book.completed.len() as u16 + 2),
        ])
        .split(area);

    let stats = Paragraph::new(Line::from(vec![
        Span::styled("  Active Challenges: ", Style::default().fg(Color::Gray)),
        Span::styled(summary.active.to_string(), Style::default().fg(Color::Blue)),
        Span::raw("    "),
        Span::styled("Completed: ", Style::default().fg(Color::Gray)),
        Span::styled(summary.completed.to_string(), Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("Points Earned: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app::format_points(summary.completed_points),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(stats, chunks[0]);

    draw_active_challenges(frame, app, chunks[1]);
    draw_available_challenges(frame, app, chunks[2]);
    draw_completed_challenges(frame, app, chunks[3]);
}

fn draw_active_challenges(frame: &mut Frame, app: &App, area: Rect) {
    let active = &app.dashboard.catalog().challenges.active;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Active Challenges ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(vec!["", "Challenge", "Difficulty", "Progress", "", "Left", "Reward"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = active
        .iter()
        .map(|c| {
            let percent = views::progress_ratio(c) * 100.0;
            let tone = tone_color(display::difficulty_tone(c.info.difficulty));
            Row::new(vec![
                Cell::from(icon_glyph(display::challenge_icon(c.info.kind))),
                Cell::from(c.info.title.clone()),
                Cell::from(c.info.difficulty.as_str()).style(Style::default().fg(tone)),
                Cell::from(format!("{}/{}", c.progress, c.target)),
                Cell::from(app::format_percent(percent)),
                Cell::from(c.time_left.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(format!("+{} pts", app::format_points(c.info.reward)))
                    .style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Min(24),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), inner);
}

fn draw_available_challenges(frame: &mut Frame, app: &App, area: Rect) {
    let available = &app.dashboard.catalog().challenges.available;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Available Challenges ({}) ", available.len()))
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if available.is_empty() {
        frame.render_widget(Paragraph::new("  No challenges to start."), inner);
        return;
    }

    let header = Row::new(vec!["", "", "Challenge", "Difficulty", "Duration", "Reward"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = available
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let selected = i == app.view.cursor;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let tone = tone_color(display::difficulty_tone(c.info.difficulty));
            Row::new(vec![
                Cell::from(marker).style(style),
                Cell::from(icon_glyph(display::challenge_icon(c.info.kind))),
                Cell::from(c.info.title.clone()).style(style),
                Cell::from(c.info.difficulty.as_str()).style(Style::default().fg(tone)),
                Cell::from(c.duration.clone()),
                Cell::from(format!("+{} pts", app::format_points(c.info.reward)))
                    .style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(24),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), inner);
}

fn draw_completed_challenges(frame: &mut Frame, app: &App, area: Rect) {
    let completed = &app.dashboard.catalog().challenges.completed;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Completed Challenges ")
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows: Vec<Row> = completed
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from("✓").style(Style::default().fg(Color::Green)),
                Cell::from(c.info.title.clone()),
                Cell::from(c.info.description.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(format!("+{} pts", app::format_points(c.info.reward)))
                    .style(Style::default().fg(Color::Green)),
                Cell::from(format!("Completed {}", app::format_date(c.completed_date)))
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Length(20),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(24),
    ];
    frame.render_widget(Table::new(rows, widths), inner);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.dashboard.ledger_summary();
    let rows_data = app
        .dashboard
        .history(app.view.history_filter, app.view.history_sort);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let cards = Paragraph::new(Line::from(vec![
        Span::styled("  + Total Earned: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app::format_points(summary.total_earned),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("- Total Redeemed: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app::format_points(summary.total_redeemed),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Total Transactions: ", Style::default().fg(Color::Gray)),
        Span::styled(
            summary.count.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(cards, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Transaction History | {} | {} ",
            app.view.history_filter.label(),
            app.view.history_sort.label(),
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if rows_data.is_empty() {
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No transactions found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Try adjusting your filter to see more transactions"),
        ]);
        frame.render_widget(text, inner);
        return;
    }

    let header = Row::new(vec!["", "", "Date", "Description", "Category", "Points"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if i == app.view.cursor { ">" } else { " " };
            let tx = row.transaction;
            let color = tone_color(row.tone);
            Row::new(vec![
                Cell::from(marker),
                Cell::from(icon_glyph(row.icon)).style(Style::default().fg(color)),
                Cell::from(app::format_date(tx.date)).style(Style::default().fg(Color::Gray)),
                Cell::from(tx.description.clone()),
                Cell::from(row.badge.label.clone())
                    .style(Style::default().fg(tone_color(row.badge.tone))),
                Cell::from(format!("{} pts", app::format_delta(tx.points)))
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(13),
        Constraint::Min(30),
        Constraint::Length(11),
        Constraint::Length(12),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), inner);
}

// ---------------------------------------------------------------------------
// Confirm / result
// ---------------------------------------------------------------------------

fn draw_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .pending_action
        .as_ref()
        .map(|a| format!(" {} ", a.title))
        .unwrap_or_else(|| " Confirm ".into());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![Line::from("")];

    if let Some(action) = &app.pending_action {
        for desc_line in &action.description {
            lines.push(Line::from(format!("  {}", desc_line)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press [Y] to confirm, [N] or [Esc] to cancel",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let para = Paragraph::new(Text::from(lines));
    frame.render_widget(para, inner);
}

fn draw_result(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirmed ")
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = app
        .last_ack
        .as_ref()
        .map(|ack| ack.message().to_string())
        .unwrap_or_default();
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Your balance is unchanged until the ledger confirms the request.",
            Style::default().fg(Color::Gray),
        )),
    ]);
    frame.render_widget(text, inner);
}

// ---------------------------------------------------------------------------
// Action bar / log
// ---------------------------------------------------------------------------

fn draw_action_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Actions ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match app.screen {
        Screen::Search => Line::from(vec![
            action_key("[Enter]"), action_label("Done  "),
            action_key("[Esc]"), action_label("Clear  "),
            action_key("[Backspace]"), action_label("Delete"),
        ]),
        Screen::Confirm => Line::from(vec![
            action_key("[Y]"), action_label("Confirm  "),
            action_key("[N]"), action_label("Cancel"),
        ]),
        Screen::Result => Line::from(vec![action_label("Press any key to continue")]),
        Screen::Dashboard => {
            let mut spans = match app.view.tab {
                Tab::Overview => vec![],
                Tab::Rewards => vec![
                    action_key("[/]"), action_label("search  "),
                    action_key("[c]"), action_label("ategory  "),
                    action_key("[r]"), action_label("edeem  "),
                ],
                Tab::Challenges => vec![
                    action_key("[s]"), action_label("tart challenge  "),
                ],
                Tab::History => vec![
                    action_key("[f]"), action_label("ilter  "),
                    action_key("[s]"), action_label("ort  "),
                ],
            };
            spans.extend([
                action_key("[Tab]"), action_label("Next tab  "),
                action_key("[1-4]"), action_label("Jump  "),
                action_key("[q]"), action_label("uit"),
            ]);
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), inner);
}

fn action_key(key: &str) -> Span<'_> {
    Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

fn action_label(label: &str) -> Span<'_> {
    Span::styled(label, Style::default().fg(Color::White))
}

fn draw_message_log(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Log ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .message_log
        .iter()
        .map(|m| Line::from(format!(" > {}", m)))
        .collect();

    // Count how many visual rows the wrapped text will occupy.
    let width = inner.width as usize;
    let total_rows: usize = lines
        .iter()
        .map(|line| {
            let len = line.width();
            if width == 0 { 1 } else { 1_usize.max(len.div_ceil(width)) }
        })
        .sum();

    let visible = inner.height;
    let scroll = (total_rows as u16).saturating_sub(visible);

    let para = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use loyalty::catalog::seed;
    use loyalty::{Dashboard, DashboardConfig};
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(Dashboard::new(seed(), DashboardConfig::default()))
    }

    #[test]
    fn overview_shows_account_and_progress() {
        let screen = render(&app());
        assert!(screen.contains("LoyaltyPlus"));
        assert!(screen.contains("12,350"));
        assert!(screen.contains("sarah.johnson@email.com"));
        assert!(screen.contains("Progress to Platinum"));
        assert!(screen.contains("2,650 points to go"));
        assert!(screen.contains("82%"));
        assert!(screen.contains("Challenge Master"));
    }

    #[test]
    fn rewards_tab_renders_cards_and_empty_state() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        let screen = render(&app);
        assert!(screen.contains("Wireless Earbuds"));
        assert!(screen.contains("Available"));

        app.view.reward_query = "yacht".into();
        let screen = render(&app);
        assert!(screen.contains("No rewards found"));
    }

    #[test]
    fn history_summary_ignores_filter() {
        let mut app = app();
        app.handle_key(KeyCode::Char('4'));
        app.handle_key(KeyCode::Char('f'));
        let screen = render(&app);
        assert!(screen.contains("Points Earned"));
        assert!(screen.contains("Total Earned: 3,200"));
        assert!(screen.contains("Total Redeemed: 2,500"));
        assert!(!screen.contains("Free Car Wash Service"));
    }

    #[test]
    fn overshooting_challenge_renders_raw_percent() {
        let mut catalog = seed();
        catalog.challenges.active[0].progress = 7;
        let mut app = App::new(Dashboard::new(catalog, DashboardConfig::default()));
        app.handle_key(KeyCode::Char('3'));
        let screen = render(&app);
        assert!(screen.contains("7/5"));
        assert!(screen.contains("140%"));
    }

    #[test]
    fn unknown_mappings_fall_back() {
        assert_eq!(tone_color(Tone::Gray), Color::Gray);
        let icon = display::challenge_icon(loyalty::state::ChallengeKind::Other);
        assert_eq!(icon_glyph(icon), "◎");
    }
}
