use {
    crate::filter::{filter_leaderboard, filter_transactions, FilterState},
    crate::format,
    crate::persistence::Theme,
    crate::store::DataStore,
    crate::ui::terminal::Focus,
    crate::ui::theme::{palette, Palette},
    crate::views::{self, ChartSlot, LeaderboardMetric, LeaderboardRow, RankBadge},
    chrono::Utc,
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table},
        Frame,
    },
};

/// Per-frame render context owned by the UI loop.
pub struct RenderCtx<'a> {
    pub theme: Theme,
    pub focus: Focus,
    pub refreshing: bool,
    pub wealth_chart: &'a ChartSlot,
    pub levels_chart: &'a ChartSlot,
}

/// Render the full dashboard. Every frame rebuilds each widget from the
/// current snapshot and filter state, so a redraw is a full replace.
pub fn render_layout(
    f: &mut Frame,
    area: Rect,
    store: &DataStore,
    filters: &FilterState,
    ctx: &RenderCtx,
) {
    let pal = palette(ctx.theme);

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // header with overview totals
            Constraint::Length(1),  // filter inputs
            Constraint::Min(8),     // leaderboards
            Constraint::Length(14), // transaction feed + charts
            Constraint::Length(3),  // footer
        ])
        .split(area);

    render_header(f, chunks[0], store, ctx, &pal);
    render_filter_bar(f, chunks[1], filters, ctx, &pal);
    render_leaderboards(f, chunks[2], store, filters, &pal);
    render_lower(f, chunks[3], store, filters, ctx, &pal);
    render_footer(f, chunks[4], ctx, &pal);
}

fn render_header(f: &mut Frame, area: Rect, store: &DataStore, ctx: &RenderCtx, pal: &Palette) {
    let overview_line = match store.overview() {
        Some(o) => {
            let stat = |label: &'static str, value: f64| {
                vec![
                    Span::styled(label, Style::default().fg(pal.dim)),
                    Span::styled(format::format_number(value), Style::default().fg(pal.text)),
                    Span::raw("  "),
                ]
            };
            let mut spans = Vec::new();
            spans.extend(stat("Users: ", o.total_users as f64));
            spans.extend(stat("Balance: ", o.total_balance));
            spans.extend(stat("Bank: ", o.total_bank_balance));
            spans.extend(stat("Businesses: ", o.total_businesses as f64));
            spans.extend(stat("Games: ", o.total_games_played as f64));
            spans.extend(stat("Duels: ", o.total_duels as f64));
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Waiting for first snapshot...",
            Style::default().fg(pal.dim),
        )),
    };

    let last_updated = store
        .last_updated()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let mut status = vec![
        Span::styled("Last updated: ", Style::default().fg(pal.dim)),
        Span::styled(last_updated, Style::default().fg(pal.text)),
    ];
    if ctx.refreshing {
        status.push(Span::styled(
            "  (refreshing...)",
            Style::default().fg(pal.accent),
        ));
    }

    let header = Block::default()
        .borders(Borders::ALL)
        .title("Game Economy Dashboard");
    f.render_widget(
        Paragraph::new(vec![overview_line, Line::from(status)]).block(header),
        area,
    );
}

fn render_filter_bar(
    f: &mut Frame,
    area: Rect,
    filters: &FilterState,
    ctx: &RenderCtx,
    pal: &Palette,
) {
    let label_style = |focused: bool| {
        if focused {
            Style::default().fg(pal.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.dim)
        }
    };
    let shown = |query: &str| {
        if query.is_empty() {
            "_".to_string()
        } else {
            query.to_string()
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " Leaderboard search: ",
            label_style(ctx.focus == Focus::LeaderboardSearch),
        ),
        Span::styled(shown(&filters.leaderboard_query), Style::default().fg(pal.text)),
        Span::raw("   "),
        Span::styled(
            "Transaction search: ",
            label_style(ctx.focus == Focus::TransactionSearch),
        ),
        Span::styled(shown(&filters.transaction_query), Style::default().fg(pal.text)),
        Span::raw("   "),
        Span::styled("Type: ", label_style(ctx.focus == Focus::TypeFilter)),
        Span::styled(filters.type_filter.label(), Style::default().fg(pal.accent)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn render_leaderboards(
    f: &mut Frame,
    area: Rect,
    store: &DataStore,
    filters: &FilterState,
    pal: &Palette,
) {
    let cols = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let query = &filters.leaderboard_query;

    let rich = filter_leaderboard(store.top_rich(), query);
    render_board(
        f,
        cols[0],
        "Top Rich",
        store.top_rich().len(),
        views::build_leaderboard(&rich, LeaderboardMetric::Balance),
        pal,
    );

    let levels = filter_leaderboard(store.top_levels(), query);
    render_board(
        f,
        cols[1],
        "Top Levels",
        store.top_levels().len(),
        views::build_leaderboard(&levels, LeaderboardMetric::Level),
        pal,
    );

    let pvp = filter_leaderboard(store.top_pvp(), query);
    render_board(
        f,
        cols[2],
        "Top PvP",
        store.top_pvp().len(),
        views::build_pvp(&pvp),
        pal,
    );
}

fn badge_color(badge: RankBadge, pal: &Palette) -> ratatui::style::Color {
    match badge {
        RankBadge::Gold => pal.gold,
        RankBadge::Silver => pal.silver,
        RankBadge::Bronze => pal.bronze,
        RankBadge::Plain => pal.dim,
    }
}

fn render_board(
    f: &mut Frame,
    area: Rect,
    title: &'static str,
    source_len: usize,
    rows: Vec<LeaderboardRow>,
    pal: &Palette,
) {
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(state) = views::empty_state(source_len, rows.len()) {
        let msg = views::leaderboard_empty_text(state);
        f.render_widget(
            Paragraph::new(msg).style(Style::default().fg(pal.dim)).block(block),
            area,
        );
        return;
    }

    let table_rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(
                    format!("#{}", row.rank),
                    Style::default()
                        .fg(badge_color(row.badge, pal))
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(row.user, Style::default().fg(pal.text))),
                Cell::from(Span::styled(row.detail, Style::default().fg(pal.dim))),
                Cell::from(Span::styled(row.value, Style::default().fg(pal.accent))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(17),
        Constraint::Min(12),
        Constraint::Length(12),
    ];

    f.render_widget(Table::new(table_rows, widths).block(block), area);
}

fn render_lower(
    f: &mut Frame,
    area: Rect,
    store: &DataStore,
    filters: &FilterState,
    ctx: &RenderCtx,
    pal: &Palette,
) {
    let cols = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_transactions(f, cols[0], store, filters, pal);
    render_chart(f, cols[1], ctx.wealth_chart, pal);
    render_chart(f, cols[2], ctx.levels_chart, pal);
}

fn render_transactions(
    f: &mut Frame,
    area: Rect,
    store: &DataStore,
    filters: &FilterState,
    pal: &Palette,
) {
    let filtered = filter_transactions(store.transactions(), filters);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Transactions [{}]", filters.type_filter.label()));

    if let Some(state) = views::empty_state(store.transactions().len(), filtered.len()) {
        let msg = views::transactions_empty_text(state);
        f.render_widget(
            Paragraph::new(msg).style(Style::default().fg(pal.dim)).block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec!["Event", "User", "When", "Amount"])
        .style(Style::default().fg(pal.accent).add_modifier(Modifier::BOLD));

    let table_rows: Vec<Row> = views::build_transactions(&filtered, Utc::now())
        .into_iter()
        .map(|row| {
            let amount_color = if row.positive { pal.positive } else { pal.negative };
            Row::new(vec![
                Cell::from(Span::styled(
                    format!("{} {}", row.icon, row.details),
                    Style::default().fg(pal.text),
                )),
                Cell::from(Span::styled(row.user, Style::default().fg(pal.dim))),
                Cell::from(Span::styled(row.time, Style::default().fg(pal.dim))),
                Cell::from(Span::styled(row.amount, Style::default().fg(amount_color))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(17),
        Constraint::Length(16),
        Constraint::Length(14),
    ];

    f.render_widget(
        Table::new(table_rows, widths).header(header).block(block),
        area,
    );
}

fn render_chart(f: &mut Frame, area: Rect, slot: &ChartSlot, pal: &Palette) {
    match slot.current() {
        Some(model) => {
            let data: Vec<(&str, u64)> = model.buckets.clone();
            let chart = BarChart::default()
                .block(Block::default().borders(Borders::ALL).title(model.title))
                .bar_width(8)
                .bar_gap(1)
                .bar_style(Style::default().fg(pal.accent))
                .value_style(Style::default().fg(pal.text).add_modifier(Modifier::BOLD))
                .label_style(Style::default().fg(pal.dim))
                .data(&data);
            f.render_widget(chart, area);
        }
        None => {
            let block = Block::default().borders(Borders::ALL).title("Distribution");
            f.render_widget(
                Paragraph::new("No data").style(Style::default().fg(pal.dim)).block(block),
                area,
            );
        }
    }
}

fn render_footer(f: &mut Frame, area: Rect, ctx: &RenderCtx, pal: &Palette) {
    let refresh_hint = if ctx.refreshing {
        Span::styled("r refresh (busy)", Style::default().fg(pal.dim))
    } else {
        Span::styled("r refresh", Style::default().fg(pal.accent))
    };

    let line = Line::from(vec![
        Span::styled("Status: ", Style::default().fg(pal.dim)),
        Span::styled(
            if ctx.refreshing { "refreshing" } else { "idle" },
            Style::default().fg(if ctx.refreshing { pal.accent } else { pal.positive }),
        ),
        Span::raw(" | Tab focus | type to search | Left/Right change type | "),
        refresh_hint,
        Span::raw(format!(" | t theme ({}) | q quit", ctx.theme.as_str())),
    ]);

    let footer = Block::default().borders(Borders::ALL).title("Controls");
    f.render_widget(Paragraph::new(line).block(footer), area);
}
