// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, Tabs, Gauge, Table...)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::models::{Metric, SentimentKind, TimeRange};
use crate::refresh::RefreshStatus;
use crate::ui::{candlestick_text, chart, status_log};

/// Couleur des bordures et titres
pub(crate) const ACCENT: Color = Color::Cyan;
/// Hausse / sentiment positif
pub(crate) const POSITIVE: Color = Color::Rgb(52, 208, 88);
/// Baisse / sentiment négatif
pub(crate) const NEGATIVE: Color = Color::Rgb(234, 74, 90);

/// Couleur associée à une tonalité
pub(crate) fn sentiment_color(kind: SentimentKind) -> Color {
    match kind {
        SentimentKind::Positive => POSITIVE,
        SentimentKind::Negative => NEGATIVE,
        SentimentKind::Neutral => Color::Gray,
    }
}

/// Couleur d'une variation
pub(crate) fn change_color(change: f64) -> Color {
    if change >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

/// Block avec bordures et titre, style commun à toutes les cartes
pub(crate) fn card(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", title))
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le corps de l'écran dépend de app.current_view
/// - Header, barre de contrôle et footer sont communs
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Barre de contrôle
            Constraint::Min(0),    // Contenu
            Constraint::Length(4), // Footer
        ])
        .split(frame.size());

    render_header(frame, app, chunks[0]);
    render_control_bar(frame, app, chunks[1]);

    match app.current_view {
        View::Overview => render_overview(frame, app, chunks[2]),
        View::Charts => render_charts(frame, app, chunks[2]),
        View::History => render_history(frame, app, chunks[2]),
    }

    render_footer(frame, app, chunks[3]);
}

// ============================================================================
// Header : titre + onglets
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all().iter().map(|v| Line::from(v.title())).collect();
    let selected = View::all()
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" 📈 Rife-Trade · Real-time market intelligence platform ")
                .title_alignment(Alignment::Center),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

// ============================================================================
// Barre de contrôle : marché, ticker, plage, dernière mise à jour
// ============================================================================

fn render_control_bar(frame: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let refresh_state = app.refresh_state();
    let auto = match app.refresh.status() {
        RefreshStatus::Running => Span::styled("● auto", Style::default().fg(POSITIVE)),
        RefreshStatus::Idle => Span::styled("○ paused", Style::default().fg(Color::DarkGray)),
    };

    let mut spans = vec![
        Span::styled("Market: ", label),
        Span::styled(app.market.label(), value),
        Span::raw("   "),
        Span::styled("Ticker: ", label),
        Span::styled(app.ticker(), value),
        Span::raw("   "),
        Span::styled("Range: ", label),
    ];
    spans.extend(range_spans(app.time_range));
    spans.extend([
        Span::raw("   "),
        Span::styled("Last updated: ", label),
        Span::styled(refresh_state.last_update_display(), value),
        Span::raw("  "),
        auto,
    ]);

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Sélecteur de plage "1W [1M] 1Y 5Y 10Y"
fn range_spans(selected: TimeRange) -> Vec<Span<'static>> {
    TimeRange::all()
        .into_iter()
        .map(|range| {
            if range == selected {
                Span::styled(
                    format!("[{}] ", range.label()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!("{} ", range.label()), Style::default().fg(Color::DarkGray))
            }
        })
        .collect()
}

// ============================================================================
// Vue Overview
// ============================================================================

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Métriques
            Constraint::Length(10), // Cotation + sentiment | titres
            Constraint::Min(12),    // Journal (10 entrées + bordures)
        ])
        .split(area);

    render_metrics(frame, app, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(middle[0]);

    render_price_card(frame, app, left[0]);
    render_sentiment_card(frame, app, left[1]);
    render_headlines(frame, app, middle[1]);

    status_log::render_status_log(frame, &app.refresh_state(), rows[2]);
}

/// Rangée de 6 métriques (Price, Volume, Market Cap, 52W High/Low, P/E)
fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let metrics = &app.snapshot.metrics;
    if metrics.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = metrics
        .iter()
        .map(|_| Constraint::Ratio(1, metrics.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (metric, cell) in metrics.iter().zip(cells.iter()) {
        render_metric(frame, metric, app.market.currency(), *cell);
    }
}

fn render_metric(frame: &mut Frame, metric: &Metric, currency: &str, area: Rect) {
    // Les prix sont préfixés par la devise du marché
    let value = if metric.label == "Price" || metric.label.starts_with("52W") {
        format!("{}{}", currency, metric.value_display())
    } else {
        metric.value_display()
    };

    let mut line = vec![Span::styled(
        value,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(change) = metric.change {
        line.push(Span::raw(" "));
        line.push(Span::styled(
            metric.change_display(),
            Style::default().fg(change_color(change)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(line))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    metric.label.to_uppercase(),
                    Style::default().fg(Color::Gray),
                )),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Carte "Ticker & Latest Price"
fn render_price_card(frame: &mut Frame, app: &App, area: Rect) {
    let quote = &app.snapshot.quote;
    let color = change_color(quote.change);

    let text = vec![
        Line::from(Span::styled(
            quote.ticker.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{}{:.2}", app.market.currency(), quote.price),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(quote.change_display(), Style::default().fg(color)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(card("Ticker & Latest Price"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Carte "Overall Sentiment" : jauge du score
fn render_sentiment_card(frame: &mut Frame, app: &App, area: Rect) {
    let sentiment = app.snapshot.sentiment;
    let color = sentiment_color(sentiment.kind);

    let gauge = Gauge::default()
        .block(card("Overall Sentiment"))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(sentiment.score_percent())
        .label(format!(
            "{} {} · score {:.2}",
            sentiment.kind.arrow(),
            sentiment.kind.label(),
            sentiment.score
        ));
    frame.render_widget(gauge, area);
}

/// Carte "Top Headlines"
fn render_headlines(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for headline in &app.snapshot.headlines {
        let color = sentiment_color(headline.sentiment);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", headline.sentiment.arrow()),
                Style::default().fg(color),
            ),
            Span::styled(headline.title.clone(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "   {} · confidence {}",
                headline.sentiment.label(),
                headline.confidence_display()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(card("Top Headlines"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Vue Charts : grille 2×2
// ============================================================================

fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    chart::render_price_chart(frame, app, top[0]);
    chart::render_sentiment_distribution(frame, app, top[1]);
    candlestick_text::render_candlestick_chart(frame, app, bottom[0]);
    chart::render_volume_chart(frame, app, bottom[1]);
}

// ============================================================================
// Vue History : tableau des prix
// ============================================================================

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let currency = app.market.currency();
    let header = Row::new(vec!["Date", "Price", "Change", "Change %"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .snapshot
        .price_history
        .iter()
        .rev() // Plus récent en haut
        .map(|row| {
            let color = if row.is_positive() { POSITIVE } else { NEGATIVE };
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(format!("{}{:.2}", currency, row.price)),
                Cell::from(format!("{:+.2}", row.change)).style(Style::default().fg(color)),
                Cell::from(format!("{:+.2}%", row.change_percent)).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(card(&format!("Historical Price Data · {}", app.ticker())))
    .column_spacing(2);

    frame.render_widget(table, area);
}

// ============================================================================
// Footer : raccourcis, confirmation, recherche ou notification
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let (lines, border): (Vec<Line>, Color) = if app.is_searching() {
        (
            vec![
                Line::from(vec![
                    Span::styled("Search ticker: ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                    Span::styled(app.input_buffer.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        "█",
                        Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
                    ),
                ]),
                Line::from(vec![
                    key("[Enter]", Color::Green),
                    Span::raw(" Confirm  "),
                    key("[ESC]", Color::Red),
                    Span::raw(" Cancel"),
                ]),
            ],
            Color::Green,
        )
    } else if app.is_awaiting_quit_confirmation() {
        (
            vec![Line::from(vec![
                Span::styled(
                    "⚠  Press ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "[q]",
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
                Span::styled(
                    " again to quit, any other key to cancel ⚠",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ])],
            Color::Yellow,
        )
    } else if let Some(notice) = &app.notice {
        (
            vec![
                Line::from(Span::styled(
                    notice.title.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(notice.message.clone(), Style::default().fg(Color::Gray))),
            ],
            Color::Yellow,
        )
    } else {
        (
            vec![
                Line::from(vec![
                    key("[q]", Color::Yellow),
                    Span::raw(" Quit  "),
                    key("[r]", Color::Green),
                    Span::raw(" Refresh  "),
                    key("[m]", Color::Yellow),
                    Span::raw(" Market  "),
                    key("[↑↓ / j k]", Color::Yellow),
                    Span::raw(" Ticker  "),
                    key("[/]", Color::Yellow),
                    Span::raw(" Search  "),
                    key("[Tab]", Color::Yellow),
                    Span::raw(" View"),
                ]),
                Line::from(vec![
                    key("[h l]", Color::Yellow),
                    Span::raw(" Range  "),
                    key("[w]", Color::Cyan),
                    Span::raw(" Predict Week  "),
                    key("[o]", Color::Cyan),
                    Span::raw(" Predict Month  "),
                    key("[y]", Color::Cyan),
                    Span::raw(" Predict Year"),
                ]),
            ],
            ACCENT,
        )
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests : rendu dans un TestBackend
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    /// Rend l'app et retourne le contenu de l'écran en une seule chaîne
    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_overview_shows_seed_logs() {
        let app = App::new();
        let screen = draw(&app);
        assert!(screen.contains("Initializing dashboard..."));
        assert!(screen.contains("Connected to market data feed"));
        assert!(screen.contains("RELIANCE"));
    }

    #[test]
    fn test_overview_shows_manual_refresh() {
        let mut app = App::new();
        app.manual_refresh();
        let screen = draw(&app);
        assert!(screen.contains("Manual refresh triggered"));
        assert!(screen.contains("Data refreshed successfully"));
    }

    #[test]
    fn test_history_view_lists_rows() {
        let mut app = App::new();
        app.next_view();
        app.next_view();
        let screen = draw(&app);
        assert!(screen.contains("2025-10-04"));
        assert!(screen.contains("Historical Price Data"));
    }

    #[test]
    fn test_charts_view_renders() {
        let mut app = App::new();
        app.next_view();
        let screen = draw(&app);
        assert!(screen.contains("Trading Volume"));
        assert!(screen.contains("Candlestick Chart (1M)"));
        assert!(screen.contains("Price & Sentiment Timeline (1M)"));

        app.next_time_range();
        let screen = draw(&app);
        assert!(screen.contains("Candlestick Chart (1Y)"));
        assert!(screen.contains("Price & Sentiment Timeline (1Y)"));
        assert!(!screen.contains("(1M)"));
    }

    #[test]
    fn test_charts_view_lists_marker_headlines() {
        let mut app = App::new();
        app.next_view();
        let screen = draw(&app);
        assert!(screen.contains("Sentiment Markers"));
        assert!(screen.contains("Reliance Industries announces major expansion"));
        assert!(screen.contains("Concerns raised over global supply chain"));
        assert!(screen.contains("for major conglomerates · Positive 76.0%"));
    }

    #[test]
    fn test_search_footer() {
        let mut app = App::new();
        app.start_search();
        app.append_char('T');
        let screen = draw(&app);
        assert!(screen.contains("Search ticker: T"));
    }
}
