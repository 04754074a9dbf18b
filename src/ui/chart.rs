// ============================================================================
// Charts - Courbe de prix, distribution du sentiment, volumes
// ============================================================================
//
// CONCEPTS RUST :
// 1. Iterator chaining : transformer les séries en points (x, y)
// 2. fold : min et max en un seul passage
// 3. partition / filter : séparer les points annotés par tonalité
//
// CONCEPTS RATATUI :
// 1. Chart + Dataset : plusieurs séries superposées (ligne + marqueurs)
// 2. BarChart + BarGroup + Bar : barres colorées une à une
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{PricePoint, SentimentKind, TradeSide};
use crate::ui::dashboard::{card, change_color, sentiment_color, NEGATIVE, POSITIVE};

// ============================================================================
// Courbe de prix avec marqueurs de sentiment
// ============================================================================

/// Points (x, y) des prix annotés d'une tonalité donnée
fn annotated_points(points: &[PricePoint], kind: SentimentKind) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.sentiment == Some(kind))
        .map(|(i, p)| (i as f64, p.price))
        .collect()
}

/// Ligne d'annotation d'un point : "09:45 ▲ <titre> · Positive 89.0%"
///
/// None pour un point sans titre associé.
fn annotation_line(point: &PricePoint) -> Option<Line<'_>> {
    let kind = point.sentiment?;
    let headline = point.headline.as_deref()?;
    let color = sentiment_color(kind);
    let confidence = point
        .confidence
        .map(|c| format!(" {:.1}%", c * 100.0))
        .unwrap_or_default();

    Some(Line::from(vec![
        Span::styled(format!("{} ", point.time), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} ", kind.arrow()), Style::default().fg(color)),
        Span::styled(headline, Style::default().fg(Color::White)),
        Span::styled(
            format!(" · {}{}", kind.label(), confidence),
            Style::default().fg(color),
        ),
    ]))
}

/// Dessine "Price & Sentiment Timeline" et, dessous, la liste des titres
/// qui expliquent chaque marqueur
pub fn render_price_chart(frame: &mut Frame, app: &App, area: Rect) {
    let annotations: Vec<Line> = app
        .snapshot
        .price_points
        .iter()
        .filter(|p| p.is_annotated())
        .filter_map(annotation_line)
        .collect();

    if annotations.is_empty() {
        render_price_timeline(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(annotations.len() as u16 + 2),
        ])
        .split(area);

    render_price_timeline(frame, app, chunks[0]);
    let paragraph = Paragraph::new(annotations).block(card("Sentiment Markers"));
    frame.render_widget(paragraph, chunks[1]);
}

/// Courbe de prix avec marqueurs de sentiment
///
/// CONCEPT RATATUI : Datasets superposés
/// - Une ligne pour le prix
/// - Un nuage de points par tonalité (vert / rouge / gris)
fn render_price_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let points = &app.snapshot.price_points;
    let block = card(&format!(
        "Price & Sentiment Timeline ({})",
        app.time_range.label()
    ));

    if points.is_empty() {
        let paragraph = Paragraph::new("No price data").block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let line: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect();
    let positive = annotated_points(points, SentimentKind::Positive);
    let negative = annotated_points(points, SentimentKind::Negative);
    let neutral = annotated_points(points, SentimentKind::Neutral);

    let (min_price, max_price) = line
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &(_, y)| (min.min(y), max.max(y)));
    let margin = ((max_price - min_price) * 0.05).max(0.5);
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    let trend = change_color(app.snapshot.quote.change);
    let mut datasets = vec![Dataset::default()
        .name(app.snapshot.quote.ticker.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(trend))
        .data(&line)];

    for (name, kind, data) in [
        ("Positive", SentimentKind::Positive, &positive),
        ("Negative", SentimentKind::Negative, &negative),
        ("Neutral", SentimentKind::Neutral, &neutral),
    ] {
        if data.is_empty() {
            continue;
        }
        datasets.push(
            Dataset::default()
                .name(name)
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(sentiment_color(kind)))
                .data(data),
        );
    }

    // Labels X : première, milieu et dernière heure
    let first = points.first().map(|p| p.time.as_str()).unwrap_or("");
    let middle = points.get(points.len() / 2).map(|p| p.time.as_str()).unwrap_or("");
    let last = points.last().map(|p| p.time.as_str()).unwrap_or("");
    let currency = app.market.currency();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (line.len().saturating_sub(1)).max(1) as f64])
        .labels(vec![Span::raw(first), Span::raw(middle), Span::raw(last)]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{}{:.0}", currency, y_min)),
            Span::raw(format!("{}{:.0}", currency, (y_min + y_max) / 2.0)),
            Span::raw(format!("{}{:.0}", currency, y_max)),
        ]);

    let chart = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}

// ============================================================================
// Distribution du sentiment
// ============================================================================

/// Dessine "Sentiment Distribution" (une barre par tonalité)
pub fn render_sentiment_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let bars: Vec<Bar> = snapshot
        .sentiment_distribution
        .iter()
        .map(|entry| {
            let color = sentiment_color(entry.sentiment);
            Bar::default()
                .value(entry.count)
                .label(Line::from(entry.sentiment.label()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let title = format!(
        "Sentiment Distribution · {} headlines",
        snapshot.total_headlines_analyzed()
    );
    let chart = BarChart::default()
        .block(card(&title))
        .bar_width(9)
        .bar_gap(3)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ============================================================================
// Volumes
// ============================================================================

/// Dessine "Trading Volume" : vert pour les achats, rouge pour les ventes
pub fn render_volume_chart(frame: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .snapshot
        .volumes
        .iter()
        .map(|volume| {
            let color = match volume.side {
                TradeSide::Buy => POSITIVE,
                TradeSide::Sell => NEGATIVE,
            };
            Bar::default()
                .value(volume.volume)
                .text_value(volume.millions_display())
                .label(Line::from(volume.time.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(card("Trading Volume"))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_line_shows_headline_and_confidence() {
        let point = PricePoint::new("09:45", 12.0).with_headline(
            SentimentKind::Positive,
            "Strong quarterly results",
            0.85,
        );
        let line = annotation_line(&point).unwrap();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "09:45 ▲ Strong quarterly results · Positive 85.0%");

        assert!(annotation_line(&PricePoint::new("09:15", 10.0)).is_none());
    }

    #[test]
    fn test_annotated_points_by_kind() {
        let points = vec![
            PricePoint::new("09:15", 10.0),
            PricePoint::new("09:30", 11.0).with_headline(SentimentKind::Positive, "up", 0.9),
            PricePoint::new("09:45", 12.0).with_headline(SentimentKind::Negative, "down", 0.7),
        ];

        assert_eq!(annotated_points(&points, SentimentKind::Positive), vec![(1.0, 11.0)]);
        assert_eq!(annotated_points(&points, SentimentKind::Negative), vec![(2.0, 12.0)]);
        assert!(annotated_points(&points, SentimentKind::Neutral).is_empty());
    }
}
