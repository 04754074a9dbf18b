// ============================================================================
// Candlestick Chart - Rendu texte ligne par ligne
// ============================================================================
// Dessine les chandeliers japonais avec des caractères Unicode box-drawing
//
// ALGORITHME :
// - Rendu vertical : ligne par ligne de haut en bas
// - Pour chaque ligne, on choisit le caractère selon la zone traversée :
//   mèche supérieure, corps, mèche inférieure
// - Seuils fractionnaires (0.25, 0.75) pour une précision sub-caractère
//
// CARACTÈRES UNICODE :
// ┃ Corps plein          │ Mèche pleine
// ╻ Demi-corps (bas)     ╹ Demi-corps (haut)
// ╽ Transition top       ╿ Transition bottom
// ╷ Demi-mèche sup       ╵ Demi-mèche inf
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::models::{price_bounds, Candle};
use crate::ui::dashboard::{card, NEGATIVE, POSITIVE};

const UNICODE_VOID: char = ' ';
const UNICODE_BODY: char = '┃';
const UNICODE_HALF_BODY_BOTTOM: char = '╻';
const UNICODE_HALF_BODY_TOP: char = '╹';
const UNICODE_WICK: char = '│';
const UNICODE_TOP: char = '╽';
const UNICODE_BOTTOM: char = '╿';
const UNICODE_UPPER_WICK: char = '╷';
const UNICODE_LOWER_WICK: char = '╵';

/// Largeur de l'axe Y : "  2450.75 │ "
const Y_AXIS_WIDTH: usize = 12;

/// Largeur d'un label horaire "HH:MM"
const TIME_LABEL_WIDTH: usize = 5;

/// En dessous, le graphique n'est pas dessiné
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 8;

// ============================================================================
// Renderer
// ============================================================================

/// Renderer de chandeliers en mode texte
///
/// CONCEPT RUST : Lifetime 'a
/// - Le renderer emprunte les chandelles, il ne les copie pas
pub struct CandlestickRenderer<'a> {
    candles: &'a [Candle],
    min_price: f64,
    max_price: f64,
    /// Lignes disponibles pour les chandeliers (hors axe X)
    height: u16,
    /// Colonnes disponibles pour les chandeliers (hors axe Y)
    width: u16,
}

impl<'a> CandlestickRenderer<'a> {
    /// Crée un renderer pour la zone intérieure `area` (bordures exclues)
    pub fn new(candles: &'a [Candle], area: Rect) -> Self {
        let (min_price, max_price) = price_bounds(candles)
            .map(|(low, high)| {
                // Marge de 2% pour que les mèches ne touchent pas les bords
                let margin = (high - low) * 0.02;
                ((low - margin).max(0.0), high + margin)
            })
            .unwrap_or((0.0, 0.0));

        Self {
            candles,
            min_price,
            max_price,
            // 2 lignes pour l'axe X (ticks + labels)
            height: area.height.saturating_sub(2),
            width: area.width.saturating_sub(Y_AXIS_WIDTH as u16),
        }
    }

    /// Convertit un prix en hauteur (0 = bas du graphique)
    fn price_to_height(&self, price: f64) -> f64 {
        if self.max_price == self.min_price {
            return self.height as f64 / 2.0;
        }
        (price - self.min_price) / (self.max_price - self.min_price) * self.height as f64
    }

    fn candle_color(candle: &Candle) -> Color {
        if candle.is_bullish() {
            POSITIVE
        } else {
            NEGATIVE
        }
    }

    /// Caractère d'un chandelier à la ligne `y`
    fn glyph(&self, candle: &Candle, y: u16) -> char {
        let row = y as f64;
        let high = self.price_to_height(candle.high);
        let low = self.price_to_height(candle.low);
        let top = self.price_to_height(candle.open.max(candle.close));
        let bottom = self.price_to_height(candle.open.min(candle.close));

        if high.ceil() >= row && row >= top.floor() {
            // Mèche supérieure
            let body = top - row;
            let wick = high - row;
            match (body, wick) {
                (b, _) if b > 0.75 => UNICODE_BODY,
                (b, w) if b > 0.25 && w > 0.75 => UNICODE_TOP,
                (b, _) if b > 0.25 => UNICODE_HALF_BODY_BOTTOM,
                (_, w) if w > 0.75 => UNICODE_WICK,
                (_, w) if w > 0.25 => UNICODE_UPPER_WICK,
                _ => UNICODE_VOID,
            }
        } else if top.floor() >= row && row >= bottom.ceil() {
            UNICODE_BODY
        } else if bottom.ceil() >= row && row >= low.floor() {
            // Mèche inférieure
            let body = bottom - row;
            let wick = low - row;
            match (body, wick) {
                (b, _) if b < 0.25 => UNICODE_BODY,
                (b, w) if b < 0.75 && w < 0.25 => UNICODE_BOTTOM,
                (b, _) if b < 0.75 => UNICODE_HALF_BODY_TOP,
                (_, w) if w < 0.25 => UNICODE_WICK,
                (_, w) if w < 0.75 => UNICODE_LOWER_WICK,
                _ => UNICODE_VOID,
            }
        } else {
            UNICODE_VOID
        }
    }

    /// Label de prix toutes les 4 lignes
    fn y_axis_label(&self, y: u16) -> String {
        if y % 4 == 0 && self.height > 0 {
            let price = self.min_price
                + y as f64 * (self.max_price - self.min_price) / self.height as f64;
            format!("{:>9.2} │ ", price)
        } else {
            format!("{:>9} │ ", "")
        }
    }

    /// Chandelles qui tiennent dans la largeur (les plus récentes)
    fn visible(&self) -> &'a [Candle] {
        let max_visible = self.width as usize;
        let start = self.candles.len().saturating_sub(max_visible);
        &self.candles[start..]
    }

    /// Colonne de chaque chandelle
    ///
    /// CONCEPT : Calcul depuis l'index
    /// - colonne = index × espacement, arrondie
    /// - Pas d'accumulation d'erreurs d'arrondi
    fn columns(&self, count: usize) -> Vec<usize> {
        let width = self.width as usize;
        match count {
            0 => Vec::new(),
            1 => vec![width / 2],
            _ => {
                let spacing = width as f64 / count as f64;
                (0..count)
                    .map(|i| ((i as f64 * spacing).round() as usize).min(width.saturating_sub(1)))
                    .collect()
            }
        }
    }

    /// Place des spans sur une ligne aux colonnes données
    fn place<'s>(columns: &[usize], cells: Vec<Span<'s>>, cell_width: usize) -> Vec<Span<'s>> {
        let mut spans = Vec::with_capacity(cells.len() * 2);
        let mut cursor = 0;
        for (column, cell) in columns.iter().zip(cells) {
            if *column < cursor {
                continue; // Chevauchement : on saute
            }
            if *column > cursor {
                spans.push(Span::raw(" ".repeat(column - cursor)));
            }
            spans.push(cell);
            cursor = column + cell_width;
        }
        spans
    }

    /// Toutes les lignes : chandeliers, ticks et labels horaires
    pub fn render_lines(&self) -> Vec<Line<'a>> {
        let visible = self.visible();
        if visible.is_empty() || self.height == 0 {
            return Vec::new();
        }

        let columns = self.columns(visible.len());
        let axis_style = Style::default().fg(Color::Gray);
        let mut lines = Vec::with_capacity(self.height as usize + 2);

        for y in (1..=self.height).rev() {
            let mut spans = vec![Span::styled(self.y_axis_label(y), axis_style)];
            let cells = visible
                .iter()
                .map(|c| {
                    Span::styled(
                        self.glyph(c, y).to_string(),
                        Style::default().fg(Self::candle_color(c)),
                    )
                })
                .collect();
            spans.extend(Self::place(&columns, cells, 1));
            lines.push(Line::from(spans));
        }

        // Un label toutes les `step` chandelles, 2 espaces minimum entre labels
        let max_labels = (self.width as usize / (TIME_LABEL_WIDTH + 2)).max(1);
        let step = visible.len().div_ceil(max_labels).max(1);
        let labelled: Vec<usize> = (0..visible.len()).step_by(step).collect();
        let label_columns: Vec<usize> = labelled.iter().map(|&i| columns[i]).collect();
        let padding = " ".repeat(Y_AXIS_WIDTH);

        let ticks = labelled.iter().map(|_| Span::styled("│", axis_style)).collect();
        let mut tick_line = vec![Span::raw(padding.clone())];
        tick_line.extend(Self::place(&label_columns, ticks, 1));
        lines.push(Line::from(tick_line));

        let labels = labelled
            .iter()
            .map(|&i| Span::styled(visible[i].time.clone(), axis_style))
            .collect();
        let mut label_line = vec![Span::raw(padding)];
        label_line.extend(Self::place(&label_columns, labels, TIME_LABEL_WIDTH));
        lines.push(Line::from(label_line));

        lines
    }
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine la carte "Candlestick Chart" du ticker courant
pub fn render_candlestick_chart(frame: &mut Frame, app: &App, area: Rect) {
    let candles = &app.snapshot.candles;
    let block = card(&format!("Candlestick Chart ({})", app.time_range.label()));
    let inner = block.inner(area);

    let lines = if candles.is_empty() {
        vec![Line::from(Span::styled("No candle data", Style::default().fg(Color::Red)))]
    } else if inner.width < MIN_WIDTH || inner.height < MIN_HEIGHT {
        vec![Line::from(Span::styled(
            "Terminal too small for the chart",
            Style::default().fg(Color::Yellow),
        ))]
    } else {
        CandlestickRenderer::new(candles, inner).render_lines()
    };

    let alignment = if lines.len() == 1 {
        Alignment::Center
    } else {
        Alignment::Left
    };
    let paragraph = Paragraph::new(lines).block(block).alignment(alignment);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Candle> {
        vec![
            Candle::new("09:15", 100.0, 110.0, 95.0, 105.0),
            Candle::new("09:30", 105.0, 108.0, 98.0, 100.0),
            Candle::new("09:45", 100.0, 112.0, 99.0, 111.0),
        ]
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_render_lines_height() {
        let candles = sample();
        let renderer = CandlestickRenderer::new(&candles, Rect::new(0, 0, 60, 20));
        let lines = renderer.render_lines();
        // 18 lignes de chandeliers + ticks + labels
        assert_eq!(lines.len(), 20);
    }

    #[test]
    fn test_render_lines_time_labels() {
        let candles = sample();
        let renderer = CandlestickRenderer::new(&candles, Rect::new(0, 0, 60, 20));
        let lines = renderer.render_lines();
        let labels = line_text(&lines[lines.len() - 1]);
        assert!(labels.contains("09:15"));
        assert!(labels.contains("09:45"));
    }

    #[test]
    fn test_body_glyph_in_body_zone() {
        let candles = vec![Candle::new("09:15", 100.0, 120.0, 80.0, 115.0)];
        let renderer = CandlestickRenderer::new(&candles, Rect::new(0, 0, 40, 22));
        // Le milieu de la zone 80..120 est dans le corps 100..115
        let mid = renderer.price_to_height(107.5).round() as u16;
        assert_eq!(renderer.glyph(&candles[0], mid), UNICODE_BODY);
    }

    #[test]
    fn test_visible_keeps_latest() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| Candle::new(&format!("{:02}:00", i % 24), 100.0, 101.0, 99.0, 100.5))
            .collect();
        let renderer = CandlestickRenderer::new(&candles, Rect::new(0, 0, 22, 10));
        let visible = renderer.visible();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible.last(), candles.last());
    }

    #[test]
    fn test_empty_candles() {
        let renderer = CandlestickRenderer::new(&[], Rect::new(0, 0, 60, 20));
        assert!(renderer.render_lines().is_empty());
    }
}
