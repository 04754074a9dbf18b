// ============================================================================
// Status Log - Journal des rafraîchissements
// ============================================================================
// Affiche l'historique borné du RefreshController, entrée la plus ancienne
// en haut, avec une couleur par type d'entrée.
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::models::{LogEntry, LogKind};
use crate::refresh::RefreshSnapshot;
use crate::ui::dashboard::card;

fn kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Info => Color::Cyan,
        LogKind::Success => Color::Green,
        LogKind::Error => Color::Red,
    }
}

/// Une ligne du journal : "[10:30:01] ✓ Price data updated"
fn entry_line(entry: &LogEntry) -> Line<'_> {
    let color = kind_color(entry.kind);
    Line::from(vec![
        Span::styled(
            format!("[{}] ", entry.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{} ", entry.kind.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(entry.message.as_str(), Style::default().fg(color)),
    ])
}

/// Dessine la carte "Live Status Log"
pub fn render_status_log(frame: &mut Frame, state: &RefreshSnapshot, area: Rect) {
    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();

    let title = format!("Live Status Log · {} entries", state.history.len());
    let list = List::new(items).block(card(&title));
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_line_layout() {
        let entry = LogEntry::new("10:30:01", LogKind::Success, "Price data updated");
        let line = entry_line(&entry);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("[10:30:01] "));
        assert!(text.ends_with("Price data updated"));
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(kind_color(LogKind::Info), Color::Cyan);
        assert_eq!(kind_color(LogKind::Success), Color::Green);
        assert_eq!(kind_color(LogKind::Error), Color::Red);
    }
}
