// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de la boucle d'affichage
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Closures en paramètre : un seul helper pour tous les prédicats
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::models::PredictionPeriod;

/// Délai maximum d'attente d'un événement avant de renvoyer Tick
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (redessin, expiration des notifications)
    Tick,
}

/// Gestionnaire d'événements (sans état)
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant au plus 250ms)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Les Release/Repeat sont ignorés (doublons sur certains OS)
    pub fn next(&self) -> Result<Event> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Prédicats sur les touches
// ============================================================================
// CONCEPT RUST : Closures
// - key_matches() factorise le "if let Event::Key(key)"
// - Chaque prédicat ne décrit que les KeyCode acceptés
// ============================================================================

fn key_matches(event: &Event, accept: impl Fn(KeyCode) -> bool) -> bool {
    match event {
        Event::Key(key) => accept(key.code),
        Event::Tick => false,
    }
}

/// 'q' : quitter (deux pressions)
pub fn is_quit_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Esc)
}

pub fn is_enter_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Enter)
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Backspace)
}

/// Tab : vue suivante
pub fn is_tab_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Tab)
}

/// 'r' : rafraîchissement manuel
pub fn is_refresh_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('r') | KeyCode::Char('R')))
}

/// 'm' : basculer de marché
pub fn is_market_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('m') | KeyCode::Char('M')))
}

/// '/' : rechercher un ticker
pub fn is_search_event(event: &Event) -> bool {
    key_matches(event, |code| code == KeyCode::Char('/'))
}

/// Flèche haut ou 'k' (vim) : ticker précédent
pub fn is_up_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche bas ou 'j' (vim) : ticker suivant
pub fn is_down_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Down | KeyCode::Char('j')))
}

/// 'l' ou flèche droite : plage de temps suivante
pub fn is_next_range_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Right | KeyCode::Char('l')))
}

/// 'h' ou flèche gauche : plage de temps précédente
pub fn is_previous_range_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Left | KeyCode::Char('h')))
}

/// 'w' / 'o' / 'y' : prédiction semaine / mois / année
pub fn prediction_from_event(event: &Event) -> Option<PredictionPeriod> {
    match event {
        Event::Key(key) => match key.code {
            KeyCode::Char('w') => Some(PredictionPeriod::Week),
            KeyCode::Char('o') => Some(PredictionPeriod::Month),
            KeyCode::Char('y') => Some(PredictionPeriod::Year),
            _ => None,
        },
        Event::Tick => None,
    }
}

/// Caractère acceptable dans un symbole (lettres, chiffres, '-', '.', '&')
pub fn is_ticker_char_event(event: &Event) -> bool {
    key_matches(event, |code| {
        matches!(code, KeyCode::Char(c) if c.is_alphanumeric() || matches!(c, '-' | '.' | '&' | ' '))
    })
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            ..
        }) => Some(*c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Up)));
        assert!(is_down_event(&key(KeyCode::Char('j'))));
        assert!(is_next_range_event(&key(KeyCode::Char('l'))));
        assert!(is_previous_range_event(&key(KeyCode::Left)));
        assert!(is_tab_event(&key(KeyCode::Tab)));
    }

    #[test]
    fn test_prediction_keys() {
        assert_eq!(prediction_from_event(&key(KeyCode::Char('w'))), Some(PredictionPeriod::Week));
        assert_eq!(prediction_from_event(&key(KeyCode::Char('y'))), Some(PredictionPeriod::Year));
        assert_eq!(prediction_from_event(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ticker_chars() {
        assert!(is_ticker_char_event(&key(KeyCode::Char('M'))));
        assert!(is_ticker_char_event(&key(KeyCode::Char('-'))));
        assert!(!is_ticker_char_event(&key(KeyCode::Char('/'))));
        assert_eq!(get_char_from_event(&key(KeyCode::Char('B'))), Some('B'));
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
    }
}
