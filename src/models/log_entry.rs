// ============================================================================
// Structures : LogEntry et LogHistory
// ============================================================================
// Journal d'activité affiché dans la carte "System Status & Activity Logs"
//
// CONCEPTS RUST :
// 1. VecDeque : file à double extrémité, pop_front en O(1)
// 2. Encapsulation : la borne est garantie par les seules méthodes publiques
// 3. Serde : rename_all pour contrôler le format JSON des enums
// ============================================================================

use std::collections::VecDeque;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Nombre maximum d'entrées conservées dans l'historique
pub const LOG_HISTORY_CAPACITY: usize = 10;

/// Format d'horodatage des entrées (24h)
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Catégorie d'une entrée de log (sert au style d'affichage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    /// Jamais émis par les déclencheurs actuels, mais fait partie de la taxonomie
    Error,
}

impl LogKind {
    /// Label court pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Success => "success",
            LogKind::Error => "error",
        }
    }

    /// Icône affichée devant le message
    pub fn icon(&self) -> &'static str {
        match self {
            LogKind::Info => "●",
            LogKind::Success => "✓",
            LogKind::Error => "✗",
        }
    }
}

/// Une ligne du journal d'activité
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Heure locale au format HH:MM:SS
    pub timestamp: String,

    /// Catégorie de l'entrée
    pub kind: LogKind,

    /// Message lisible
    pub message: String,
}

impl LogEntry {
    /// Crée une entrée avec un horodatage déjà formaté
    pub fn new(timestamp: impl Into<String>, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            kind,
            message: message.into(),
        }
    }

    /// Crée une entrée horodatée à partir d'une date
    ///
    /// CONCEPT RUST : Génériques avec trait bounds
    /// - Tz: TimeZone accepte Local, Utc, FixedOffset...
    /// - Tz::Offset: Display est requis par format()
    pub fn at<Tz>(time: &DateTime<Tz>, kind: LogKind, message: impl Into<String>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::new(time.format(TIMESTAMP_FORMAT).to_string(), kind, message)
    }

    pub fn info(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(timestamp, LogKind::Info, message)
    }

    pub fn success(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(timestamp, LogKind::Success, message)
    }
}

// ============================================================================
// LogHistory : fenêtre glissante bornée
// ============================================================================
// CONCEPT : Sliding window (FIFO)
// - On ajoute toujours à la fin
// - Quand la capacité est dépassée, on retire au début (les plus anciens)
// - Aucun réordonnancement : ni par type, ni par horodatage
// ============================================================================

/// Historique borné des entrées de log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHistory {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogHistory {
    /// Crée un historique vide avec la capacité par défaut (10)
    pub fn new() -> Self {
        Self::with_capacity(LOG_HISTORY_CAPACITY)
    }

    /// Crée un historique vide avec une capacité donnée
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Ajoute un lot d'entrées dans l'ordre puis applique la borne une seule fois
    ///
    /// Seules les `capacity` entrées les plus récentes survivent.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = LogEntry>,
    {
        self.entries.extend(entries);
        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itère du plus ancien au plus récent
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Copie des entrées (plus ancienne en premier)
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for LogHistory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn numbered(n: usize) -> LogEntry {
        LogEntry::info("10:00:00", format!("entry {}", n))
    }

    #[test]
    fn test_history_starts_empty() {
        let history = LogHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_extend_keeps_insertion_order() {
        let mut history = LogHistory::new();
        history.extend([LogEntry::success("10:00:02", "b")]);
        history.extend([LogEntry::info("10:00:01", "a")]);

        // L'ordre d'insertion gagne sur l'horodatage
        let messages: Vec<&str> = history.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "a"]);
    }

    #[test]
    fn test_bound_evicts_oldest_first() {
        let mut history = LogHistory::new();
        for n in 1..=13 {
            history.extend([numbered(n)]);
            assert!(history.len() <= LOG_HISTORY_CAPACITY);
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.iter().next().map(|e| e.message.as_str()), Some("entry 4"));
        assert_eq!(history.iter().last().map(|e| e.message.as_str()), Some("entry 13"));
    }

    #[test]
    fn test_extend_full_history_slides_window() {
        let mut history = LogHistory::new();
        history.extend((1..=10).map(numbered));

        history.extend((11..=13).map(numbered));

        let expected: Vec<LogEntry> = (4..=13).map(numbered).collect();
        assert_eq!(history.to_vec(), expected);
    }

    #[test]
    fn test_extend_larger_than_capacity() {
        let mut history = LogHistory::with_capacity(3);
        history.extend((1..=5).map(numbered));

        let expected: Vec<LogEntry> = (3..=5).map(numbered).collect();
        assert_eq!(history.to_vec(), expected);
    }

    #[test]
    fn test_entry_at_formats_24h() {
        let time = Local.with_ymd_and_hms(2025, 10, 4, 15, 7, 9).single().unwrap();
        let entry = LogEntry::at(&time, LogKind::Success, "Price data updated");
        assert_eq!(entry.timestamp, "15:07:09");
        assert_eq!(entry.kind, LogKind::Success);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let entry = LogEntry::new("10:30:01", LogKind::Error, "boom");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"kind\":\"error\""));
        assert_eq!(LogKind::Info.label(), "info");
    }
}
