// ============================================================================
// Structures : Candle (Open, High, Low, Close) et séries de prix
// ============================================================================
// Représente les données des graphiques : chandeliers, volumes,
// points de prix annotés et lignes du tableau historique
//
// CONCEPTS RUST :
// 1. f64 : floating point 64 bits pour les prix (précision suffisante)
// 2. u64 : unsigned 64 bits pour le volume (toujours positif)
// 3. Option : annotations facultatives sur un point de prix
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::SentimentKind;

/// Une chandelle japonaise (candlestick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Heure de la chandelle ("09:15")
    pub time: String,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix de clôture (Close)
    pub close: f64,
}

impl Candle {
    pub fn new(time: &str, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time: time.to_string(),
            open,
            high,
            low,
            close,
        }
    }

    /// Vérifie si la chandelle est haussière (bullish)
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Sens dominant des échanges sur une période
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Volume échangé sur une période
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub time: String,
    pub volume: u64,
    pub side: TradeSide,
}

impl VolumeBar {
    pub fn new(time: &str, volume: u64, side: TradeSide) -> Self {
        Self {
            time: time.to_string(),
            volume,
            side,
        }
    }

    /// Volume en millions pour les labels : "2.5M"
    pub fn millions_display(&self) -> String {
        format!("{:.1}M", self.volume as f64 / 1_000_000.0)
    }
}

/// Point de la courbe de prix, éventuellement annoté par un titre de presse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    pub price: f64,
    pub sentiment: Option<SentimentKind>,
    pub headline: Option<String>,
    pub confidence: Option<f64>,
}

impl PricePoint {
    pub fn new(time: &str, price: f64) -> Self {
        Self {
            time: time.to_string(),
            price,
            sentiment: None,
            headline: None,
            confidence: None,
        }
    }

    /// Annote le point avec un titre de presse
    pub fn with_headline(mut self, sentiment: SentimentKind, headline: &str, confidence: f64) -> Self {
        self.sentiment = Some(sentiment);
        self.headline = Some(headline.to_string());
        self.confidence = Some(confidence);
        self
    }

    pub fn is_annotated(&self) -> bool {
        self.sentiment.is_some()
    }
}

/// Ligne du tableau "Historical Price Data"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Date au format AAAA-MM-JJ
    pub date: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl PriceRow {
    pub fn new(date: &str, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            date: date.to_string(),
            price,
            change,
            change_percent,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

/// Bornes (min, max) des prix d'une série de chandelles
///
/// CONCEPT RUST : fold
/// - Un seul passage pour min et max
/// - None si la série est vide
pub fn price_bounds(candles: &[Candle]) -> Option<(f64, f64)> {
    if candles.is_empty() {
        return None;
    }

    let (min, max) = candles.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), c| {
        (min.min(c.low), max.max(c.high))
    });
    Some((min, max))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_bullish() {
        let candle = Candle::new("09:15", 2418.25, 2425.00, 2415.00, 2422.50);
        assert!(candle.is_bullish());
    }

    #[test]
    fn test_candle_bearish() {
        let candle = Candle::new("10:15", 2440.25, 2443.00, 2437.00, 2438.50);
        assert!(!candle.is_bullish());
    }

    #[test]
    fn test_price_bounds() {
        let candles = vec![
            Candle::new("09:15", 10.0, 12.0, 9.0, 11.0),
            Candle::new("09:30", 11.0, 15.0, 10.5, 14.0),
        ];
        assert_eq!(price_bounds(&candles), Some((9.0, 15.0)));
        assert_eq!(price_bounds(&[]), None);
    }

    #[test]
    fn test_volume_millions() {
        let bar = VolumeBar::new("09:15", 2_500_000, TradeSide::Buy);
        assert_eq!(bar.millions_display(), "2.5M");
    }

    #[test]
    fn test_price_point_annotation() {
        let plain = PricePoint::new("09:15", 2418.25);
        assert!(!plain.is_annotated());

        let annotated = plain.with_headline(SentimentKind::Negative, "Supply chain", 0.68);
        assert!(annotated.is_annotated());
        assert_eq!(annotated.confidence, Some(0.68));
    }
}
