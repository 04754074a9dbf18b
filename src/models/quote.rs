// ============================================================================
// Cotation, sentiment et titres de presse
// ============================================================================
// Données des cartes "Ticker & Latest Price", "Overall Sentiment",
// "Top Headlines" et de la rangée de métriques
// ============================================================================

use serde::{Deserialize, Serialize};

/// Dernière cotation d'un ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Symbole du ticker (ex: "RELIANCE")
    pub ticker: String,

    /// Dernier prix
    pub price: f64,

    /// Variation absolue sur la séance
    pub change: f64,

    /// Variation en pourcentage
    pub change_percent: f64,
}

impl PriceQuote {
    pub fn new(ticker: String, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            ticker,
            price,
            change,
            change_percent,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Variation formatée avec flèche : "▲ +32.50 (+1.34%)"
    pub fn change_display(&self) -> String {
        let arrow = if self.is_positive() { "▲" } else { "▼" };
        format!("{} {:+.2} ({:+.2}%)", arrow, self.change, self.change_percent)
    }
}

/// Tonalité d'un titre ou du marché
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentKind {
    Positive,
    Negative,
    Neutral,
}

impl SentimentKind {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentKind::Positive => "Positive",
            SentimentKind::Negative => "Negative",
            SentimentKind::Neutral => "Neutral",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SentimentKind::Positive => "▲",
            SentimentKind::Negative => "▼",
            SentimentKind::Neutral => "■",
        }
    }
}

/// Sentiment global (score entre 0 et 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub kind: SentimentKind,
    pub score: f64,
}

impl Sentiment {
    /// Score en pourcentage arrondi (0.72 → 72)
    pub fn score_percent(&self) -> u16 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u16
    }
}

/// Titre de presse avec sa tonalité et la confiance du classifieur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub sentiment: SentimentKind,
    pub confidence: f64,
}

impl Headline {
    pub fn new(title: &str, sentiment: SentimentKind, confidence: f64) -> Self {
        Self {
            title: title.to_string(),
            sentiment,
            confidence,
        }
    }

    /// Confiance formatée : "89%"
    pub fn confidence_display(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}

/// Nombre de titres par tonalité (graphique de distribution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    pub sentiment: SentimentKind,
    pub count: u64,
}

/// Une case de la rangée de métriques (Price, Volume, Market Cap...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub suffix: String,
    /// Variation en %, absente pour les métriques statiques
    pub change: Option<f64>,
}

impl Metric {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            suffix: String::new(),
            change: None,
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    /// Valeur complète : "32.5M"
    pub fn value_display(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }

    /// Variation formatée : "+12.50%" (vide si absente)
    pub fn change_display(&self) -> String {
        self.change
            .map(|c| format!("{:+.2}%", c))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_change_display() {
        let quote = PriceQuote::new("RELIANCE".to_string(), 2450.75, 32.50, 1.34);
        assert!(quote.is_positive());
        assert_eq!(quote.change_display(), "▲ +32.50 (+1.34%)");

        let down = PriceQuote::new("TCS".to_string(), 100.0, -8.5, -0.35);
        assert_eq!(down.change_display(), "▼ -8.50 (-0.35%)");
    }

    #[test]
    fn test_sentiment_score_percent() {
        let sentiment = Sentiment {
            kind: SentimentKind::Positive,
            score: 0.72,
        };
        assert_eq!(sentiment.score_percent(), 72);
    }

    #[test]
    fn test_metric_display() {
        let metric = Metric::new("Volume", "32.5").with_suffix("M").with_change(12.5);
        assert_eq!(metric.value_display(), "32.5M");
        assert_eq!(metric.change_display(), "+12.50%");
        assert_eq!(Metric::new("P/E Ratio", "28.4").change_display(), "");
    }
}
