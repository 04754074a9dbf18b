// ============================================================================
// MarketSnapshot : jeu de données statique du dashboard
// ============================================================================
// Aucune source de données réelle : toutes les vues lisent ce snapshot.
// Seul le ticker varie, les séries sont identiques quel que soit le symbole.
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{
    Candle, Headline, Metric, PricePoint, PriceQuote, PriceRow, Sentiment, SentimentCount,
    SentimentKind, TradeSide, VolumeBar,
};

/// Toutes les données affichées pour un ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub quote: PriceQuote,
    pub sentiment: Sentiment,
    pub headlines: Vec<Headline>,
    pub metrics: Vec<Metric>,
    pub price_points: Vec<PricePoint>,
    pub sentiment_distribution: Vec<SentimentCount>,
    pub candles: Vec<Candle>,
    pub volumes: Vec<VolumeBar>,
    pub price_history: Vec<PriceRow>,
}

impl MarketSnapshot {
    /// Construit le snapshot statique pour un ticker
    pub fn mock(ticker: &str) -> Self {
        use SentimentKind::{Negative, Neutral, Positive};
        use TradeSide::{Buy, Sell};

        let headlines = vec![
            Headline::new(
                "Reliance Industries announces major expansion in renewable energy sector",
                Positive,
                0.89,
            ),
            Headline::new(
                "Market experts predict strong Q4 results for major conglomerates",
                Positive,
                0.76,
            ),
            Headline::new(
                "Concerns raised over global supply chain disruptions affecting exports",
                Negative,
                0.68,
            ),
        ];

        // Les points 09:45, 10:15 et 10:45 portent les titres ci-dessus
        let price_points = vec![
            PricePoint::new("09:15", 2418.25),
            PricePoint::new("09:30", 2422.50),
            PricePoint::new("09:45", 2428.75).with_headline(Positive, &headlines[0].title, 0.89),
            PricePoint::new("10:00", 2435.00),
            PricePoint::new("10:15", 2440.25).with_headline(Positive, &headlines[1].title, 0.76),
            PricePoint::new("10:30", 2438.50),
            PricePoint::new("10:45", 2442.00).with_headline(Negative, &headlines[2].title, 0.68),
            PricePoint::new("11:00", 2445.75),
            PricePoint::new("11:15", 2450.75),
        ];

        let quote = PriceQuote::new(ticker.to_string(), 2450.75, 32.50, 1.34);

        let metrics = vec![
            Metric::new("Price", format!("{:.2}", quote.price)).with_change(quote.change_percent),
            Metric::new("Volume", "32.5").with_suffix("M").with_change(12.5),
            Metric::new("Market Cap", "16.8").with_suffix("T"),
            Metric::new("52W High", "2,685"),
            Metric::new("52W Low", "2,115"),
            Metric::new("P/E Ratio", "28.4"),
        ];

        Self {
            quote,
            sentiment: Sentiment {
                kind: Positive,
                score: 0.72,
            },
            headlines,
            metrics,
            price_points,
            sentiment_distribution: vec![
                SentimentCount { sentiment: Positive, count: 15 },
                SentimentCount { sentiment: Negative, count: 5 },
                SentimentCount { sentiment: Neutral, count: 8 },
            ],
            candles: vec![
                Candle::new("09:15", 2418.25, 2425.00, 2415.00, 2422.50),
                Candle::new("09:30", 2422.50, 2430.00, 2420.00, 2428.75),
                Candle::new("09:45", 2428.75, 2438.00, 2427.00, 2435.00),
                Candle::new("10:00", 2435.00, 2442.00, 2433.00, 2440.25),
                Candle::new("10:15", 2440.25, 2443.00, 2437.00, 2438.50),
                Candle::new("10:30", 2438.50, 2445.00, 2436.00, 2442.00),
                Candle::new("10:45", 2442.00, 2448.00, 2441.00, 2445.75),
                Candle::new("11:00", 2445.75, 2452.00, 2444.00, 2450.75),
            ],
            volumes: vec![
                VolumeBar::new("09:15", 2_500_000, Buy),
                VolumeBar::new("09:30", 3_200_000, Buy),
                VolumeBar::new("09:45", 2_800_000, Sell),
                VolumeBar::new("10:00", 4_100_000, Buy),
                VolumeBar::new("10:15", 3_500_000, Buy),
                VolumeBar::new("10:30", 2_900_000, Sell),
                VolumeBar::new("10:45", 3_800_000, Buy),
                VolumeBar::new("11:00", 3_300_000, Buy),
                VolumeBar::new("11:15", 2_700_000, Sell),
            ],
            price_history: vec![
                PriceRow::new("2025-10-01", 2418.25, -8.50, -0.35),
                PriceRow::new("2025-10-02", 2435.00, 16.75, 0.69),
                PriceRow::new("2025-10-03", 2442.00, 7.00, 0.29),
                PriceRow::new("2025-10-04", 2450.75, 8.75, 0.36),
            ],
        }
    }

    /// Nombre total de titres analysés
    pub fn total_headlines_analyzed(&self) -> u64 {
        self.sentiment_distribution.iter().map(|s| s.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_uses_requested_ticker() {
        let snapshot = MarketSnapshot::mock("AAPL");
        assert_eq!(snapshot.quote.ticker, "AAPL");
        assert_eq!(snapshot.metrics.len(), 6);
        assert_eq!(snapshot.metrics[0].value_display(), "2450.75");
    }

    #[test]
    fn test_mock_annotations_point_to_headlines() {
        let snapshot = MarketSnapshot::mock("RELIANCE");
        let annotated: Vec<&PricePoint> =
            snapshot.price_points.iter().filter(|p| p.is_annotated()).collect();

        assert_eq!(annotated.len(), snapshot.headlines.len());
        for (point, headline) in annotated.iter().zip(&snapshot.headlines) {
            assert_eq!(point.headline.as_deref(), Some(headline.title.as_str()));
            assert_eq!(point.sentiment, Some(headline.sentiment));
        }
    }

    #[test]
    fn test_mock_series_sizes() {
        let snapshot = MarketSnapshot::mock("TCS");
        assert_eq!(snapshot.candles.len(), 8);
        assert_eq!(snapshot.volumes.len(), 9);
        assert_eq!(snapshot.price_history.len(), 4);
        assert_eq!(snapshot.total_headlines_analyzed(), 28);
    }
}
