use analysis_core::ThresholdLadder;
use serde::{Deserialize, Serialize};

/// Display severity for the conviction score.
///
/// Uses its own 75/55 cut points, deliberately separate from the 75/60/45
/// regime ladder applied to the same conviction value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvictionTier {
    Good,
    Warn,
    Bad,
}

impl ConvictionTier {
    pub const LADDER: ThresholdLadder<ConvictionTier> = ThresholdLadder::new(
        &[(75.0, ConvictionTier::Good), (55.0, ConvictionTier::Warn)],
        ConvictionTier::Bad,
    );

    pub fn from_conviction(conviction: f64) -> Self {
        Self::LADDER.classify(conviction)
    }

    /// Short class name ("good", "warn", "bad").
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvictionTier::Good => "good",
            ConvictionTier::Warn => "warn",
            ConvictionTier::Bad => "bad",
        }
    }
}

/// RSI band used for the narrative sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiBand {
    Overbought,
    Oversold,
    Balanced,
}

impl RsiBand {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiBand::Overbought
        } else if rsi < 35.0 {
            RsiBand::Oversold
        } else {
            RsiBand::Balanced
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            RsiBand::Overbought => "RSI indicates overbought conditions—expect pullback risk.",
            RsiBand::Oversold => "RSI near oversold region—reversion probability rising.",
            RsiBand::Balanced => "RSI is balanced; trend can continue without extreme conditions.",
        }
    }
}
