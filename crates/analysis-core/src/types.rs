use serde::{Deserialize, Serialize};

use crate::{AnalysisError, ThresholdLadder};

/// Fundamental, technical and qualitative inputs for a single stock.
///
/// Growth, margin and return figures are percentages (15.0 means 15%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub company: String,
    pub ticker: String,
    pub industry: String,
    pub region: String,

    pub price: f64,
    pub sector_pe: f64,
    /// Forward P/E
    pub fpe: f64,

    pub rev_growth: f64,
    pub eps_growth: f64,
    /// Product growth relative to peers
    pub relative_growth: f64,
    pub industry_growth: f64,

    pub roic: f64,
    pub op_margin: f64,
    /// Cash conversion (FCF / net income), percent
    pub conversion: f64,
    pub debt_ebitda: f64,

    /// Price above the 200-day moving average
    pub above_200: bool,
    /// Momentum crossover active
    pub bullish_signal: bool,
    pub rsi: f64,
    pub volatility: f64,

    /// Management guidance credibility, 0-10
    pub guidance: f64,
    /// Confidence in the input data, 0-10
    pub data_confidence: f64,
}

impl AnalysisInput {
    /// Numeric fields paired with their form names, in form order.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 15] {
        [
            ("price", self.price),
            ("sectorPe", self.sector_pe),
            ("fpe", self.fpe),
            ("revGrowth", self.rev_growth),
            ("epsGrowth", self.eps_growth),
            ("relativeGrowth", self.relative_growth),
            ("industryGrowth", self.industry_growth),
            ("roic", self.roic),
            ("opMargin", self.op_margin),
            ("conversion", self.conversion),
            ("debtEbitda", self.debt_ebitda),
            ("rsi", self.rsi),
            ("volatility", self.volatility),
            ("guidance", self.guidance),
            ("dataConfidence", self.data_confidence),
        ]
    }

    /// Reject inputs the scoring formulas cannot handle: non-finite numbers,
    /// a zero sector P/E (division) and a non-positive price.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some((name, _)) = self
            .numeric_fields()
            .iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(AnalysisError::NonFinite(name.to_string()));
        }
        if self.sector_pe == 0.0 {
            return Err(AnalysisError::ZeroSectorPe);
        }
        if self.price <= 0.0 {
            return Err(AnalysisError::NonPositivePrice(self.price));
        }
        Ok(())
    }
}

/// Recommendation bucket derived from conviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "High-Conviction Buy Zone")]
    HighConvictionBuy,
    #[serde(rename = "Accumulation Zone")]
    Accumulation,
    #[serde(rename = "Watchlist / Neutral")]
    Watchlist,
    #[serde(rename = "Avoid / Risky")]
    Avoid,
}

impl Regime {
    pub const LADDER: ThresholdLadder<Regime> = ThresholdLadder::new(
        &[
            (75.0, Regime::HighConvictionBuy),
            (60.0, Regime::Accumulation),
            (45.0, Regime::Watchlist),
        ],
        Regime::Avoid,
    );

    pub fn from_conviction(conviction: f64) -> Self {
        Self::LADDER.classify(conviction)
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Regime::HighConvictionBuy => "High-Conviction Buy Zone",
            Regime::Accumulation => "Accumulation Zone",
            Regime::Watchlist => "Watchlist / Neutral",
            Regime::Avoid => "Avoid / Risky",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_label())
    }
}

/// Relative valuation bucket derived from the valuation gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationLabel {
    #[serde(rename = "Undervalued")]
    Undervalued,
    #[serde(rename = "Fair to Slightly Undervalued")]
    FairToSlightlyUndervalued,
    #[serde(rename = "Fair to Slightly Overvalued")]
    FairToSlightlyOvervalued,
    #[serde(rename = "Overvalued")]
    Overvalued,
}

impl ValuationLabel {
    pub const LADDER: ThresholdLadder<ValuationLabel> = ThresholdLadder::new(
        &[
            (12.0, ValuationLabel::Undervalued),
            (0.0, ValuationLabel::FairToSlightlyUndervalued),
            (-10.0, ValuationLabel::FairToSlightlyOvervalued),
        ],
        ValuationLabel::Overvalued,
    );

    pub fn from_gap(valuation_gap: f64) -> Self {
        Self::LADDER.classify(valuation_gap)
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            ValuationLabel::Undervalued => "Undervalued",
            ValuationLabel::FairToSlightlyUndervalued => "Fair to Slightly Undervalued",
            ValuationLabel::FairToSlightlyOvervalued => "Fair to Slightly Overvalued",
            ValuationLabel::Overvalued => "Overvalued",
        }
    }
}

impl std::fmt::Display for ValuationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_label())
    }
}

/// Output of the scoring engine. Price levels are in the same currency as the input price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sector P/E discount of the forward P/E, percent
    pub valuation_gap: f64,
    pub growth_composite: f64,
    pub quality_composite: f64,
    pub technical_composite: f64,
    /// 0 to 100
    pub conviction: f64,
    pub regime: Regime,
    pub valuation_label: ValuationLabel,

    pub price_1y: f64,
    pub price_2y: f64,
    pub price_3y: f64,

    pub discounted_entry: f64,
    pub stop_loss: f64,
    pub potential_exit: f64,

    pub support_1: f64,
    pub support_2: f64,
    pub resistance_1: f64,
    pub resistance_2: f64,
}
