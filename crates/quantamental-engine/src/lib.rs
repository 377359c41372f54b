use analysis_core::{clamp, AnalysisError, AnalysisInput, AnalysisResult, Regime, ValuationLabel};
use serde::{Deserialize, Serialize};


/// Growth decay applied to the second and third projected years (mean reversion).
const YEAR_2_DECAY: f64 = 0.92;
const YEAR_3_DECAY: f64 = 0.85;

const STOP_LOSS_FACTOR: f64 = 0.88;
const EXIT_PREMIUM: f64 = 1.08;

/// Fixed bands around the current price.
const SUPPORT_1: f64 = 0.93;
const SUPPORT_2: f64 = 0.86;
const RESISTANCE_1: f64 = 1.11;
const RESISTANCE_2: f64 = 1.24;

/// The four sub-scores making up the technical composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalBreakdown {
    /// 18 above the 200DMA, 6 below
    pub trend: f64,
    /// 16 with an active bullish crossover, 4 without
    pub momentum: f64,
    /// 0 to 20, peaks around RSI 55
    pub rsi: f64,
    /// 0 to 20, rewards low volatility
    pub volatility: f64,
}

impl TechnicalBreakdown {
    pub fn total(&self) -> f64 {
        self.trend + self.momentum + self.rsi + self.volatility
    }
}

/// Guidance-adjusted forward fair values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceProjection {
    /// Annual growth rate after the guidance adjustment (0.12 = 12%)
    pub adjusted_growth: f64,
    /// Multiplier in [0.8, 0.98] applied to the first year
    pub risk_discount: f64,
    pub price_1y: f64,
    pub price_2y: f64,
    pub price_3y: f64,
}

/// Entry, stop and exit plan plus the fixed support/resistance bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingLevels {
    pub discounted_entry: f64,
    pub stop_loss: f64,
    pub potential_exit: f64,
    pub support_1: f64,
    pub support_2: f64,
    pub resistance_1: f64,
    pub resistance_2: f64,
}

/// Quantamental scoring engine.
///
/// Blends growth, quality, technical and valuation inputs into a conviction score,
/// labels it, and projects guidance-adjusted prices. Stateless: every call depends
/// only on its input, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantamentalEngine;

impl QuantamentalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Percent discount of the forward P/E to the sector P/E. Requires `sector_pe != 0`.
    pub fn calculate_valuation_gap(&self, sector_pe: f64, fpe: f64) -> f64 {
        ((sector_pe - fpe) / sector_pe) * 100.0
    }

    pub fn calculate_growth_composite(&self, input: &AnalysisInput) -> f64 {
        input.rev_growth * 0.35
            + input.eps_growth * 0.45
            + (input.relative_growth + input.industry_growth) * 0.2
    }

    pub fn calculate_quality_composite(&self, input: &AnalysisInput) -> f64 {
        // Leverage is scored as headroom below 10x debt/EBITDA
        input.roic * 0.35
            + input.op_margin * 0.30
            + input.conversion * 0.20
            + (10.0 - input.debt_ebitda) * 2.0 * 0.15
    }

    pub fn technical_breakdown(&self, input: &AnalysisInput) -> TechnicalBreakdown {
        TechnicalBreakdown {
            trend: if input.above_200 { 18.0 } else { 6.0 },
            momentum: if input.bullish_signal { 16.0 } else { 4.0 },
            rsi: clamp((65.0 - (55.0 - input.rsi).abs()) * 0.5, 0.0, 20.0),
            volatility: clamp((40.0 - input.volatility) * 0.5, 0.0, 20.0),
        }
    }

    pub fn calculate_technical_composite(&self, input: &AnalysisInput) -> f64 {
        self.technical_breakdown(input).total()
    }

    /// Blend the composites into a conviction score clamped to [0, 100].
    pub fn calculate_conviction(
        &self,
        growth_composite: f64,
        quality_composite: f64,
        technical_composite: f64,
        valuation_gap: f64,
        input: &AnalysisInput,
    ) -> f64 {
        let guidance_boost = input.guidance * 2.2;
        clamp(
            growth_composite * 0.32
                + quality_composite * 0.28
                + technical_composite * 0.2
                + valuation_gap * 0.1
                + guidance_boost
                + input.data_confidence,
            0.0,
            100.0,
        )
    }

    pub fn project_prices(&self, input: &AnalysisInput) -> PriceProjection {
        let base_growth = (input.eps_growth * 0.55
            + input.rev_growth * 0.25
            + input.industry_growth * 0.10
            + input.relative_growth * 0.10)
            / 100.0;
        // Guidance 0 scales growth by 0.8, guidance 10 by 1.3
        let adjusted_growth = base_growth * (0.8 + input.guidance / 20.0);
        let risk_discount = 1.0 - clamp((input.volatility - 20.0) / 100.0, 0.02, 0.2);

        let price_1y = input.price * (1.0 + adjusted_growth) * risk_discount;
        let price_2y = price_1y * (1.0 + adjusted_growth * YEAR_2_DECAY);
        let price_3y = price_2y * (1.0 + adjusted_growth * YEAR_3_DECAY);

        PriceProjection {
            adjusted_growth,
            risk_discount,
            price_1y,
            price_2y,
            price_3y,
        }
    }

    pub fn trading_levels(&self, input: &AnalysisInput, price_2y: f64) -> TradingLevels {
        let discounted_entry = input.price * (1.0 - clamp(input.volatility / 180.0, 0.07, 0.22));

        TradingLevels {
            discounted_entry,
            stop_loss: discounted_entry * STOP_LOSS_FACTOR,
            potential_exit: price_2y * EXIT_PREMIUM,
            support_1: input.price * SUPPORT_1,
            support_2: input.price * SUPPORT_2,
            resistance_1: input.price * RESISTANCE_1,
            resistance_2: input.price * RESISTANCE_2,
        }
    }

    /// Validate `input` and run the full scoring model.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        input.validate()?;

        let valuation_gap = self.calculate_valuation_gap(input.sector_pe, input.fpe);
        let growth_composite = self.calculate_growth_composite(input);
        let quality_composite = self.calculate_quality_composite(input);
        let technical_composite = self.calculate_technical_composite(input);
        let conviction = self.calculate_conviction(
            growth_composite,
            quality_composite,
            technical_composite,
            valuation_gap,
            input,
        );

        let projection = self.project_prices(input);
        let levels = self.trading_levels(input, projection.price_2y);

        Ok(AnalysisResult {
            valuation_gap,
            growth_composite,
            quality_composite,
            technical_composite,
            conviction,
            regime: Regime::from_conviction(conviction),
            valuation_label: ValuationLabel::from_gap(valuation_gap),
            price_1y: projection.price_1y,
            price_2y: projection.price_2y,
            price_3y: projection.price_3y,
            discounted_entry: levels.discounted_entry,
            stop_loss: levels.stop_loss,
            potential_exit: levels.potential_exit,
            support_1: levels.support_1,
            support_2: levels.support_2,
            resistance_1: levels.resistance_1,
            resistance_2: levels.resistance_2,
        })
    }
}

/// Shorthand for `QuantamentalEngine::new().analyze(input)`.
pub fn analyze(input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
    QuantamentalEngine::new().analyze(input)
}
