//! Narrative Report
//!
//! Assembles the five report blocks (company, fundamentals, trading plan, forecast,
//! executive narrative) from an input and its analysis. All figures are formatted
//! to two decimals here so every output format shows identical numbers.

use analysis_core::{AnalysisInput, AnalysisResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ConvictionTier, RsiBand};

/// Growth composite above which the narrative calls out compounding potential.
const STRONG_GROWTH_COMPOSITE: f64 = 18.0;

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    /// Headline figure shown above the bullet lines
    pub headline: Option<String>,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn new(title: &str, headline: Option<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            headline,
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub company: String,
    pub ticker: String,
    pub generated_at: DateTime<Utc>,
    pub tier: ConvictionTier,
    pub sections: Vec<ReportSection>,
    pub input: AnalysisInput,
    pub analysis: AnalysisResult,
}

impl Report {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// Two-decimal formatting used for every figure in the report.
pub fn fmt2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Builds [`Report`]s with a configurable currency symbol.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    currency: String,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new("$")
    }
}

impl ReportBuilder {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    fn money(&self, value: f64) -> String {
        format!("{}{}", self.currency, fmt2(value))
    }

    pub fn build(
        &self,
        input: &AnalysisInput,
        analysis: &AnalysisResult,
        generated_at: DateTime<Utc>,
    ) -> Report {
        let tier = ConvictionTier::from_conviction(analysis.conviction);

        Report {
            company: input.company.clone(),
            ticker: input.ticker.clone(),
            generated_at,
            tier,
            sections: vec![
                self.company_section(input, analysis, tier),
                self.fundamental_section(input, analysis),
                self.trading_plan_section(analysis),
                self.forecast_section(analysis),
                self.narrative_section(input, analysis),
            ],
            input: input.clone(),
            analysis: analysis.clone(),
        }
    }

    fn company_section(
        &self,
        input: &AnalysisInput,
        analysis: &AnalysisResult,
        tier: ConvictionTier,
    ) -> ReportSection {
        ReportSection::new(
            "Company",
            Some(format!("{} ({})", input.company, input.ticker)),
            vec![
                format!("{} · {}", input.industry, input.region),
                format!(
                    "Valuation Status: {} ({}% vs sector P/E).",
                    analysis.valuation_label,
                    fmt2(analysis.valuation_gap)
                ),
                format!("Primary Recommendation: {} [{}].", analysis.regime, tier.as_str()),
                format!("AI Confidence Score: {}/100.", fmt2(analysis.conviction)),
            ],
        )
    }

    fn fundamental_section(&self, input: &AnalysisInput, analysis: &AnalysisResult) -> ReportSection {
        ReportSection::new(
            "Fundamental Health",
            Some(fmt2(analysis.quality_composite)),
            vec![
                format!(
                    "Revenue CAGR: {}%; EPS CAGR: {}%.",
                    fmt2(input.rev_growth),
                    fmt2(input.eps_growth)
                ),
                format!(
                    "Margin profile: {}% with conversion efficiency {}%.",
                    fmt2(input.op_margin),
                    fmt2(input.conversion)
                ),
                format!(
                    "ROIC {}% and leverage {}x support durability.",
                    fmt2(input.roic),
                    fmt2(input.debt_ebitda)
                ),
            ],
        )
    }

    fn trading_plan_section(&self, analysis: &AnalysisResult) -> ReportSection {
        ReportSection::new(
            "Technicals & Trading Plan",
            Some(fmt2(analysis.technical_composite)),
            vec![
                format!("Discounted entry zone: {}.", self.money(analysis.discounted_entry)),
                format!("Risk control (stop): {}.", self.money(analysis.stop_loss)),
                format!(
                    "Potential swing/institutional exit: {}.",
                    self.money(analysis.potential_exit)
                ),
                format!(
                    "Supports: {} / {}.",
                    self.money(analysis.support_1),
                    self.money(analysis.support_2)
                ),
                format!(
                    "Resistances: {} / {}.",
                    self.money(analysis.resistance_1),
                    self.money(analysis.resistance_2)
                ),
            ],
        )
    }

    fn forecast_section(&self, analysis: &AnalysisResult) -> ReportSection {
        ReportSection::new(
            "Forward Price Forecast (Guidance-Adjusted)",
            Some(format!("{} (3Y target)", self.money(analysis.price_3y))),
            vec![
                format!("12M fair value: {}.", self.money(analysis.price_1y)),
                format!("24M fair value: {}.", self.money(analysis.price_2y)),
                format!("36M fair value: {}.", self.money(analysis.price_3y)),
                "Model blends EPS, revenue, industry growth, relative product growth, volatility, \
                 and management guidance credibility."
                    .to_string(),
            ],
        )
    }

    fn narrative_section(&self, input: &AnalysisInput, analysis: &AnalysisResult) -> ReportSection {
        let growth_outlook = if analysis.growth_composite > STRONG_GROWTH_COMPOSITE {
            "strong compounding potential"
        } else {
            "moderate expansion potential"
        };
        let share_outlook = if input.relative_growth > 0.0 {
            "market share gains"
        } else {
            "competitive pressure"
        };

        ReportSection::new(
            "Executive Quantamental Narrative",
            None,
            vec![
                format!(
                    "Growth engine score ({}) indicates {} across revenue, earnings, and product-market momentum.",
                    fmt2(analysis.growth_composite),
                    growth_outlook
                ),
                format!(
                    "Industry outlook ({}%) plus relative product growth ({}%) imply {} over the coming cycle.",
                    fmt2(input.industry_growth),
                    fmt2(input.relative_growth),
                    share_outlook
                ),
                format!(
                    "Guidance confidence ({}/10) and data confidence ({}/10) are integrated as Bayesian-style conviction boosts for scenario calibration.",
                    input.guidance, input.data_confidence
                ),
                signal_sentences(input).join(" "),
                format!(
                    "For portfolio construction: position size should scale with volatility ({}%) and conviction ({}), using staged entries around support.",
                    fmt2(input.volatility),
                    fmt2(analysis.conviction)
                ),
            ],
        )
    }
}

/// Trend, crossover and RSI sentences, in that order.
pub fn signal_sentences(input: &AnalysisInput) -> [&'static str; 3] {
    [
        if input.above_200 {
            "Price structure remains above 200DMA (macro trend supportive)."
        } else {
            "Price below 200DMA (trend risk elevated)."
        },
        if input.bullish_signal {
            "Bullish crossover is active; momentum confirmation exists."
        } else {
            "No bullish crossover; wait for setup confirmation."
        },
        RsiBand::from_rsi(input.rsi).sentence(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{FormData, Regime};
    use chrono::TimeZone;
    use quantamental_engine::QuantamentalEngine;

    fn sample_input() -> AnalysisInput {
        let form = FormData::from_pairs(
            "company=Acme Corp\nticker=ACME\nindustry=Industrials\nregion=US\n\
             price=100\nsectorPe=20\nfpe=15\nrevGrowth=10\nepsGrowth=15\n\
             relativeGrowth=2\nindustryGrowth=5\nroic=20\nopMargin=25\nconversion=80\n\
             debtEbitda=2\nabove200=yes\nbullishSignal=yes\nrsi=55\nvolatility=20\n\
             guidance=7\ndataConfidence=6",
        )
        .unwrap();
        AnalysisInput::from_form(&form).unwrap()
    }

    fn build(input: &AnalysisInput) -> Report {
        let analysis = QuantamentalEngine::new().analyze(input).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        ReportBuilder::default().build(input, &analysis, at)
    }

    #[test]
    fn test_report_has_five_sections() {
        let report = build(&sample_input());
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Company",
                "Fundamental Health",
                "Technicals & Trading Plan",
                "Forward Price Forecast (Guidance-Adjusted)",
                "Executive Quantamental Narrative",
            ]
        );
        assert_eq!(report.analysis.regime, Regime::Watchlist);
        assert_eq!(report.tier, ConvictionTier::Bad);
    }

    #[test]
    fn test_company_section_lines() {
        let report = build(&sample_input());
        let company = report.section("Company").unwrap();
        assert_eq!(company.headline.as_deref(), Some("Acme Corp (ACME)"));
        assert_eq!(company.lines[0], "Industrials · US");
        assert_eq!(company.lines[1], "Valuation Status: Undervalued (25.00% vs sector P/E).");
        assert_eq!(company.lines[2], "Primary Recommendation: Watchlist / Neutral [bad].");
        assert_eq!(company.lines[3], "AI Confidence Score: 49.64/100.");
    }

    #[test]
    fn test_trading_plan_uses_two_decimals() {
        let report = build(&sample_input());
        let plan = report.section("Technicals & Trading Plan").unwrap();
        assert_eq!(plan.headline.as_deref(), Some("64.00"));
        assert_eq!(plan.lines[0], "Discounted entry zone: $88.89.");
        assert_eq!(plan.lines[1], "Risk control (stop): $78.22.");
        assert_eq!(plan.lines[3], "Supports: $93.00 / $86.00.");
        assert_eq!(plan.lines[4], "Resistances: $111.00 / $124.00.");

        let forecast = report.section("Forward Price Forecast (Guidance-Adjusted)").unwrap();
        assert_eq!(forecast.headline.as_deref(), Some("$138.26 (3Y target)"));
        assert_eq!(forecast.lines[0], "12M fair value: $110.90.");
    }

    #[test]
    fn test_currency_symbol() {
        let input = sample_input();
        let analysis = QuantamentalEngine::new().analyze(&input).unwrap();
        let report = ReportBuilder::new("€").build(&input, &analysis, Utc::now());
        let plan = report.section("Technicals & Trading Plan").unwrap();
        assert_eq!(plan.lines[3], "Supports: €93.00 / €86.00.");
    }

    #[test]
    fn test_narrative_branches() {
        let report = build(&sample_input());
        let narrative = report.section("Executive Quantamental Narrative").unwrap();
        assert!(narrative.headline.is_none());
        assert!(narrative.lines[0].contains("moderate expansion potential"));
        assert!(narrative.lines[1].contains("market share gains"));
        assert_eq!(
            narrative.lines[2],
            "Guidance confidence (7/10) and data confidence (6/10) are integrated as Bayesian-style conviction boosts for scenario calibration."
        );

        let strong = AnalysisInput {
            rev_growth: 30.0,
            eps_growth: 25.0,
            relative_growth: -1.0,
            ..sample_input()
        };
        let report = build(&strong);
        let narrative = report.section("Executive Quantamental Narrative").unwrap();
        assert!(narrative.lines[0].contains("strong compounding potential"));
        assert!(narrative.lines[1].contains("competitive pressure"));
    }

    #[test]
    fn test_signal_sentences() {
        let bullish = signal_sentences(&sample_input());
        assert!(bullish[0].contains("remains above 200DMA"));
        assert!(bullish[1].starts_with("Bullish crossover is active"));
        assert!(bullish[2].starts_with("RSI is balanced"));

        let bearish = signal_sentences(&AnalysisInput {
            above_200: false,
            bullish_signal: false,
            rsi: 78.0,
            ..sample_input()
        });
        assert_eq!(bearish[0], "Price below 200DMA (trend risk elevated).");
        assert_eq!(bearish[1], "No bullish crossover; wait for setup confirmation.");
        assert!(bearish[2].contains("overbought"));

        let oversold = signal_sentences(&AnalysisInput {
            rsi: 28.0,
            ..sample_input()
        });
        assert!(oversold[2].contains("oversold"));
    }
}
