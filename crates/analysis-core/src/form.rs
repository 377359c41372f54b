//! Form Input Collector
//!
//! Turns raw submitted form values into a typed [`AnalysisInput`]. Identifier fields
//! pass through untouched, the two trend flags use a `"yes"` sentinel, and every other
//! field must parse as a finite number.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{AnalysisError, AnalysisInput};

/// Value a boolean form field must carry to count as set.
pub const YES: &str = "yes";

/// Raw form submission: field name to raw text value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field under its canonical form name, so a snake_case alias and its
    /// camelCase name always address the same slot.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let key = match canonical_key(&key) {
            Some(name) => name.to_string(),
            None => key,
        };
        self.fields.insert(key, value.into());
    }

    /// Accepts either the form name or its snake_case alias.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = canonical_key(key).unwrap_or(key);
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Later values win, so this doubles as an override mechanism.
    pub fn merge(&mut self, other: FormData) {
        self.fields.extend(other.fields);
    }

    /// Parse a single `key=value` pair.
    pub fn parse_pair(pair: &str) -> Result<(String, String), AnalysisError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| AnalysisError::Parse(format!("expected key=value, got {:?}", pair)))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AnalysisError::Parse(format!("empty key in {:?}", pair)));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }

    /// Parse `key=value` lines. Blank lines and `#` comments are skipped.
    pub fn from_pairs(text: &str) -> Result<Self, AnalysisError> {
        let mut form = FormData::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = Self::parse_pair(line)?;
            form.insert(key, value);
        }
        Ok(form)
    }

    /// Parse a flat JSON object. Numbers are kept as their textual form and
    /// JSON booleans become `"yes"` / `"no"`.
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(text)?;
        let object = value
            .as_object()
            .ok_or_else(|| AnalysisError::Parse("expected a JSON object of form fields".to_string()))?;

        let mut form = FormData::new();
        for (key, value) in object {
            let raw = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => YES.to_string(),
                Value::Bool(false) => "no".to_string(),
                Value::Null => continue,
                other => {
                    return Err(AnalysisError::Parse(format!(
                        "field {} must be a string, number or boolean, got {}",
                        key, other
                    )))
                }
            };
            form.insert(key.clone(), raw);
        }
        Ok(form)
    }

    fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name) == Some(YES)
    }

    fn number(&self, name: &str) -> Result<f64, AnalysisError> {
        let raw = self
            .get(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AnalysisError::MissingField(name.to_string()))?;

        let value: f64 = raw.parse().map_err(|_| AnalysisError::InvalidNumber {
            field: name.to_string(),
            value: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(AnalysisError::NonFinite(name.to_string()));
        }
        Ok(value)
    }
}

impl FromIterator<(String, String)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (key, value) in iter {
            form.insert(key, value);
        }
        form
    }
}

/// Text fields copied verbatim.
pub const TEXT_FIELDS: [&str; 4] = ["company", "ticker", "industry", "region"];

/// Boolean fields as `(form name, snake_case alias)`.
pub const FLAG_FIELDS: [(&str, &str); 2] = [("above200", "above_200"), ("bullishSignal", "bullish_signal")];

/// Numeric fields as `(form name, snake_case alias)`.
pub const NUMERIC_FIELDS: [(&str, &str); 15] = [
    ("price", "price"),
    ("sectorPe", "sector_pe"),
    ("fpe", "fpe"),
    ("revGrowth", "rev_growth"),
    ("epsGrowth", "eps_growth"),
    ("relativeGrowth", "relative_growth"),
    ("industryGrowth", "industry_growth"),
    ("roic", "roic"),
    ("opMargin", "op_margin"),
    ("conversion", "conversion"),
    ("debtEbitda", "debt_ebitda"),
    ("rsi", "rsi"),
    ("volatility", "volatility"),
    ("guidance", "guidance"),
    ("dataConfidence", "data_confidence"),
];

/// Form name for a flag or numeric field given either spelling.
fn canonical_key(key: &str) -> Option<&'static str> {
    FLAG_FIELDS
        .iter()
        .chain(NUMERIC_FIELDS.iter())
        .find(|(name, alias)| key == *name || key == *alias)
        .map(|(name, _)| *name)
}

fn is_known_field(key: &str) -> bool {
    TEXT_FIELDS.contains(&key) || canonical_key(key).is_some()
}

impl AnalysisInput {
    /// Collect a typed input from a raw form and validate it.
    pub fn from_form(form: &FormData) -> Result<Self, AnalysisError> {
        for key in form.fields.keys().filter(|k| !is_known_field(k)) {
            tracing::debug!(field = %key, "Ignoring unknown form field");
        }

        let num = |(name, _): (&str, &str)| form.number(name);
        let [price, sector_pe, fpe, rev_growth, eps_growth, relative_growth, industry_growth, roic, op_margin, conversion, debt_ebitda, rsi, volatility, guidance, data_confidence] =
            NUMERIC_FIELDS;

        let input = AnalysisInput {
            company: form.text("company"),
            ticker: form.text("ticker"),
            industry: form.text("industry"),
            region: form.text("region"),
            price: num(price)?,
            sector_pe: num(sector_pe)?,
            fpe: num(fpe)?,
            rev_growth: num(rev_growth)?,
            eps_growth: num(eps_growth)?,
            relative_growth: num(relative_growth)?,
            industry_growth: num(industry_growth)?,
            roic: num(roic)?,
            op_margin: num(op_margin)?,
            conversion: num(conversion)?,
            debt_ebitda: num(debt_ebitda)?,
            above_200: form.flag(FLAG_FIELDS[0].0),
            bullish_signal: form.flag(FLAG_FIELDS[1].0),
            rsi: num(rsi)?,
            volatility: num(volatility)?,
            guidance: num(guidance)?,
            data_confidence: num(data_confidence)?,
        };
        input.validate()?;

        tracing::debug!(ticker = %input.ticker, "Collected analysis input from form");
        Ok(input)
    }
}
