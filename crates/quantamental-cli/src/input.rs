use std::io::Read;
use std::path::Path;

use analysis_core::FormData;
use anyhow::{Context, Result};

/// Load a form from `path`, or from stdin when `path` is `-`.
///
/// `.json` files (and stdin starting with `{`) are parsed as a JSON object,
/// anything else as `key=value` lines.
pub fn load_form(path: &Path) -> Result<FormData> {
    let (text, json_hint) = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read form from stdin")?;
        (text, false)
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read form file {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        (text, is_json)
    };

    tracing::debug!(path = %path.display(), json = json_hint, "Loading form");
    parse_form(&text, json_hint).with_context(|| format!("failed to parse form {}", path.display()))
}

pub fn parse_form(text: &str, json_hint: bool) -> Result<FormData> {
    let form = if json_hint || text.trim_start().starts_with('{') {
        FormData::from_json(text)?
    } else {
        FormData::from_pairs(text)?
    };
    Ok(form)
}
