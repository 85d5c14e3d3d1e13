use std::sync::OnceLock;

use regex::Regex;

/// Trailing attribution: a dash-like separator followed by a name, or an `@handle`.
///
/// Capture 3 is the name, capture 4 the handle.
static ATTRIBUTION_PATTERN: OnceLock<Regex> = OnceLock::new();

/// A suffix is only treated as attribution when it is shorter than this share of the quote.
pub const MAX_ATTRIBUTION_SHARE: f64 = 0.7;

fn attribution_pattern() -> &'static Regex {
    ATTRIBUTION_PATTERN.get_or_init(|| {
        Regex::new(r"\s*((--|—|-)\s*([\w\s.'’()-]+)|(@[a-zA-Z0-9_]+))$")
            .expect("attribution pattern is a valid constant regex")
    })
}

/// A quote split into its statement and optional attribution.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuote {
    pub main_quote: String,
    /// `"- Name"`, `"@handle"`, or empty.
    pub attribution: String,
}

impl ParsedQuote {
    /// Nothing is drawn for an empty quote.
    pub fn is_empty(&self) -> bool {
        self.main_quote.is_empty() && self.attribution.is_empty()
    }

    pub fn has_attribution(&self) -> bool {
        !self.attribution.is_empty()
    }
}

/// Split `quote` into statement and attribution.
///
/// Never fails: anything the pattern or the length heuristic rejects is returned whole as the
/// statement.
pub fn parse_quote(quote: &str) -> ParsedQuote {
    let full = quote.trim();
    let whole = || ParsedQuote {
        main_quote: full.to_string(),
        attribution: String::new(),
    };

    let Some(caps) = attribution_pattern().captures(full) else {
        return whole();
    };
    let Some(m) = caps.get(0) else {
        return whole();
    };

    let total_len = full.chars().count() as f64;
    let suffix_len = m.as_str().chars().count() as f64;
    if m.start() == 0 || suffix_len >= total_len * MAX_ATTRIBUTION_SHARE {
        return whole();
    }

    let attribution = if let Some(name) = caps.get(3) {
        format!("- {}", name.as_str().trim())
    } else if let Some(handle) = caps.get(4) {
        handle.as_str().trim().to_string()
    } else {
        String::new()
    };

    ParsedQuote {
        main_quote: full[..m.start()].trim().to_string(),
        attribution,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quote/attribution.rs"]
mod tests;
