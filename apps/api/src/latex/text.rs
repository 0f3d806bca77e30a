//! Small formatting primitives shared by the preamble and block renderers:
//! user-text handling, length literals, dates, and the theme color.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Shown in the last-updated stamp when the CV carries no date.
pub const FALLBACK_LAST_UPDATED: &str = "September 2024";

/// Used when the theme color is blank.
const DEFAULT_THEME_HEX: &str = "004F90";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ────────────────────────────────────────────────────────────────────────────
// Render options
// ────────────────────────────────────────────────────────────────────────────

/// How user text is spliced into the document.
///
/// The default is passthrough: titles, bullets and the rest go in verbatim,
/// so users can write raw LaTeX (and can also break the document with a
/// stray `%` or `&`). `escape_text` turns on escaping of the LaTeX specials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RenderOptions {
    #[serde(default, rename = "escape")]
    pub escape_text: bool,
}

impl RenderOptions {
    pub fn escaped() -> Self {
        Self { escape_text: true }
    }

    /// User text destined for a typeset position.
    pub fn text<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.escape_text {
            escape_latex(s)
        } else {
            Cow::Borrowed(s)
        }
    }

    /// User text destined for a hyperlink target.
    pub fn url<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.escape_text {
            escape_url(s)
        } else {
            Cow::Borrowed(s)
        }
    }
}

/// Escapes the ten LaTeX special characters.
pub fn escape_latex(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '{', '}', '$', '&', '#', '%', '_', '^', '~']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '{' | '}' | '$' | '&' | '#' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// hyperref reads URLs mostly verbatim; only these break its argument parsing.
pub fn escape_url(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '#', '%', '{', '}']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if matches!(c, '\\' | '#' | '%' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

// ────────────────────────────────────────────────────────────────────────────
// Numbers, dates, colors
// ────────────────────────────────────────────────────────────────────────────

/// A centimeter value as a shortest decimal literal (`2`, `0.4`).
/// Negative and non-finite inputs collapse to `0`.
pub fn length(cm: f64) -> String {
    if cm.is_finite() && cm > 0.0 {
        format!("{cm}")
    } else {
        "0".to_string()
    }
}

/// `March 2024`. Independent of the host locale.
pub fn month_year(date: NaiveDate) -> String {
    format!("{} {:04}", MONTHS[date.month0() as usize], date.year())
}

pub fn optional_month_year(date: Option<NaiveDate>) -> String {
    date.map(month_year).unwrap_or_default()
}

/// The `primaryColor` definition for a theme color setting.
pub fn theme_color_definition(theme: &str) -> String {
    let theme = theme.trim();
    if let Some(hex) = theme.strip_prefix('#') {
        if let Some(hex) = normalize_hex(hex) {
            return format!("\\definecolor{{primaryColor}}{{HTML}}{{{hex}}}");
        }
    }
    let is_color_name = !theme.is_empty()
        && theme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '!' | '-' | '.'));
    if is_color_name {
        format!("\\colorlet{{primaryColor}}{{{theme}}}")
    } else {
        format!("\\definecolor{{primaryColor}}{{HTML}}{{{DEFAULT_THEME_HEX}}}")
    }
}

/// `abc` → `AABBCC`, `004f90` → `004F90`; anything else is rejected.
fn normalize_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(hex.to_ascii_uppercase()),
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_leaves_markup_alone() {
        let opts = RenderOptions::default();
        assert_eq!(opts.text(r"\textbf{50%} & more"), r"\textbf{50%} & more");
    }

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape_latex("R&D: 50% of $1_000"), r"R\&D: 50\% of \$1\_000");
        assert_eq!(
            escape_latex(r"a\b ~ ^"),
            r"a\textbackslash{}b \textasciitilde{} \textasciicircum{}"
        );
        assert!(matches!(escape_latex("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_url_keeps_slashes_and_colons() {
        assert_eq!(
            escape_url("https://x.org/a%20b#frag"),
            r"https://x.org/a\%20b\#frag"
        );
        assert_eq!(escape_url("https://doi.org/10.1/abc"), "https://doi.org/10.1/abc");
    }

    #[test]
    fn test_length_literals() {
        assert_eq!(length(2.0), "2");
        assert_eq!(length(0.4), "0.4");
        assert_eq!(length(0.0), "0");
        assert_eq!(length(-1.5), "0");
        assert_eq!(length(f64::NAN), "0");
    }

    #[test]
    fn test_month_year() {
        let d = NaiveDate::from_ymd_opt(2023, 9, 30).unwrap();
        assert_eq!(month_year(d), "September 2023");
        assert_eq!(optional_month_year(None), "");
    }

    #[test]
    fn test_theme_color_variants() {
        assert_eq!(
            theme_color_definition("#004f90"),
            r"\definecolor{primaryColor}{HTML}{004F90}"
        );
        assert_eq!(
            theme_color_definition("#0af"),
            r"\definecolor{primaryColor}{HTML}{00AAFF}"
        );
        assert_eq!(
            theme_color_definition("NavyBlue"),
            r"\colorlet{primaryColor}{NavyBlue}"
        );
        assert_eq!(
            theme_color_definition(""),
            r"\definecolor{primaryColor}{HTML}{004F90}"
        );
        assert_eq!(
            theme_color_definition("#12345"),
            r"\definecolor{primaryColor}{HTML}{004F90}"
        );
    }
}
