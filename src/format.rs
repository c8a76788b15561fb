//! Text formatting shared by notifications, the command line and exports.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use unicode_segmentation::UnicodeSegmentation;

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$5.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let formatter = if number < 0.0 {
        NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"))
    } else {
        POSITIVE_FMT.get_or_init(|| currency_formatter("$"))
    };

    let magnitude = number.abs();

    // Zero is hardcoded as "0" by numfmt, so we must specify the formatted string for zero
    let mut formatted_string = match formatter {
        _ if magnitude == 0.0 => "$0.00".to_owned(),
        Some(formatter) => formatter.fmt_string(magnitude),
        None => format!("{}${magnitude:.2}", if number < 0.0 { "-" } else { "" }),
    };

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        Some(point) => {
            let decimals = formatted_string.len() - point - 1;
            for _ in decimals..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}

fn currency_formatter(prefix: &str) -> Option<Formatter> {
    match Formatter::currency(prefix) {
        Ok(formatter) => Some(formatter.precision(Precision::Decimals(2))),
        Err(error) => {
            tracing::error!("Could not create currency formatter for \"{prefix}\": {error:?}");
            None
        }
    }
}

/// Format a percentage with one decimal place and an explicit sign, e.g. "+12.5%".
pub fn format_percent_change(percent: f64) -> String {
    format!("{percent:+.1}%")
}

/// Shorten `text` to at most `max_graphemes` user-perceived characters,
/// replacing the cut-off tail with "...".
pub fn truncate_graphemes(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();

    if graphemes.len() <= max_graphemes {
        return text.to_owned();
    }

    let keep = max_graphemes.saturating_sub(3);
    format!("{}...", graphemes[..keep].concat())
}


#[cfg(test)]
mod truncate_tests {
    use crate::format::{format_percent_change, truncate_graphemes};

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_graphemes("Cafe", 10), "Cafe");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_graphemes("United Airlines", 10), "United ...");
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        let text = "🇳🇿🇳🇿🇳🇿🇳🇿🇳🇿";

        assert_eq!(truncate_graphemes(text, 5), text);
        assert_eq!(truncate_graphemes(text, 4), "🇳🇿...");
    }

    #[test]
    fn percent_change_has_sign() {
        assert_eq!(format_percent_change(12.345), "+12.3%");
        assert_eq!(format_percent_change(-4.0), "-4.0%");
        assert_eq!(format_percent_change(0.0), "+0.0%");
    }
}
