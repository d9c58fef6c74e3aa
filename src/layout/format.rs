//! Number formatting for tick and value labels.

use super::config::NumberFormat;
use num_format::{Locale, ToFormattedString};

/// Grouping locale and decimal mark for `ChartConfig::locale`.
///
/// Tags are matched without case and with `-` or `_` as the region separator
/// (`de`, `de-DE`, `fr_FR`, ...). Unknown tags format like English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    let lang = tag
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let locale = match lang.as_str() {
        "de" | "german" => &Locale::de,
        "fr" => &Locale::fr,
        "es" => &Locale::es,
        "it" => &Locale::it,
        "pt" => &Locale::pt,
        "nl" => &Locale::nl,
        _ => return (&Locale::en, '.'),
    };
    (locale, ',')
}

/// Decimals needed to tell ticks `step` apart: 10 → 0, 0.5 → 1, 0.25 → 2.
pub fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let mut decimals = (-step.log10().floor()).max(0.0) as usize;
    // 1/2/5 steps are covered by the exponent alone; anything finer needs more.
    while decimals < 12 {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() < 1e-9 {
            break;
        }
        decimals += 1;
    }
    decimals
}

/// Fixed-point rendering with optional locale grouping of the integer part.
pub fn format_fixed(v: f64, decimals: usize, grouping: bool, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let plain = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let int_str = match int_part.parse::<u64>() {
        Ok(n) if grouping => n.to_formatted_string(locale),
        _ => int_part.to_string(),
    };

    let is_zero = plain.chars().all(|c| c == '0' || c == '.');
    let mut out = String::with_capacity(plain.len() + 4);
    if v < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&int_str);
    if let Some(frac) = frac_part {
        out.push(dec_sep);
        out.push_str(frac);
    }
    out
}

/// Render `v` per `fmt`. `step` is the tick spacing used for automatic precision;
/// without it, automatic precision means "as many decimals as the value needs, up to 2".
pub fn format_value(fmt: &NumberFormat, v: f64, step: Option<f64>, locale_tag: &str) -> String {
    let decimals = match (fmt.decimals, step) {
        (Some(d), _) => d,
        (None, Some(s)) => precision_for_step(s),
        (None, None) => (0..=2usize)
            .find(|d| {
                let scaled = v * 10f64.powi(*d as i32);
                (scaled - scaled.round()).abs() < 1e-9
            })
            .unwrap_or(2),
    };
    let mut s = format_fixed(v, decimals, fmt.grouping, locale_tag);
    s.push_str(&fmt.suffix);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_follows_locale() {
        assert_eq!(format_fixed(30000.0, 0, true, "en"), "30,000");
        assert_eq!(format_fixed(30000.5, 1, true, "de"), "30.000,5");
        assert_eq!(format_fixed(2020.0, 0, false, "en"), "2020");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_fixed(-0.001, 1, true, "en"), "0.0");
        assert_eq!(format_fixed(-5.0, 0, true, "en"), "-5");
    }

    #[test]
    fn precision_from_step() {
        assert_eq!(precision_for_step(10.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.2), 1);
        assert_eq!(precision_for_step(0.05), 2);
    }

    #[test]
    fn locale_tags_ignore_region_and_case() {
        assert_eq!(format_fixed(1234.5, 1, true, "DE-de"), "1.234,5");
        assert_eq!(format_fixed(1234.5, 1, true, "xx"), "1,234.5");
    }

    #[test]
    fn auto_precision_without_step() {
        let auto = NumberFormat::default();
        assert_eq!(format_value(&auto, 5.48, None, "en"), "5.48");
        assert_eq!(format_value(&auto, 4.5, None, "en"), "4.5");
        assert_eq!(format_value(&auto, 2020.0, None, "en"), "2,020");
        assert_eq!(format_value(&auto, 1.0 / 3.0, None, "en"), "0.33");
    }

    #[test]
    fn value_format_with_suffix() {
        let fmt = NumberFormat::fixed(1).with_suffix("%");
        assert_eq!(format_value(&fmt, 231.3, None, "en"), "231.3%");
        let auto = NumberFormat::default();
        assert_eq!(format_value(&auto, 250.0, Some(50.0), "en"), "250");
        assert_eq!(format_value(&auto, 4.5, Some(0.5), "en"), "4.5");
    }
}
