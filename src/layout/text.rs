//! Text measurement and truncation for labels placed by the layout.

/// Average sans-serif advance, as a share of the font size.
const ADVANCE_EM: f64 = 0.6;

/// Approximate rendered width of a label. Renderers emit plain `<text>`, so the
/// layout never sees real glyph metrics.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let advance = f64::from(font_px) * ADVANCE_EM;
    (text.chars().count() as f64 * advance).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        return String::new();
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("848180", 12, 80), "848180");
    }

    #[test]
    fn long_text_gets_one_ellipsis() {
        let s = truncate_to_width("Transmission Shafts (HS 848310)", 12, 70);
        assert!(s.ends_with('…'));
        assert_eq!(s.matches('…').count(), 1);
        assert!(estimate_text_width_px(&s, 12) <= 70);
    }

    #[test]
    fn nothing_fits() {
        assert_eq!(truncate_to_width("abc", 12, 5), "");
    }
}
