//! Text measurement and truncation.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        let with_ellipsis = format!("{out}…");
        if estimate_text_width_px(&with_ellipsis, font_px) > max_px {
            out.pop();
            break;
        }
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
        assert_eq!(truncate_to_width("India", 13, 100), "India");
    }

    #[test]
    fn long_text_gets_one_ellipsis() {
        let t = truncate_to_width("Distribución por Continente", 12, 80);
        assert!(t.ends_with('…'));
        assert_eq!(t.matches('…').count(), 1);
        assert!(estimate_text_width_px(&t, 12) <= 80);
    }

    #[test]
    fn nothing_fits() {
        assert_eq!(truncate_to_width("México", 13, 4), "");
    }
}
