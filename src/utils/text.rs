use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_text_unicode(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Collapse line breaks and runs of whitespace into single spaces.
///
/// `artist_display` and `inscriptions` arrive as multi-line text.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_unicode() {
        assert_eq!(truncate_text_unicode("Water Lilies", 20), "Water Lilies");
        assert_eq!(truncate_text_unicode("Water Lilies", 8), "Water...");
        // wide characters count double
        assert_eq!(truncate_text_unicode("葛飾北斎の富嶽三十六景", 9), "葛飾北...");
        assert_eq!(truncate_text_unicode("Nighthawks", 2), "..");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(
            single_line("Edward Hopper\nAmerican,  1882–1967"),
            "Edward Hopper American, 1882–1967"
        );
        assert_eq!(single_line("  "), "");
    }
}
