//! Display-width text helpers for fixed-width terminal views.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates text to the provided display width, appending an ellipsis.
///
/// Width is measured in terminal columns, not Unicode scalar count, so
/// wide characters are not cut in half. Text that already fits is
/// returned unchanged; a width of three or fewer columns degrades to a
/// dot run because the ellipsis itself would not fit.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(3);
    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += char_width;
    }
    format!("{truncated}...")
}

/// Returns the first line of the text, trimmed.
///
/// Multi-line bios collapse to their opening line in the card view.
pub(crate) fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly ten", 11, "exactly ten")]
    #[case("a longer sentence", 10, "a longe...")]
    #[case("anything", 0, "")]
    #[case("anything", 2, "..")]
    fn truncate_respects_display_width(
        #[case] text: &str,
        #[case] max_width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate_to_width(text, max_width), expected);
    }

    #[rstest]
    fn truncate_does_not_split_wide_characters() {
        let text = "日本語テキスト";

        let truncated = truncate_to_width(text, 9);

        assert_eq!(truncated, "日本語...");
    }

    #[rstest]
    #[case("one line", "one line")]
    #[case("first\nsecond", "first")]
    #[case("  padded  \nrest", "padded")]
    #[case("", "")]
    fn first_line_takes_trimmed_opening_line(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(first_line(text), expected);
    }
}
