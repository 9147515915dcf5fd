//! Unicode utilities for text display.
//!
//! Previews and table columns are cut at grapheme cluster boundaries so
//! that combined characters (emoji with modifiers, accents) stay intact.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use refine_rs::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// # Arguments
///
/// * `s` - The string to truncate.
/// * `max_graphemes` - Maximum number of grapheme clusters.
///
/// # Returns
///
/// A string slice containing at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let end_byte = s
        .grapheme_indices(true)
        .nth(max_graphemes)
        .map_or(s.len(), |(byte, _)| byte);
    &s[..end_byte]
}

/// Byte offset of the `chars`-th character of `s`, or `s.len()` if `s`
/// has no more than `chars` characters.
///
/// # Examples
///
/// ```
/// use refine_rs::io::unicode::char_byte_offset;
///
/// assert_eq!(char_byte_offset("héllo", 2), 3);
/// assert_eq!(char_byte_offset("héllo", 9), 6);
/// ```
#[must_use]
pub fn char_byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_byte_offset() {
        assert_eq!(char_byte_offset("", 0), 0);
        assert_eq!(char_byte_offset("abc", 0), 0);
        assert_eq!(char_byte_offset("abc", 3), 3);
        assert_eq!(char_byte_offset("世界!", 1), 3);
        assert_eq!(char_byte_offset("世界!", 2), 6);
        assert_eq!(char_byte_offset("世界!", 10), 7);
    }

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("Hello"), 5);
        assert_eq!(grapheme_count("世界"), 2);
        assert_eq!(grapheme_count(""), 0);
        // Flag emoji is two code points but one grapheme
        assert_eq!(grapheme_count("🇳🇴"), 1);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello", 3), "Hel");
        assert_eq!(truncate_graphemes("世界!", 2), "世界");
        assert_eq!(truncate_graphemes("Hello", 10), "Hello");
        assert_eq!(truncate_graphemes("Hello", 0), "");
    }

    #[test]
    fn test_truncate_keeps_clusters_whole() {
        let s = "e\u{301}x";
        assert_eq!(truncate_graphemes(s, 1), "e\u{301}");
    }
}
