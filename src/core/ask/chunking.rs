//! Fixed-width splitting of long answers into Discord-sized messages.
//!
//! Splits happen on a plain character count with no attempt to find word or
//! line boundaries. Counting is done in `char`s so a multi-byte code point is
//! never cut in half.

/// Discord's hard limit for a single message.
pub const MESSAGE_CHUNK_LIMIT: usize = 2000;

/// Slash-command answers leave room for the question header on the first message.
pub const SLASH_CHUNK_LIMIT: usize = 1950;

/// Splits `text` into ordered segments of at most `limit` characters.
///
/// Concatenating the result always gives back `text`. Text that already fits
/// (including the empty string) comes back as a single segment.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);

    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    text.chars()
        .collect::<Vec<char>>()
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_segment() {
        assert_eq!(chunk_text("hello", 2000), vec!["hello".to_string()]);
        assert_eq!(chunk_text("", 2000), vec![String::new()]);
    }

    #[test]
    fn text_exactly_at_limit_is_not_split() {
        let text = "a".repeat(MESSAGE_CHUNK_LIMIT);
        let chunks = chunk_text(&text, MESSAGE_CHUNK_LIMIT);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn long_text_splits_into_ceil_segments_without_loss() {
        for len in [2001usize, 3000, 4000, 4001, 9999] {
            let text: String = (0..len)
                .map(|i| char::from(b'a' + (i % 26) as u8))
                .collect();
            let chunks = chunk_text(&text, MESSAGE_CHUNK_LIMIT);

            assert_eq!(chunks.len(), len.div_ceil(MESSAGE_CHUNK_LIMIT), "len {len}");
            assert!(chunks
                .iter()
                .all(|c| c.chars().count() <= MESSAGE_CHUNK_LIMIT));
            assert_eq!(chunks.concat(), text);
        }
    }

    #[test]
    fn splits_on_fixed_boundaries_not_words() {
        let chunks = chunk_text("hello world", 4);
        assert_eq!(chunks, vec!["hell", "o wo", "rld"]);
    }

    #[test]
    fn multibyte_characters_are_counted_as_one() {
        let text = "é".repeat(5);
        let chunks = chunk_text(&text, 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        assert_eq!(chunk_text("abc", 0), vec!["a", "b", "c"]);
    }
}
