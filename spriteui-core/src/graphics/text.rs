// SPDX-License-Identifier: MIT OR Apache-2.0

/// Options for [wrap_lines].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapOptions {
    /// Break words that are wider than the line on their own.
    pub split_long_words: bool,
    /// Keep empty lines of the input as empty output lines.
    pub keep_blank_lines: bool,
}

impl WrapOptions {
    /// Enable or disable splitting of over-wide words.
    pub fn with_split_long_words(mut self, split: bool) -> Self {
        self.split_long_words = split;
        self
    }

    /// Enable or disable keeping blank lines.
    pub fn with_keep_blank_lines(mut self, keep: bool) -> Self {
        self.keep_blank_lines = keep;
        self
    }
}

/// Wrap `text` into lines no wider than `max_width` according to `measure`.
///
/// Explicit line breaks in `text` always start a new line. Words are
/// separated by spaces; a word wider than `max_width` is kept whole on its
/// own line unless [WrapOptions::split_long_words] is set.
pub fn wrap_lines<F>(text: &str, max_width: f32, options: WrapOptions, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            if options.keep_blank_lines {
                lines.push(String::new());
            }
            continue;
        }

        let mut line = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };

            if measure(&candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if measure(word) <= max_width || !options.split_long_words {
                line = word.to_string();
                continue;
            }

            for piece in split_word(word, max_width, &measure) {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                line = piece;
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

fn split_word<F>(word: &str, max_width: f32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for c in word.chars() {
        piece.push(c);
        // A single glyph wider than the line still has to go somewhere.
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        let lines = wrap_lines("the quick brown fox", 100.0, WrapOptions::default(), measure);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_long_words_kept_whole_by_default() {
        let lines = wrap_lines("a abcdefghijkl b", 50.0, WrapOptions::default(), measure);
        assert_eq!(lines, vec!["a", "abcdefghijkl", "b"]);
    }

    #[test]
    fn test_long_words_split_when_requested() {
        let options = WrapOptions::default().with_split_long_words(true);
        let lines = wrap_lines("abcdefghijkl", 50.0, options, measure);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_blank_lines() {
        let text = "one\n\ntwo";
        assert_eq!(
            wrap_lines(text, 100.0, WrapOptions::default(), measure),
            vec!["one", "two"]
        );
        assert_eq!(
            wrap_lines(text, 100.0, WrapOptions::default().with_keep_blank_lines(true), measure),
            vec!["one", "", "two"]
        );
    }
}
