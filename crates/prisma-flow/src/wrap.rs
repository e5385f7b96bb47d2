//! Fixed-width line breaking for box labels.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Breaks `text` into lines of at most `width` characters.
///
/// Lines are filled greedily and break only at spaces; hyphens and other
/// punctuation are never break points and words are never split. A single
/// word longer than `width` is placed on its own line and allowed to
/// overflow. An explicit `\n` always starts a new line. Empty text yields
/// exactly one empty line.
///
/// Width is a count of `char`s, not of display columns: a combining mark
/// counts as one and a wide CJK character counts as one.
///
/// A `width` of zero is treated as one.
///
/// # Examples
///
/// ```
/// # use prisma_flow::wrap::wrap;
/// let lines = wrap("Records after duplicates removed", 20);
/// assert_eq!(lines, vec!["Records after", "duplicates removed"]);
///
/// assert_eq!(wrap("", 10), vec![String::new()]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1))
        .break_words(false)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);

    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap("Records screened (n = 180)", 30), vec![
            "Records screened (n = 180)"
        ]);
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        let lines = wrap("Studies included in qualitative synthesis (n = 15)", 30);
        assert_eq!(lines, vec![
            "Studies included in",
            "qualitative synthesis (n = 15)"
        ]);
    }

    #[test]
    fn test_wrap_never_splits_hyphenated_words() {
        let lines = wrap("Full-text articles", 5);
        assert_eq!(lines, vec!["Full-text", "articles"]);
    }

    #[test]
    fn test_wrap_long_word_overflows_on_its_own_line() {
        let lines = wrap("a supercalifragilistic b", 6);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_honors_explicit_newlines() {
        let lines = wrap("Excluded (n = 35):\nLow quality (n = 10)", 40);
        assert_eq!(lines, vec!["Excluded (n = 35):", "Low quality (n = 10)"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap("", 30), vec![String::new()]);
    }

    #[test]
    fn test_wrap_counts_combining_marks_as_chars() {
        let lines = wrap("e\u{301} e\u{301} e\u{301}", 4);
        assert_eq!(lines, vec!["e\u{301}", "e\u{301}", "e\u{301}"]);
    }

    #[test]
    fn test_wrap_counts_wide_chars_once() {
        let lines = wrap("文献 検索 結果", 5);
        assert_eq!(lines, vec!["文献 検索", "結果"]);
    }

    #[test]
    fn test_wrap_zero_width_is_one() {
        assert_eq!(wrap("a b", 0), wrap("a b", 1));
        assert_eq!(wrap("a b", 0), vec!["a", "b"]);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn check_lines_fit_when_words_fit(words: Vec<String>, width: usize) {
        let text = words.join(" ");
        for line in wrap(&text, width) {
            assert!(
                line.chars().count() <= width,
                "line {line:?} exceeds width {width}"
            );
        }
    }

    fn check_words_preserved_in_order(words: Vec<String>, width: usize) {
        let text = words.join(" ");
        let rewrapped: Vec<String> = wrap(&text, width)
            .iter()
            .flat_map(|line| line.split(' ').map(str::to_string).collect::<Vec<_>>())
            .filter(|word| !word.is_empty())
            .collect();
        assert_eq!(rewrapped, words);
    }

    proptest! {
        #[test]
        fn lines_fit_when_words_fit(
            words in prop::collection::vec("[a-zA-Z0-9()=-]{1,8}", 1..20),
            width in 8usize..40,
        ) {
            check_lines_fit_when_words_fit(words, width);
        }

        #[test]
        fn non_ascii_lines_fit_when_words_fit(
            words in prop::collection::vec("[a-zé漢字\u{301}\u{308}]{1,8}", 1..20),
            width in 8usize..40,
        ) {
            check_lines_fit_when_words_fit(words, width);
        }

        #[test]
        fn words_preserved_in_order(
            words in prop::collection::vec("[a-zA-Z0-9()=-]{1,12}", 1..20),
            width in 1usize..40,
        ) {
            check_words_preserved_in_order(words, width);
        }
    }
}
