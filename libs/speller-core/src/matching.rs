//! Guess matching for spoken and typed answers.
//!
//! A guess is correct when it equals the answer after normalization. There is
//! no partial credit and no edit-distance tolerance.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Result of comparing a guess to the correct spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// Whether the guess is considered correct.
    pub is_correct: bool,
    /// Normalized guess (for display).
    pub guess_normalized: String,
    /// Normalized answer (for display).
    pub answer_normalized: String,
}

/// Canonicalize free-form text for comparison.
///
/// Trims, straightens curly quotes, collapses whitespace runs, lowercases,
/// decomposes to NFD and drops combining diacritical marks (U+0300..U+036F).
/// Total for every input; the empty string maps to itself.
pub fn normalize_for_compare(value: &str) -> String {
    let straightened: String = value
        .trim_matches(is_space)
        .chars()
        .map(straighten_quote)
        .collect();
    let lowered = collapse_whitespace(&straightened).to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    // A mark sitting between two spaces leaves a double space once removed,
    // and a removed U+034F can leave the remaining marks out of canonical order.
    collapse_whitespace(&stripped).nfd().collect()
}

/// Whether `guess` spells `answer`.
pub fn is_correct_guess(guess: &str, answer: &str) -> bool {
    normalize_for_compare(guess) == normalize_for_compare(answer)
}

/// Compare a guess to the answer, keeping the normalized forms.
pub fn compare_guess(guess: &str, answer: &str) -> GuessResult {
    let guess_normalized = normalize_for_compare(guess);
    let answer_normalized = normalize_for_compare(answer);

    GuessResult {
        is_correct: guess_normalized == answer_normalized,
        guess_normalized,
        answer_normalized,
    }
}

/// Locale-style string ordering used to break ties between words.
///
/// Letters compare case- and accent-insensitively first; then unaccented
/// sorts before accented, then lowercase before uppercase. Falls back to code
/// point order so the result is a total order.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| decomposed_lower(a).cmp(&decomposed_lower(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn straighten_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        other => other,
    }
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Whitespace as browsers and speech recognizers emit it: ASCII blanks,
/// Unicode space separators, line/paragraph separators and the BOM.
/// U+0085 is not included.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Trim and collapse whitespace runs to a single space.
fn collapse_whitespace(s: &str) -> String {
    s.split(is_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decomposed_lower(s: &str) -> String {
    s.to_lowercase().nfd().collect()
}

fn fold(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trims_lowercases_collapses_whitespace() {
        assert_eq!(normalize_for_compare("  Hello   World  "), "hello world");
        assert_eq!(normalize_for_compare("a\t\n b"), "a b");
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert_eq!(normalize_for_compare("\u{FEFF}bee\u{FEFF}"), "bee");
        assert_eq!(normalize_for_compare("ice\u{3000}\u{A0}cream"), "ice cream");
        assert!(is_correct_guess("\u{FEFF}bee", "bee"));
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert_eq!(normalize_for_compare("a\u{85}b"), "a\u{85}b");
        assert!(!is_correct_guess("a\u{85}b", "a b"));
    }

    #[test]
    fn test_removes_diacritics() {
        assert_eq!(normalize_for_compare("señor"), "senor");
        assert_eq!(normalize_for_compare("Crème Brûlée"), "creme brulee");
        // Already decomposed input.
        assert_eq!(normalize_for_compare("cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_straightens_quotes() {
        assert_eq!(normalize_for_compare("don\u{2019}t"), "don't");
        assert_eq!(normalize_for_compare("\u{2018}hi\u{2019}"), "'hi'");
        assert_eq!(normalize_for_compare("\u{201C}Bee\u{201D}"), "\"bee\"");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_for_compare(""), "");
        assert_eq!(normalize_for_compare("   \t "), "");
    }

    #[test]
    fn test_stray_marks_do_not_leave_extra_spaces() {
        assert_eq!(normalize_for_compare("a \u{301} b"), "a b");
        assert_eq!(normalize_for_compare("\u{301} a"), "a");
    }

    #[test]
    fn test_correct_guesses() {
        assert!(is_correct_guess("February", "february"));
        assert!(is_correct_guess("señor", "senor"));
        assert!(is_correct_guess("senor", "señor"));
        assert!(is_correct_guess("  ice   cream ", "Ice Cream"));
        assert!(is_correct_guess("it\u{2019}s", "it's"));
    }

    #[test]
    fn test_incorrect_guesses() {
        assert!(!is_correct_guess("window", "widow"));
        assert!(!is_correct_guess("", "bee"));
        assert!(!is_correct_guess("icecream", "ice cream"));
    }

    #[test]
    fn test_compare_guess_keeps_normalized_forms() {
        let result = compare_guess(" Señor ", "senor");
        assert_eq!(
            result,
            GuessResult {
                is_correct: true,
                guess_normalized: "senor".to_string(),
                answer_normalized: "senor".to_string(),
            }
        );

        let result = compare_guess("widow", "window");
        assert!(!result.is_correct);
    }

    #[test]
    fn test_collate_ignores_case_first() {
        assert_eq!(collate("bee", "cat"), Ordering::Less);
        assert_eq!(collate("Apple", "banana"), Ordering::Less);
        assert_eq!(collate("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_collate_tie_breaks() {
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("resume", "résumé"), Ordering::Less);
        assert_eq!(collate("résumé", "Resume"), Ordering::Greater);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }
}
