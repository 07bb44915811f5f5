//! Sentence splitting, tokenization, and tag assignment.

use once_cell::sync::Lazy;
use regex::Regex;

/// Morphological tag assigned to a token at tokenization time. Never
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// All characters are digits.
    Digit,
    /// Token carries a non-alphanumeric character ("unusable").
    Unusable,
    /// Length > 1 and every cased character is uppercase.
    Acronym,
    /// First character uppercase, and not the first token of its sentence.
    ProperNoun,
    /// Everything else.
    Plain,
}

impl Tag {
    /// Single-character code for this tag.
    pub fn code(&self) -> char {
        match self {
            Tag::Digit => 'd',
            Tag::Unusable => 'u',
            Tag::Acronym => 'a',
            Tag::ProperNoun => 'n',
            Tag::Plain => 'p',
        }
    }

    /// A token tagged `u` or `d` is invisible to the co-occurrence window
    /// and never forms an edge.
    pub fn is_window_eligible(&self) -> bool {
        !matches!(self, Tag::Unusable | Tag::Digit)
    }
}

/// A single token with positional accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub tag: Tag,
    pub sentence_index: usize,
    pub position_in_doc: usize,
}

/// Split text into sentences of tagged tokens.
///
/// Newlines are folded into spaces before splitting so multi-line input is
/// treated as a single stream; paragraph boundaries carry no meaning.
/// A sentence boundary is `[.!?]` followed by whitespace — a deliberately
/// simple rule. Ambiguous cases like "Dr." or "U.S." are left to downstream
/// validity rules rather than handled by smarter segmentation here.
pub fn tokenize(text: &str) -> Vec<Vec<Token>> {
    static BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

    let normalized = text.replace('\n', " ");
    let mut chunks = Vec::new();
    let mut last_end = 0usize;
    for m in BOUNDARY.find_iter(&normalized) {
        // The regex always starts with a single-byte ASCII `.`/`!`/`?`, so
        // `m.start() + 1` is a valid UTF-8 boundary.
        let punct_end = m.start() + 1;
        chunks.push(&normalized[last_end..punct_end]);
        last_end = m.end();
    }
    if last_end < normalized.len() {
        chunks.push(&normalized[last_end..]);
    }

    let mut sentences = Vec::new();
    let mut doc_position = 0usize;
    let mut sentence_index = 0usize;
    for chunk in chunks {
        let words: Vec<&str> = chunk.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let mut tokens = Vec::with_capacity(words.len());
        for (i, surface) in words.iter().enumerate() {
            let tag = tag_token(surface, i == 0);
            tokens.push(Token {
                surface: surface.to_string(),
                tag,
                sentence_index,
                position_in_doc: doc_position,
            });
            doc_position += 1;
        }
        sentences.push(tokens);
        sentence_index += 1;
    }
    sentences
}

fn tag_token(surface: &str, is_first_in_sentence: bool) -> Tag {
    if !surface.is_empty() && surface.chars().all(|c| c.is_numeric()) {
        return Tag::Digit;
    }
    // Any non-alphanumeric character (section 6: "Unicode-agnostic beyond
    // case folding; any non-alphanumeric character in a token is punctuation
    // for tag `u` purposes").
    if surface.chars().any(|c| !c.is_alphanumeric()) {
        return Tag::Unusable;
    }
    let char_count = surface.chars().count();
    let has_upper = surface.chars().any(|c| c.is_uppercase());
    let has_lower = surface.chars().any(|c| c.is_lowercase());
    if char_count > 1 && has_upper && !has_lower {
        return Tag::Acronym;
    }
    if !is_first_in_sentence {
        if let Some(first) = surface.chars().next() {
            if first.is_uppercase() {
                return Tag::ProperNoun;
            }
        }
    }
    Tag::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(text: &str) -> Vec<Vec<char>> {
        tokenize(text)
            .iter()
            .map(|s| s.iter().map(|t| t.tag.code()).collect())
            .collect()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = tokenize("Hello world. Second sentence! Third?");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].len(), 2);
        assert_eq!(sentences[1].len(), 2);
        assert_eq!(sentences[2].len(), 1);
    }

    #[test]
    fn preserves_attached_punctuation() {
        let sentences = tokenize("Google, Inc. was founded.");
        // "Google," keeps its comma; "Inc." keeps its period (mid-sentence,
        // not followed by more text in this chunk boundary sense).
        assert_eq!(sentences[0][0].surface, "Google,");
    }

    #[test]
    fn first_token_never_tagged_proper_noun() {
        let tags = tags_of("Apple released a product. The Kaggle team agreed.");
        // First token of sentence 0 is "Apple" -> capitalized but must not be 'n'.
        assert_ne!(tags[0][0], 'n');
        assert_eq!(tags[0][0], 'p');
    }

    #[test]
    fn acronym_tag() {
        let tags = tags_of("The CEO spoke yesterday.");
        assert_eq!(tags[0][1], 'a');
    }

    #[test]
    fn digit_tag() {
        let tags = tags_of("It costs 42 dollars.");
        assert_eq!(tags[0][2], 'd');
    }

    #[test]
    fn proper_noun_tag_mid_sentence() {
        let tags = tags_of("We met Google yesterday.");
        assert_eq!(tags[0][2], 'n');
    }

    #[test]
    fn newlines_become_spaces() {
        let sentences = tokenize("Line one\nLine two.");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].len(), 4);
    }

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn doc_positions_are_contiguous() {
        let sentences = tokenize("One two. Three four five.");
        let flat: Vec<&Token> = sentences.iter().flatten().collect();
        for (i, tok) in flat.iter().enumerate() {
            assert_eq!(tok.position_in_doc, i);
        }
    }
}
