use anyhow::{Context, Result};
use regex::Regex;

use crate::lexicon::Lexicon;
use crate::schema::SpanMatch;

/// Latin or Devanagari letters; everything else separates spans.
const ALPHA: &str = r"[a-zA-Zऀ-ॿ]+";

/// Stage one of the pipeline: a compiled composite pattern producing
/// coarse spans. Clause tokens are interpreted later, in `clause`.
pub struct SpanMatcher {
    pattern: Regex,
}

impl SpanMatcher {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        // One name token, optionally extended by repeated suffix tokens.
        let mut pattern = if lexicon.name_suffixes.is_empty() {
            format!("(?P<name>{ALPHA})")
        } else {
            format!(
                "(?P<name>{ALPHA}(?:\\s*(?:{}))*)",
                alternation(&lexicon.name_suffixes)
            )
        };

        // At most one surname token directly after the name.
        if !lexicon.surnames.is_empty() {
            pattern.push_str(&format!(
                "(?:\\s+(?P<surname>{}))?",
                alternation(&lexicon.surnames)
            ));
        }

        // Relation clause: lazily up to a possessive marker, then one
        // more name token.
        pattern.push_str(&format!(
            "(?:\\s+(?P<clause>.*?(?:{})\\s+{ALPHA}))?",
            alternation(&lexicon.possessive_markers)
        ));

        let pattern = Regex::new(&pattern).context("Failed to compile span pattern")?;
        Ok(Self { pattern })
    }

    /// Walk the text left-to-right, collecting non-overlapping spans.
    /// Text between spans is skipped silently.
    pub fn scan(&self, text: &str) -> Vec<SpanMatch> {
        self.pattern
            .captures_iter(text)
            .map(|caps| {
                let group = |name: &str| {
                    caps.name(name)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default()
                };
                SpanMatch {
                    name: group("name"),
                    surname: group("surname"),
                    clause: group("clause"),
                }
            })
            .collect()
    }
}

fn alternation(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SpanMatcher {
        SpanMatcher::new(&Lexicon::default()).unwrap()
    }

    #[test]
    fn test_suffix_absorbed_into_name() {
        let spans = matcher().scan("गीता देवी सिंह");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "गीता देवी");
        assert_eq!(spans[0].surname, "सिंह");
        assert_eq!(spans[0].clause, "");
    }

    #[test]
    fn test_clause_captured_up_to_one_trailing_token() {
        let spans = matcher().scan("राम का पुत्र श्याम");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].name, "राम");
        assert_eq!(spans[0].clause, "का पुत्र");
        assert_eq!(spans[1].name, "श्याम");
        assert_eq!(spans[1].clause, "");
    }

    #[test]
    fn test_unrecognized_trailing_token_is_not_a_surname() {
        // कुमार is neither a suffix nor a recognized surname.
        let spans = matcher().scan("राम कुमार");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].surname, "");
        assert_eq!(spans[1].name, "कुमार");
    }

    #[test]
    fn test_latin_tokens_match() {
        let spans = matcher().scan("Rama Singh");
        // Latin "Singh" is not in the Devanagari surname set.
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].name, "Rama");
        assert_eq!(spans[0].surname, "");
    }

    #[test]
    fn test_punctuation_skipped() {
        let spans = matcher().scan("... राम !!");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "राम");
    }

    #[test]
    fn test_lexicon_without_surnames() {
        let lexicon = Lexicon {
            surnames: vec![],
            name_suffixes: vec![],
            ..Lexicon::default()
        };
        let matcher = SpanMatcher::new(&lexicon).unwrap();
        let spans = matcher.scan("गीता देवी");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].name, "गीता");
        assert_eq!(spans[1].name, "देवी");
    }
}
