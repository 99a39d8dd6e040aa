use crate::lexicon::Lexicon;

/// Resolved relation clause: the keyword that opened it and whatever
/// tokens trailed it, re-joined with single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseOutcome {
    pub relation: String,
    pub extra_name: String,
}

impl ClauseOutcome {
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty() && self.extra_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingKeyword,
    Found,
}

/// Stage two of the pipeline: scan the clause tokens left-to-right for
/// the first relation keyword. Tokens before it are discarded; tokens
/// after it become `extra_name`. A clause with no recognized keyword is
/// discarded whole, trailing name included.
pub fn resolve(clause: &str, lexicon: &Lexicon) -> ClauseOutcome {
    let mut state = State::SeekingKeyword;
    let mut relation = String::new();
    let mut trailing: Vec<&str> = Vec::new();

    for token in clause.split_whitespace() {
        match state {
            State::SeekingKeyword => {
                if lexicon.is_relation_keyword(token) {
                    relation = token.to_string();
                    state = State::Found;
                }
            }
            State::Found => trailing.push(token),
        }
    }

    ClauseOutcome {
        relation,
        extra_name: trailing.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_with_no_trailing_tokens() {
        let outcome = resolve("का पुत्र", &Lexicon::default());
        assert_eq!(outcome.relation, "पुत्र");
        assert_eq!(outcome.extra_name, "");
    }

    #[test]
    fn test_tokens_after_keyword_become_extra_name() {
        let outcome = resolve("पुत्र के मोहन", &Lexicon::default());
        assert_eq!(outcome.relation, "पुत्र");
        // The possessive marker rides along; matches the transcripts'
        // observed shape.
        assert_eq!(outcome.extra_name, "के मोहन");
    }

    #[test]
    fn test_first_keyword_wins() {
        let outcome = resolve("पुत्र बेटा राम", &Lexicon::default());
        assert_eq!(outcome.relation, "पुत्र");
        assert_eq!(outcome.extra_name, "बेटा राम");
    }

    #[test]
    fn test_clause_without_keyword_is_discarded() {
        // Regression: the trailing name is lost along with the clause.
        let outcome = resolve("का श्याम", &Lexicon::default());
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_empty_clause() {
        assert!(resolve("", &Lexicon::default()).is_empty());
    }
}
