pub mod clause;
pub mod lexicon;
pub mod matcher;
pub mod schema;

pub use lexicon::Lexicon;
pub use matcher::SpanMatcher;
pub use schema::{Record, SpanMatch};

use anyhow::Result;

/// Turns one speech transcript into an ordered sequence of genealogical
/// records. Pure: no I/O, no shared state, safe to call concurrently.
pub struct Extractor {
    lexicon: Lexicon,
    matcher: SpanMatcher,
}

impl Extractor {
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        let matcher = SpanMatcher::new(&lexicon)?;
        Ok(Self { lexicon, matcher })
    }

    pub fn with_default_lexicon() -> Result<Self> {
        Self::new(Lexicon::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Extract records from one transcript. Non-matching text is
    /// skipped; an empty transcript yields an empty vector.
    pub fn extract(&self, text: &str) -> Vec<Record> {
        let mut records = Vec::new();
        // Group ordinal, unset until the first span.
        let mut position: Option<u32> = None;

        for span in self.matcher.scan(text) {
            let outcome = clause::resolve(&span.clause, &self.lexicon);

            let current = match position {
                None => 1,
                Some(p) if !outcome.relation.is_empty() => p + 1,
                Some(p) => p,
            };
            position = Some(current);

            records.push(Record::new(
                span.name,
                span.surname,
                outcome.relation,
                current,
            ));

            if !outcome.extra_name.is_empty() {
                records.push(Record::bare(outcome.extra_name, current));
            }
        }

        records
    }
}
