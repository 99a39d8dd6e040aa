use serde::{Deserialize, Serialize};

/// One extracted genealogical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub given_name: String,
    pub surname: String,
    pub relation: String,
    /// 1-based family/group ordinal. Bumps when a record carries a new
    /// relation keyword; relation-less records stay in the current group.
    pub position: u32,
}

impl Record {
    pub fn new(given_name: String, surname: String, relation: String, position: u32) -> Self {
        Self {
            given_name,
            surname,
            relation,
            position,
        }
    }

    /// A name-only record with no surname or relation, used for the
    /// trailing name found inside a relation clause.
    pub fn bare(given_name: String, position: u32) -> Self {
        Self {
            given_name,
            surname: String::new(),
            relation: String::new(),
            position,
        }
    }
}

/// One composite-pattern match, before the relation clause is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanMatch {
    pub name: String,
    pub surname: String,
    pub clause: String,
}
