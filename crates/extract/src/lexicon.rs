use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Closed keyword sets driving the extraction pattern. The defaults are
/// the Hindi sets the transcripts were collected in; alternative locales
/// can be loaded from JSON without touching the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Honorific/familial suffixes absorbed into the given name.
    pub name_suffixes: Vec<String>,
    /// Recognized surnames; a single optional token after the name.
    pub surnames: Vec<String>,
    /// Keywords that open a relation clause.
    pub relation_keywords: Vec<String>,
    /// Possessive markers anchoring the relation clause.
    pub possessive_markers: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            name_suffixes: vec![
                "जी".to_string(),
                "बाई".to_string(),
                "बाइ".to_string(),
                "वाई".to_string(),
                "देवी".to_string(),
                "कुमारी".to_string(),
                "लाल".to_string(),
                "प्रसाद".to_string(),
            ],
            surnames: vec!["सिंह".to_string(), "पटेल".to_string()],
            relation_keywords: vec![
                "पुत्र".to_string(),
                "पुत्री".to_string(),
                "बेटा".to_string(),
                "बेटी".to_string(),
                "पत्नी".to_string(),
                "पति".to_string(),
                "धनी".to_string(),
                "पिता".to_string(),
                "दादा".to_string(),
            ],
            possessive_markers: vec!["का".to_string(), "की".to_string(), "के".to_string()],
        }
    }
}

impl Lexicon {
    pub fn from_json(json: &str) -> Result<Self> {
        let lexicon: Lexicon =
            serde_json::from_str(json).context("Failed to parse lexicon JSON")?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    fn validate(&self) -> Result<()> {
        if self.relation_keywords.is_empty() {
            anyhow::bail!("Lexicon has no relation keywords");
        }
        if self.possessive_markers.is_empty() {
            anyhow::bail!("Lexicon has no possessive markers");
        }
        Ok(())
    }

    pub fn is_relation_keyword(&self, token: &str) -> bool {
        self.relation_keywords.iter().any(|k| k == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets_nonempty() {
        let lexicon = Lexicon::default();
        assert!(!lexicon.name_suffixes.is_empty());
        assert!(!lexicon.surnames.is_empty());
        assert!(!lexicon.relation_keywords.is_empty());
        assert!(!lexicon.possessive_markers.is_empty());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name_suffixes": ["ji"],
            "surnames": ["Singh"],
            "relation_keywords": ["son", "daughter"],
            "possessive_markers": ["of"]
        }"#;
        let lexicon = Lexicon::from_json(json).unwrap();
        assert!(lexicon.is_relation_keyword("son"));
        assert!(!lexicon.is_relation_keyword("Singh"));
    }

    #[test]
    fn test_from_json_rejects_empty_keywords() {
        let json = r#"{
            "name_suffixes": [],
            "surnames": [],
            "relation_keywords": [],
            "possessive_markers": ["of"]
        }"#;
        assert!(Lexicon::from_json(json).is_err());
    }
}
