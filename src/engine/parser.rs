//! Decodes the model's reply into a [`ScoreSet`].
//!
//! The reply comes from an untrusted, non-deterministic producer. Either the
//! whole reply decodes into complete records or the run fails with the raw
//! text attached; there is no partial recovery.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::error::ParseError;
use crate::engine::model::{FeatureScore, ScoreSet};

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json|```").expect("fence pattern is a valid regex"));

/// Removes every markdown fence marker, wherever it appears, then trims.
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}

/// A record missing any of `name, R, I, C, E, rice_score` fails the whole
/// parse, as does anything that is not a JSON list of objects.
pub fn parse_response(raw: &str) -> Result<ScoreSet, ParseError> {
    let cleaned = strip_fences(raw);
    serde_json::from_str::<Vec<FeatureScore>>(&cleaned)
        .map(ScoreSet::new)
        .map_err(|e| ParseError::new(e.to_string(), raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_and_bare_fences() {
        assert_eq!(strip_fences("```json\n[]\n```"), "[]");
        assert_eq!(strip_fences("```\n[1]\n```  "), "[1]");
    }

    #[test]
    fn strips_fences_in_the_middle_of_text() {
        assert_eq!(strip_fences("a```b```jsonc"), "abc");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_fences("  [ {\"a\": 1} ] \n"), "[ {\"a\": 1} ]");
    }
}
