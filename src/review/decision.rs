//! Normalizes free-text screening labels into a closed decision set.

use serde::{Deserialize, Serialize};

/// Canonical screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Include,
    Exclude,
    Uncertain,
}

impl Decision {
    /// Map a free-text label to a decision. Total over all inputs:
    /// tolerant substring matching ("inclu" / "exclu" covers English and
    /// Spanish labels alike), with `Uncertain` as the default for
    /// anything not unambiguously matched, including empty input.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("inclu") {
            Decision::Include
        } else if lower.contains("exclu") {
            Decision::Exclude
        } else {
            Decision::Uncertain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels() {
        assert_eq!(Decision::from_label("include"), Decision::Include);
        assert_eq!(Decision::from_label("Excluded"), Decision::Exclude);
    }

    #[test]
    fn spanish_labels() {
        assert_eq!(Decision::from_label("INCLUIR"), Decision::Include);
        assert_eq!(Decision::from_label("Se debe EXCLUIR"), Decision::Exclude);
    }

    #[test]
    fn empty_label_is_uncertain() {
        assert_eq!(Decision::from_label(""), Decision::Uncertain);
    }

    #[test]
    fn unmatched_label_is_uncertain() {
        assert_eq!(Decision::from_label("tal vez"), Decision::Uncertain);
        assert_eq!(Decision::from_label("maybe relevant"), Decision::Uncertain);
    }

    #[test]
    fn wire_form_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Decision::Uncertain).unwrap(),
            "\"uncertain\""
        );
    }
}
