use tracing::warn;

use crate::models::{CheckupAnalysis, ExtractionOutcome};

/// Interprets normalized model output as one structured analysis.
///
/// Total function: every input string yields an outcome. Unknown fields
/// are ignored and missing fields read as `None`, so a partial object is
/// accepted; a field of the wrong JSON type rejects the whole object
/// rather than letting a malformed record through.
pub fn parse_analysis(normalized: &str) -> ExtractionOutcome {
    match serde_json::from_str::<CheckupAnalysis>(normalized) {
        Ok(analysis) => ExtractionOutcome::Success(analysis),
        Err(e) => {
            warn!("model output did not parse as an analysis: {}", e);
            ExtractionOutcome::Unparseable {
                raw: normalized.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_object() {
        let text = r#"{
            "diagnosis": "Flu",
            "symptoms": ["fever", "cough"],
            "medicines": ["Paracetamol"],
            "testsRecommended": null,
            "followUpAdvice": "Rest for 3 days",
            "doctorNotes": null,
            "importantKeywords": ["flu"],
            "unclearParts": null
        }"#;

        match parse_analysis(text) {
            ExtractionOutcome::Success(analysis) => {
                assert_eq!(analysis.diagnosis.as_deref(), Some("Flu"));
                assert_eq!(
                    analysis.symptoms,
                    Some(vec!["fever".to_string(), "cough".to_string()])
                );
                assert_eq!(analysis.follow_up_advice.as_deref(), Some("Rest for 3 days"));
                assert!(analysis.doctor_notes.is_none());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn accepts_partial_object() {
        match parse_analysis(r#"{"diagnosis": "flu"}"#) {
            ExtractionOutcome::Success(analysis) => {
                assert_eq!(analysis.diagnosis.as_deref(), Some("flu"));
                assert!(analysis.symptoms.is_none());
                assert!(analysis.medicines.is_none());
                assert!(analysis.tests_recommended.is_none());
                assert!(analysis.follow_up_advice.is_none());
                assert!(analysis.doctor_notes.is_none());
                assert!(analysis.important_keywords.is_none());
                assert!(analysis.unclear_parts.is_none());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn ignores_unknown_fields() {
        let outcome = parse_analysis(r#"{"diagnosis": "flu", "hospital": "City Care"}"#);
        assert!(matches!(outcome, ExtractionOutcome::Success(_)));
    }

    #[test]
    fn rejects_mistyped_fields() {
        let outcome = parse_analysis(r#"{"diagnosis": 42}"#);
        assert!(matches!(outcome, ExtractionOutcome::Unparseable { .. }));
    }

    #[test]
    fn never_panics_on_garbage() {
        let inputs = [
            "",
            "Sure! Here's the info you asked for.",
            "[1, 2, 3]",
            "\"just a string\"",
            "{\"diagnosis\": ",
            "null",
            "{}",
        ];
        for input in inputs {
            match parse_analysis(input) {
                ExtractionOutcome::Success(_) => assert_eq!(input, "{}"),
                ExtractionOutcome::Unparseable { raw } => assert_eq!(raw, input),
            }
        }
    }
}
