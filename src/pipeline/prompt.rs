use crate::models::SourceContent;

/// Placeholder used when the request carries no usable subject label.
const SUBJECT_PLACEHOLDER: &str = "N/A";

/// The target shape the model must fill in, stated verbatim in the prompt.
const SCHEMA_BLOCK: &str = r#"{
  "diagnosis": string | null,
  "symptoms": string[] | null,
  "medicines": string[] | null,
  "testsRecommended": string[] | null,
  "followUpAdvice": string | null,
  "doctorNotes": string | null,
  "importantKeywords": string[] | null,
  "unclearParts": string[] | null
}"#;

/// Builds the extraction instruction for one checkup slip.
///
/// The embedded text is not escaped against prompt injection; the slips
/// come from the treating doctor's own uploads.
pub fn build_extraction_prompt(subject: Option<&str>, source: &SourceContent) -> String {
    let subject = match subject.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => SUBJECT_PLACEHOLDER,
    };

    let mut prompt = match source {
        SourceContent::ImageUrl(_) => format!(
            "You are a medical AI assistant. Extract structured fields from the \
             checkup slip image:\n\n{SCHEMA_BLOCK}\n\nThe subject is: {subject}\n"
        ),
        SourceContent::ExtractedText(text) => format!(
            "You are a medical AI assistant. Extract structured fields from this \
             checkup slip text (OCR output):\n\n{SCHEMA_BLOCK}\n\nThe subject is: \
             {subject}\n\nCheckup slip text:\n{text}\n\nUse only facts that appear \
             in the text above. Do not hallucinate.\n"
        ),
    };

    prompt.push_str("\nReturn ONLY JSON. No explanation. No markdown.");
    prompt
}
