use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Structured fields extracted from a checkup slip.
///
/// Every field is independently optional: the model is allowed to return
/// `null` for anything it could not read, and a partial object is still a
/// valid analysis. Absent fields serialize as explicit `null` so clients
/// always see the full shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckupAnalysis {
    pub diagnosis: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub medicines: Option<Vec<String>>,
    pub tests_recommended: Option<Vec<String>>,
    pub follow_up_advice: Option<String>,
    pub doctor_notes: Option<String>,
    pub important_keywords: Option<Vec<String>>,
    pub unclear_parts: Option<Vec<String>>,
}

/// Request body for `POST /checkup/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
}

/// The one source a single analysis runs against: a dereferenceable image
/// URL for the vision model, or text already pulled out of the image by OCR.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    ImageUrl(String),
    ExtractedText(String),
}

impl SourceContent {
    /// Picks the source out of the request, failing fast when neither field
    /// carries anything usable. The image wins when both are present.
    pub fn from_request(request: &AnalyzeRequest) -> Result<Self, ExtractError> {
        if let Some(url) = non_blank(request.image_url.as_deref()) {
            return Ok(SourceContent::ImageUrl(url));
        }
        if let Some(text) = non_blank(request.extracted_text.as_deref()) {
            return Ok(SourceContent::ExtractedText(text));
        }
        Err(ExtractError::MissingSource)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Outcome of one extraction run. An unparseable model reply is a normal,
/// reportable outcome, not an error: the pipeline ran, the model misbehaved.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Success(CheckupAnalysis),
    Unparseable { raw: String },
}

/// Request body for `POST /ocr/analyze`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRequest {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One record summary supplied by the caller as chat context. The web tier
/// owns the record store and sends the relevant slice along with the
/// question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub record_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub analysis: Option<serde_json::Value>,
}

/// Request body for `POST /chat/patient`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub records: Vec<RecordSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_serializes_absent_fields_as_null() {
        let value = serde_json::to_value(CheckupAnalysis::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 8);
        assert!(object["diagnosis"].is_null());
        assert!(object["testsRecommended"].is_null());
        assert!(object["unclearParts"].is_null());
    }

    #[test]
    fn source_prefers_image_over_text() {
        let request = AnalyzeRequest {
            subject: None,
            image_url: Some("https://cdn.example.com/slip.png".to_string()),
            extracted_text: Some("Diagnosis: Flu".to_string()),
        };
        assert_eq!(
            SourceContent::from_request(&request).unwrap(),
            SourceContent::ImageUrl("https://cdn.example.com/slip.png".to_string())
        );
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let request = AnalyzeRequest {
            subject: Some("General Checkup".to_string()),
            image_url: Some("   ".to_string()),
            extracted_text: None,
        };
        assert!(matches!(
            SourceContent::from_request(&request),
            Err(ExtractError::MissingSource)
        ));
    }
}
