use thiserror::Error;

/// Failures the extraction pipeline can report to its caller.
///
/// An unparseable model reply is deliberately not here: it travels as an
/// `ExtractionOutcome::Unparseable` value because the pipeline itself
/// completed normally.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Neither an image URL nor extracted text was supplied.
    #[error("missing imageUrl or extractedText")]
    MissingSource,

    /// The model call failed in transport or the provider returned a
    /// malformed envelope.
    #[error("model request failed: {0}")]
    Upstream(String),
}
