pub mod invoker;
pub mod normalize;
pub mod parse;
pub mod prompt;

pub use invoker::{ModelInvoker, TextInvoker, VisionInvoker};
pub use normalize::normalize_response;
pub use parse::parse_analysis;
pub use prompt::build_extraction_prompt;

use tracing::info;

use crate::error::ExtractError;
use crate::models::{AnalyzeRequest, ExtractionOutcome, SourceContent};

/// Runs one extraction end to end: pick the source, build the prompt,
/// call the model once, strip fence decoration, parse.
///
/// A request with no usable source never reaches the invoker.
pub async fn analyze(
    invoker: &dyn ModelInvoker,
    request: &AnalyzeRequest,
) -> Result<ExtractionOutcome, ExtractError> {
    let source = SourceContent::from_request(request)?;
    let prompt = build_extraction_prompt(request.subject.as_deref(), &source);

    let raw = invoker
        .invoke(&prompt)
        .await
        .map_err(|e| ExtractError::Upstream(e.to_string()))?;

    info!("raw model output: {} characters", raw.len());

    let normalized = normalize_response(&raw);
    Ok(parse_analysis(&normalized))
}
