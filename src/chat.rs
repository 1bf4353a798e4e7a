use rig::{agent::Agent, client::CompletionClient, completion::Prompt, providers::openrouter};

use crate::models::RecordSummary;

const CHAT_MODEL: &str = "openai/gpt-4o-mini";

const PATIENT_ASSISTANT_PREAMBLE: &str = "\
You are CuraVault AI, a medical assistant for patients.

You must answer based ONLY on:
- the patient's checkup records
- doctor-entered notes
- AI analysis from uploaded checkup slips

Rules:
- Do NOT diagnose any condition.
- Do NOT prescribe medicines.
- You CAN summarize and explain trends, symptoms and insights.
- You CAN recommend general health steps.
- If unsure, tell the patient to visit a doctor.";

fn get_chat_agent(api_key: &str) -> Agent<openrouter::CompletionModel> {
    let client = openrouter::Client::new(api_key);
    client
        .agent(CHAT_MODEL)
        .preamble(PATIENT_ASSISTANT_PREAMBLE)
        .build()
}

/// Lays the patient's question next to the record summaries the caller
/// supplied, so the model has nothing else to ground its answer in.
pub fn build_patient_chat_prompt(message: &str, records: &[RecordSummary]) -> String {
    let context = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    format!("Patient query:\n{message}\n\nPatient medical context:\n{context}\n")
}

/// Answers a patient question grounded in their own records.
pub async fn answer_patient_question(
    api_key: &str,
    message: &str,
    records: &[RecordSummary],
) -> anyhow::Result<String> {
    let agent = get_chat_agent(api_key);
    let prompt = build_patient_chat_prompt(message, records);
    let reply = agent.prompt(&prompt).await?;
    Ok(reply)
}
