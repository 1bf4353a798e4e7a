/// Strips markdown code-fence decoration from a raw model reply.
///
/// Models regularly wrap the JSON they were told not to wrap. Only
/// leading/trailing fences are removed; backticks inside field values are
/// left alone. Total and idempotent.
pub fn normalize_response(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_suffix = without_prefix
        .strip_suffix("```")
        .unwrap_or(without_prefix);
    without_suffix.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_tagged_fences() {
        let json = r#"{"diagnosis":"Flu"}"#;
        let fenced = format!("```json\n{json}\n```");
        assert_eq!(normalize_response(&fenced), json);
    }

    #[test]
    fn strips_generic_fences() {
        assert_eq!(normalize_response("```\n{}\n```"), "{}");
    }

    #[test]
    fn leaves_clean_text_alone() {
        assert_eq!(normalize_response(r#"{"a":1}"#), r#"{"a":1}"#);
        assert_eq!(normalize_response("  plain prose  "), "plain prose");
        assert_eq!(normalize_response(""), "");
    }

    #[test]
    fn keeps_interior_backticks() {
        let text = r#"{"doctorNotes":"use ``` sparingly"}"#;
        assert_eq!(normalize_response(text), text);
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "```json\n{\"diagnosis\":\"Flu\"}\n```",
            "```\nplain\n```",
            "no fences at all",
            "```",
            "``````",
            "",
            "   \n  ",
        ];
        for input in inputs {
            let once = normalize_response(input);
            assert_eq!(normalize_response(&once), once, "input: {input:?}");
        }
    }
}
