//! Content extraction: recover the JSON payload from a raw completion.

const FENCE: &str = "```";

/// Strip markdown code fences and surrounding whitespace from `raw`.
///
/// Removes a leading fence (bare or with a language tag such as ```` ```json ````)
/// and a trailing fence, then trims. The transform is applied until the
/// text stops changing, so `extract_payload(extract_payload(x)) == extract_payload(x)`.
pub fn extract_payload(raw: &str) -> &str {
    let mut current = raw.trim();
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut text = text;

    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .char_indices()
            .find(|(_, c)| !is_tag_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_json_fence_removed() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_payload(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_bare_fence_removed() {
        let raw = "  ```\n[1, 2]\n```  \n";
        assert_eq!(extract_payload(raw), "[1, 2]");
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(extract_payload("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(extract_payload("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_clean_text_unchanged() {
        assert_eq!(extract_payload("{\"ok\": true}"), "{\"ok\": true}");
    }

    #[test]
    fn test_only_trailing_fence() {
        assert_eq!(extract_payload("{}\n```"), "{}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_payload(""), "");
        assert_eq!(extract_payload("```"), "");
        assert_eq!(extract_payload("```json\n```"), "");
    }

    #[test]
    fn test_nested_fences_reach_fixpoint() {
        let raw = "```json\n```json\n{}\n```\n```";
        let once = extract_payload(raw);
        assert_eq!(once, "{}");
        assert_eq!(extract_payload(once), once);
    }

    proptest! {
        #[test]
        fn prop_extract_is_idempotent(raw in ".*") {
            let once = extract_payload(&raw);
            prop_assert_eq!(extract_payload(once), once);
        }

        #[test]
        fn prop_extract_is_idempotent_with_fences(
            tag in "(json|python|)",
            body in "[ -~\\n]{0,40}",
        ) {
            let raw = format!("```{}\n{}\n```", tag, body);
            let once = extract_payload(&raw);
            prop_assert_eq!(extract_payload(once), once);
        }
    }
}
