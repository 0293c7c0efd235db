use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Sentinel meaning "no plate text could be extracted".
pub const UNKNOWN_PLATE: &str = "UNKNOWN";

static NON_PLATE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z0-9 ]+").unwrap());
static RUNS_OF_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").unwrap());

/// Normalise raw model output into plate text: upper-case, only `[A-Z0-9 ]`,
/// single spaces, trimmed. Empty results become [`UNKNOWN_PLATE`].
pub fn clean_plate_text(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let stripped = NON_PLATE_CHARS.replace_all(&upper, "");
    let collapsed = RUNS_OF_SPACES.replace_all(&stripped, " ");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        UNKNOWN_PLATE.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Store key for cleaned plate text: every space removed.
pub fn plate_lookup_key(cleaned: &str) -> String {
    cleaned.replace(' ', "")
}

/// `clean_plate_text` followed by `plate_lookup_key`.
pub fn clean_plate_key(raw: &str) -> String {
    plate_lookup_key(&clean_plate_text(raw))
}

/// Interpret the multi-plate model reply.
///
/// A JSON array yields one entry per non-blank item; any other JSON value is
/// a single entry. Non-JSON text is a single entry unless it is empty or the
/// sentinel, which yield `["UNKNOWN"]`. Entries are upper-cased with dashes
/// removed; they are not otherwise cleaned here.
pub fn parse_plate_list(raw: &str) -> Vec<String> {
    let text = strip_code_fence(raw.trim());

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .filter(|item| !item.trim().is_empty())
            .map(|item| normalize_list_item(&item))
            .collect(),
        Ok(other) => vec![normalize_list_item(&value_to_text(&other))],
        Err(_) => {
            if text.is_empty() || text.eq_ignore_ascii_case(UNKNOWN_PLATE) {
                vec![UNKNOWN_PLATE.to_string()]
            } else {
                vec![normalize_list_item(text)]
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn normalize_list_item(item: &str) -> String {
    item.to_uppercase().replace('-', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_examples() {
        assert_eq!(clean_plate_text("ABC-123 "), "ABC123");
        assert_eq!(clean_plate_text(""), UNKNOWN_PLATE);
        assert_eq!(clean_plate_text("!!!"), UNKNOWN_PLATE);
        assert_eq!(clean_plate_text("  abc   12\t3 "), "ABC 123");
        assert_eq!(clean_plate_text("Plate: 7XYZ 123."), "PLATE 7XYZ 123");
    }

    #[test]
    fn test_clean_drops_newlines_rather_than_splitting() {
        assert_eq!(clean_plate_text("AB\nC123"), "ABC123");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "",
            "   ",
            "abc-123",
            "  x  y  z ",
            "ÄBC 12ß",
            "UNKNOWN",
            "none",
            "7 ABC 123 !!",
            "\u{00a0}AB\u{00a0}12",
        ];
        for sample in samples {
            let once = clean_plate_text(sample);
            assert_eq!(clean_plate_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_lookup_key_removes_spaces() {
        assert_eq!(clean_plate_key(" tjx 9717 "), "TJX9717");
        assert_eq!(clean_plate_key("???"), UNKNOWN_PLATE);
    }

    #[test]
    fn test_parse_plate_list_array() {
        assert_eq!(
            parse_plate_list(r#"["ABC123","UNKNOWN","xyz-789"]"#),
            vec!["ABC123", "UNKNOWN", "XYZ789"]
        );
    }

    #[test]
    fn test_parse_plate_list_drops_blank_items_and_stringifies_numbers() {
        assert_eq!(parse_plate_list(r#"["", "  ", 12345]"#), vec!["12345"]);
    }

    #[test]
    fn test_parse_plate_list_scalar_json() {
        assert_eq!(parse_plate_list(r#""abc 123""#), vec!["ABC 123"]);
    }

    #[test]
    fn test_parse_plate_list_plain_text_fallback() {
        assert_eq!(parse_plate_list("abc-123"), vec!["ABC123"]);
        assert_eq!(parse_plate_list("unknown"), vec![UNKNOWN_PLATE]);
        assert_eq!(parse_plate_list("   "), vec![UNKNOWN_PLATE]);
    }

    #[test]
    fn test_parse_plate_list_code_fence() {
        let fenced = "```json\n[\"ABC123\", \"XYZ789\"]\n```";
        assert_eq!(parse_plate_list(fenced), vec!["ABC123", "XYZ789"]);
    }
}
