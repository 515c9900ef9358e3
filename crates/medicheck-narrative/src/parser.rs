//! Parse model output into interaction records

use crate::error::NarrativeError;
use medicheck_domain::{
    Alternative, Citation, Confidence, DrugInfo, InteractionRecord, Severity,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Parse an analysis reply into interaction records
///
/// The reply may wrap the JSON in prose or code fences. Fails when no JSON
/// object is found or it has no `interactions` array; individual malformed
/// entries are skipped.
pub fn parse_interactions(response: &str) -> Result<Vec<InteractionRecord>, NarrativeError> {
    let json = extract_json_object(response)?;

    let entries = json
        .get("interactions")
        .and_then(Value::as_array)
        .ok_or(NarrativeError::MissingKey("interactions"))?;

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match parse_record(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping interaction {}: {}", idx, e),
        }
    }

    Ok(records)
}

/// Parse a monograph reply; a missing name falls back to `requested`
pub fn parse_drug_info(response: &str, requested: &str) -> Result<DrugInfo, NarrativeError> {
    let mut json = extract_json_object(response)?;

    if let Some(obj) = json.as_object_mut() {
        let has_name = obj
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if !has_name {
            obj.insert("name".to_string(), Value::String(requested.to_string()));
        }
    }

    serde_json::from_value(json)
        .map_err(|e| NarrativeError::InvalidFormat(format!("Drug info does not match schema: {}", e)))
}

/// Opening braces tried before giving up; each try may scan to the end
pub const MAX_OBJECT_STARTS: usize = 32;

/// Locate and parse the first balanced JSON object in `text`
///
/// Braces inside string literals are ignored. When a candidate is
/// unbalanced or does not parse, scanning resumes at the next `{`, up to
/// [`MAX_OBJECT_STARTS`] opening braces.
pub fn extract_json_object(text: &str) -> Result<Value, NarrativeError> {
    let mut search_from = 0;
    let mut attempts = 0;

    while let Some(offset) = text[search_from..].find('{') {
        attempts += 1;
        if attempts > MAX_OBJECT_STARTS {
            break;
        }
        let start = search_from + offset;
        if let Some(end) = balanced_end(&text[start..]) {
            let candidate = &text[start..start + end];
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(candidate) {
                return Ok(value);
            }
        }
        search_from = start + 1;
    }

    Err(NarrativeError::InvalidFormat(
        "No JSON object found in model response".to_string(),
    ))
}

/// Byte length of the balanced `{...}` at the start of `text`
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn text_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
}

fn owned_text(obj: &Map<String, Value>, key: &str) -> String {
    text_field(obj, &[key]).unwrap_or_default().to_string()
}

/// Decode one interaction entry leniently
fn parse_record(json: &Value) -> Result<InteractionRecord, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Interaction is not a JSON object".to_string())?;

    let drug_a = text_field(obj, &["drug1", "drugA"])
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'drug1'".to_string())?;
    let drug_b = text_field(obj, &["drug2", "drugB"])
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'drug2'".to_string())?;

    let citations = obj
        .get("citations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_citation).collect())
        .unwrap_or_default();

    let alternatives = obj
        .get("alternatives")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_alternative).collect());

    Ok(InteractionRecord {
        drug_a: drug_a.trim().to_string(),
        drug_b: drug_b.trim().to_string(),
        severity: Severity::coerce(text_field(obj, &["severity"])),
        confidence: Confidence::coerce(text_field(obj, &["confidence"])),
        description: owned_text(obj, "description"),
        mechanism: owned_text(obj, "mechanism"),
        clinical_effects: text_field(obj, &["clinicalEffects", "clinical_effects"])
            .unwrap_or_default()
            .to_string(),
        recommendations: owned_text(obj, "recommendations"),
        citations,
        alternatives,
    })
}

fn parse_citation(json: &Value) -> Option<Citation> {
    let obj = json.as_object()?;
    let title = owned_text(obj, "title");
    let source = owned_text(obj, "source");
    if title.trim().is_empty() && source.trim().is_empty() {
        return None;
    }
    Some(Citation {
        title,
        source,
        url: text_field(obj, &["url"]).map(str::to_string),
    })
}

fn parse_alternative(json: &Value) -> Option<Alternative> {
    let obj = json.as_object()?;
    let name = text_field(obj, &["name"]).filter(|name| !name.trim().is_empty())?;
    Some(Alternative {
        name: name.to_string(),
        reason: owned_text(obj, "reason"),
        considerations: text_field(obj, &["considerations"]).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_INTERACTION: &str = r#"{
        "interactions": [
            {
                "drug1": "Aspirin",
                "drug2": "Warfarin",
                "severity": "major",
                "confidence": "high",
                "description": "Additive bleeding risk.",
                "mechanism": "Platelet inhibition plus anticoagulation.",
                "clinicalEffects": "Bruising, GI bleeding.",
                "recommendations": "Avoid combination.",
                "citations": [{"source": "FDA", "title": "Warfarin label"}],
                "alternatives": [{"name": "Acetaminophen", "reason": "No antiplatelet effect"}]
            }
        ]
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let records = parse_interactions(ONE_INTERACTION).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].drug_a, "Aspirin");
        assert_eq!(records[0].severity, Severity::Major);
        assert_eq!(records[0].confidence, Confidence::High);
        assert_eq!(records[0].clinical_effects, "Bruising, GI bleeding.");
        assert_eq!(records[0].citations[0].source, "FDA");
        assert_eq!(records[0].alternatives.as_ref().unwrap()[0].name, "Acetaminophen");
    }

    #[test]
    fn test_parse_prose_and_code_fence() {
        let response = format!("Here is the analysis:\n```json\n{}\n```\nStay safe.", ONE_INTERACTION);
        let records = parse_interactions(&response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].drug_b, "Warfarin");
    }

    #[test]
    fn test_empty_array_is_success() {
        let records = parse_interactions(r#"{"interactions": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_json_fails() {
        let result = parse_interactions("I could not analyze these drugs.");
        assert!(matches!(result, Err(NarrativeError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_interactions_key_fails() {
        let result = parse_interactions(r#"{"results": []}"#);
        assert_eq!(result, Err(NarrativeError::MissingKey("interactions")));

        let result = parse_interactions(r#"{"interactions": "none"}"#);
        assert_eq!(result, Err(NarrativeError::MissingKey("interactions")));
    }

    #[test]
    fn test_unknown_tokens_are_coerced() {
        let response = r#"{"interactions": [
            {"drug1": "A", "drug2": "B", "severity": "catastrophic", "confidence": 0.9}
        ]}"#;
        let records = parse_interactions(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Moderate);
        assert_eq!(records[0].confidence, Confidence::Medium);
    }

    #[test]
    fn test_entries_without_names_are_skipped() {
        let response = r#"{"interactions": [
            {"drug1": "A", "severity": "minor"},
            "not an object",
            {"drugA": "C", "drugB": "D", "severity": "Minor"}
        ]}"#;
        let records = parse_interactions(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].drug_a, "C");
        assert_eq!(records[0].severity, Severity::Minor);
    }

    #[test]
    fn test_malformed_citations_skipped() {
        let response = r#"{"interactions": [
            {"drug1": "A", "drug2": "B", "citations": [42, {"title": "Label", "url": "https://example.org"}, {}]}
        ]}"#;
        let records = parse_interactions(response).unwrap();
        assert_eq!(records[0].citations.len(), 1);
        assert_eq!(records[0].citations[0].url.as_deref(), Some("https://example.org"));
        assert!(records[0].alternatives.is_none());
    }

    #[test]
    fn test_braces_inside_strings() {
        let response = r#"Note {not json}. {"interactions": [{"drug1": "A", "drug2": "B", "description": "uses } and { chars \" quoted"}]} trailing }"#;
        let records = parse_interactions(response).unwrap();
        assert_eq!(records[0].description, "uses } and { chars \" quoted");
    }

    #[test]
    fn test_unbalanced_object_fails() {
        let result = extract_json_object(r#"{"interactions": ["#);
        assert!(result.is_err());
    }

    #[test]
    fn test_object_after_unbalanced_prefix() {
        let value = extract_json_object(r#"{ broken {"interactions": []}"#).unwrap();
        assert!(value["interactions"].is_array());
    }

    #[test]
    fn test_many_open_braces_give_up() {
        let response = "{".repeat(200_000);
        let result = extract_json_object(&response);
        assert!(matches!(result, Err(NarrativeError::InvalidFormat(_))));

        let mut buried = "{ ".repeat(MAX_OBJECT_STARTS);
        buried.push_str(r#"{"interactions": []}"#);
        assert!(extract_json_object(&buried).is_err());
    }

    #[test]
    fn test_parse_drug_info() {
        let response = r#"```json
{"overview": "Biguanide.", "drugClass": "Antidiabetic", "sideEffects": ["Nausea"]}
```"#;
        let info = parse_drug_info(response, "Metformin").unwrap();
        assert_eq!(info.name, "Metformin");
        assert_eq!(info.drug_class, "Antidiabetic");
        assert_eq!(info.side_effects, vec!["Nausea"]);
        assert!(info.warnings.is_empty());
    }

    #[test]
    fn test_parse_drug_info_keeps_reported_name() {
        let info = parse_drug_info(r#"{"name": "Metformin HCl"}"#, "metformin").unwrap();
        assert_eq!(info.name, "Metformin HCl");
    }
}
