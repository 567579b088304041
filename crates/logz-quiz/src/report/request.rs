use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body accepted by the report endpoint. Numeric fields tolerate numeric
/// strings; anything else non-numeric reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score_percentage: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub efficiency_gain: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub economy_potential: Option<f64>,
    /// Free-form answer details; see [`normalize_answers`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Value>,
}

/// One well-formed answer line for the internal summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_spend: Option<f64>,
}

/// Bring a score onto the 0-10 scale. Values above 10 are read as percentages.
///
/// The check is a heuristic: a percentage of 9 is indistinguishable from a
/// 0-10 score of 9 and is kept as 9.
pub fn normalize_score(value: Option<f64>) -> f64 {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return 0.0;
    };

    let scaled = if value > 10.0 { value / 10.0 } else { value };
    round_to_tenth(scaled).clamp(0.0, 10.0)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Keep the entries that carry both question and answer text; skip the rest.
pub fn normalize_answers(raw: Option<&Value>) -> Vec<AnswerEntry> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let record = entry.as_object()?;
            let question = text_of(record.get("question"));
            let answer = text_of(record.get("answer"));
            if question.is_empty() || answer.is_empty() {
                return None;
            }

            Some(AnswerEntry {
                question_id: record
                    .get("questionId")
                    .and_then(lenient_number)
                    .map(|id| id as i64)
                    .unwrap_or(0),
                question_type: record
                    .get("questionType")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                question,
                answer,
                option_value: record.get("optionValue").and_then(lenient_number),
                monthly_spend: record.get("monthlySpend").and_then(lenient_number),
            })
        })
        .collect()
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_number))
}
