use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumString};

pub mod error;
pub mod fmt;

pub use error::ApiError;

/// Classifier verdict as carried on the wire. The endpoint speaks lowercase
/// strings ("infected" / "not infected"); anything else is preserved verbatim
/// so unknown labels survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PredictionLabel {
    #[strum(serialize = "infected")]
    Infected,
    #[strum(serialize = "not infected")]
    NotInfected,
    #[strum(default)]
    Other(String),
}

impl From<String> for PredictionLabel {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(PredictionLabel::Other(raw))
    }
}

impl From<PredictionLabel> for String {
    fn from(label: PredictionLabel) -> Self {
        label.to_string()
    }
}

impl PredictionLabel {
    pub fn is_infected(&self) -> bool {
        matches!(self, PredictionLabel::Infected)
    }
}

/// Row identifier as returned by the database; integer or string depending on
/// the table's key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Body of a successful `POST /predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub result: PredictionLabel,
    #[serde(deserialize_with = "confidence_from_wire")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One stored analysis, as returned by the history endpoint or the database.
/// Insert-only: never mutated or deleted by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub image_path: Option<String>,
    pub result: PredictionLabel,
    #[serde(deserialize_with = "confidence_from_wire")]
    pub confidence: f64,
    pub created_at: String,
}

/// Row inserted into the `predictions` table after a successful analysis.
/// `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrediction {
    pub image_path: String,
    pub result: PredictionLabel,
    pub confidence: f64,
}

/// The endpoint has been observed sending confidence both as a JSON number
/// and as a numeric string. Accept either; reject anything unparsable.
fn confidence_from_wire<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid confidence value: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parses_known_wire_strings() {
        assert_eq!(
            "infected".parse::<PredictionLabel>().unwrap(),
            PredictionLabel::Infected
        );
        assert_eq!(
            "not infected".parse::<PredictionLabel>().unwrap(),
            PredictionLabel::NotInfected
        );
    }

    #[test]
    fn unknown_label_round_trips_verbatim() {
        let label = PredictionLabel::from("Error".to_string());
        assert_eq!(label, PredictionLabel::Other("Error".to_string()));
        assert_eq!(label.to_string(), "Error");
    }

    #[test]
    fn predict_response_accepts_numeric_confidence() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"result":"infected","confidence":0.87}"#).unwrap();
        assert_eq!(resp.result, PredictionLabel::Infected);
        assert_eq!(resp.confidence, 0.87);
        assert_eq!(resp.message, None);
    }

    #[test]
    fn predict_response_accepts_string_confidence() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"result":"not infected","confidence":"87","message":"ok"}"#)
                .unwrap();
        assert_eq!(resp.result, PredictionLabel::NotInfected);
        assert_eq!(resp.confidence, 87.0);
        assert_eq!(resp.message.as_deref(), Some("ok"));
    }

    #[test]
    fn predict_response_rejects_garbage_confidence() {
        let parsed: Result<PredictResponse, _> =
            serde_json::from_str(r#"{"result":"infected","confidence":"high"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn record_id_accepts_both_key_shapes() {
        let with_int: PredictionRecord = serde_json::from_str(
            r#"{"id":7,"image_path":"leaf.jpg","result":"infected","confidence":0.91,"created_at":"2025-06-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(with_int.id, Some(RecordId::Int(7)));
        assert_eq!(with_int.id.unwrap().to_string(), "7");

        let with_text: PredictionRecord = serde_json::from_str(
            r#"{"id":"a1b2","result":"not infected","confidence":12,"created_at":"2025-06-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(with_text.id, Some(RecordId::Text("a1b2".to_string())));
        assert_eq!(with_text.image_path, None);
    }

    #[test]
    fn new_prediction_serializes_wire_label() {
        let row = NewPrediction {
            image_path: "leaf.jpg".to_string(),
            result: PredictionLabel::NotInfected,
            confidence: 0.42,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["result"], "not infected");
        assert_eq!(json["image_path"], "leaf.jpg");
    }
}
