use crate::errors::ClientError;
use crate::format::{format_date, format_time, split_clock};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type CatchId = i64;

/// One logged catch, normalized to the canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireCatch")]
pub struct CatchRecord {
    pub id: CatchId,
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub length_in: Option<f64>,
    pub weight_lbs: Option<f64>,
    pub temperature: Option<f64>,
    pub bait: Option<String>,
}

impl CatchRecord {
    /// `date` + `time`, with a missing or unreadable time meaning midnight.
    /// `None` when the date itself cannot be parsed.
    pub fn effective_timestamp(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = split_clock(&self.time)
            .and_then(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
            .unwrap_or_default();
        Some(date.and_time(time))
    }

    /// The time with any seconds component dropped.
    pub fn time_for_edit(&self) -> &str {
        match self.time.match_indices(':').nth(1) {
            Some((idx, _)) => &self.time[..idx],
            None => &self.time,
        }
    }
}

/// What the backend actually sends. Numbers may arrive as strings, and older
/// rows carry a free-text `weather` field instead of `temperature`.
#[derive(Deserialize)]
struct WireCatch {
    id: CatchId,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    species: Option<String>,
    #[serde(default)]
    length_in: Option<Value>,
    #[serde(default)]
    weight_lbs: Option<Value>,
    #[serde(default)]
    temperature: Option<Value>,
    #[serde(default)]
    weather: Option<Value>,
    #[serde(default)]
    bait: Option<String>,
}

impl From<WireCatch> for CatchRecord {
    fn from(wire: WireCatch) -> Self {
        let date = wire
            .date
            .map(|date| match date.split_once('T') {
                Some((day, _)) => day.trim().to_string(),
                None => date.trim().to_string(),
            })
            .unwrap_or_default();

        let temperature = wire
            .temperature
            .as_ref()
            .and_then(lenient_number)
            .or_else(|| wire.weather.as_ref().and_then(weather_temperature));

        Self {
            id: wire.id,
            date,
            time: wire.time.map(|t| t.trim().to_string()).unwrap_or_default(),
            location: wire.location.unwrap_or_default(),
            species: wire.species.unwrap_or_default(),
            length_in: wire.length_in.as_ref().and_then(lenient_number),
            weight_lbs: wire.weight_lbs.as_ref().and_then(lenient_number),
            temperature,
            bait: wire.bait.filter(|bait| !bait.trim().is_empty()),
        }
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn weather_temperature(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => leading_number(text),
        other => lenient_number(other),
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .take_while(|&(idx, c)| c.is_ascii_digit() || c == '.' || (idx == 0 && (c == '-' || c == '+')))
        .map(|(idx, c)| idx + c.len_utf8())
        .last()?;
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Record body sent on create and edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchDraft {
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub length_in: f64,
    pub weight_lbs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bait: Option<String>,
}

/// Raw form submission; every field is whatever the user typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatchForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub length_in: String,
    #[serde(default)]
    pub weight_lbs: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub bait: String,
}

impl CatchForm {
    /// Validates the form into a draft. When `now` is given, an empty date or
    /// time is filled from it; otherwise both are required.
    pub fn into_draft(self, now: Option<NaiveDateTime>) -> Result<CatchDraft, ClientError> {
        let date = match (self.date.trim(), now) {
            ("", Some(now)) => now.date(),
            ("", None) => return Err(ClientError::invalid("date is required")),
            (raw, _) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ClientError::invalid(format!("date must be YYYY-MM-DD, got '{raw}'")))?,
        };

        let (hour, minute) = match (self.time.trim(), now) {
            ("", Some(now)) => (now.hour(), now.minute()),
            ("", None) => return Err(ClientError::invalid("time is required")),
            (raw, _) => split_clock(raw)
                .ok_or_else(|| ClientError::invalid(format!("time must be HH:MM, got '{raw}'")))?,
        };

        Ok(CatchDraft {
            date: date.format("%Y-%m-%d").to_string(),
            time: format!("{hour:02}:{minute:02}"),
            location: required_text("location", &self.location)?,
            species: required_text("species", &self.species)?,
            length_in: measurement("length_in", &self.length_in)?,
            weight_lbs: measurement("weight_lbs", &self.weight_lbs)?,
            temperature: optional_number("temperature", &self.temperature)?,
            bait: Some(self.bait.trim().to_string()).filter(|bait| !bait.is_empty()),
        })
    }
}

impl From<&CatchRecord> for CatchForm {
    fn from(record: &CatchRecord) -> Self {
        let number = |value: Option<f64>| value.map(|n| n.to_string()).unwrap_or_default();
        Self {
            date: record.date.clone(),
            time: record.time_for_edit().to_string(),
            location: record.location.clone(),
            species: record.species.clone(),
            length_in: number(record.length_in),
            weight_lbs: number(record.weight_lbs),
            temperature: number(record.temperature),
            bait: record.bait.clone().unwrap_or_default(),
        }
    }
}

fn required_text(field: &str, raw: &str) -> Result<String, ClientError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ClientError::invalid(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn measurement(field: &str, raw: &str) -> Result<f64, ClientError> {
    let value = optional_number(field, raw)?
        .ok_or_else(|| ClientError::invalid(format!("{field} is required")))?;
    if value < 0.0 {
        return Err(ClientError::invalid(format!("{field} must not be negative")));
    }
    Ok(value)
}

fn optional_number(field: &str, raw: &str) -> Result<Option<f64>, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ClientError::invalid(format!("{field} must be a number, got '{raw}'"))),
    }
}

/// A table row with display formatting applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchRow {
    pub id: CatchId,
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub length_in: Option<f64>,
    pub weight_lbs: Option<f64>,
    pub temperature: Option<f64>,
    pub bait: Option<String>,
}

impl From<&CatchRecord> for CatchRow {
    fn from(record: &CatchRecord) -> Self {
        Self {
            id: record.id,
            date: format_date(&record.date),
            time: format_time(&record.time),
            location: record.location.clone(),
            species: record.species.clone(),
            length_in: record.length_in,
            weight_lbs: record.weight_lbs,
            temperature: record.temperature,
            bait: record.bait.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub rows: Vec<CatchRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub kind: String,
    pub title: String,
    pub style: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CatchRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ingest_accepts_numeric_strings_and_nulls() {
        let record = parse(
            r#"{"id":1,"date":"2024-03-05","time":"06:15:00","location":"Lake","species":"Bass","length_in":"14.5","weight_lbs":null,"bait":""}"#,
        );
        assert_eq!(record.length_in, Some(14.5));
        assert_eq!(record.weight_lbs, None);
        assert_eq!(record.bait, None);
        assert_eq!(record.time_for_edit(), "06:15");
    }

    #[test]
    fn ingest_normalizes_legacy_weather() {
        let record = parse(r#"{"id":2,"date":"2024-03-05T00:00:00","weather":"68F sunny"}"#);
        assert_eq!(record.date, "2024-03-05");
        assert_eq!(record.temperature, Some(68.0));

        let record = parse(r#"{"id":3,"weather":"overcast"}"#);
        assert_eq!(record.temperature, None);

        let record = parse(r#"{"id":4,"temperature":55,"weather":"80"}"#);
        assert_eq!(record.temperature, Some(55.0));
    }

    #[test]
    fn effective_timestamp_defaults_to_midnight() {
        let record = parse(r#"{"id":1,"date":"2024-03-05"}"#);
        let ts = record.effective_timestamp().unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 00:00:00");

        let record = parse(r#"{"id":1,"date":"soon","time":"10:00"}"#);
        assert!(record.effective_timestamp().is_none());
    }

    #[test]
    fn form_rejects_non_numeric_weight() {
        let form = CatchForm {
            date: "2024-03-05".into(),
            time: "07:45".into(),
            location: "Pier".into(),
            species: "Trout".into(),
            length_in: "12".into(),
            weight_lbs: "heavy".into(),
            ..CatchForm::default()
        };
        let err = form.into_draft(None).unwrap_err();
        assert!(err.to_string().contains("weight_lbs"));
    }

    #[test]
    fn form_fills_missing_date_and_time_on_create() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(17, 42, 9)
            .unwrap();
        let form = CatchForm {
            location: "Dock".into(),
            species: "Perch".into(),
            length_in: "8".into(),
            weight_lbs: "0.75".into(),
            temperature: " ".into(),
            bait: " worm ".into(),
            ..CatchForm::default()
        };
        let draft = form.into_draft(Some(now)).unwrap();
        assert_eq!(draft.date, "2025-06-01");
        assert_eq!(draft.time, "17:42");
        assert_eq!(draft.temperature, None);
        assert_eq!(draft.bait.as_deref(), Some("worm"));
    }

    #[test]
    fn form_requires_date_on_edit() {
        let form = CatchForm {
            time: "07:45".into(),
            ..CatchForm::default()
        };
        assert!(form.into_draft(None).is_err());
    }

    #[test]
    fn edit_form_truncates_seconds() {
        let record = parse(r#"{"id":9,"date":"2024-01-01","time":"23:59:59","weight_lbs":3}"#);
        let form = CatchForm::from(&record);
        assert_eq!(form.time, "23:59");
        assert_eq!(form.weight_lbs, "3");
        assert_eq!(form.length_in, "");
    }
}
