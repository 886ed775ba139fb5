use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::schema::{FieldSchema, FieldType};

/// Field answers sent to `POST /forms/{id}/submissions`, keyed by field name.
pub type Registration = Map<String, Value>;

/// One submission as listed by `GET /forms/{id}/submissions`
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

/// The form-defined payload of a submission.
///
/// The service normally returns an object, but degraded responses carry a
/// list instead, so the shape is decided at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Fields {
    Mapping(Map<String, Value>),
    Sequence(Vec<Value>),
    Unknown,
}

impl Default for Fields {
    fn default() -> Self {
        Fields::Mapping(Map::new())
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => Fields::Mapping(map),
            Value::Array(items) => Fields::Sequence(items),
            _ => Fields::Unknown,
        })
    }
}

impl Fields {
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Fields::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl Record {
    /// `club_name` is the headline field of the sample registration form.
    pub fn club_name(&self) -> Option<&str> {
        self.fields.get("club_name").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// One batch of records plus its position in the listing
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub data: Vec<Record>,
    pub pagination: Pagination,
}

/// Answer to a successful submission (status 201).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub code: Option<String>,
}

impl SubmissionReceipt {
    pub fn from_response(body: &Value) -> Self {
        body.get("submission")
            .cloned()
            .and_then(|s| serde_json::from_value(s).ok())
            .unwrap_or_default()
    }
}

/// Checks a registration against a form schema using the rules the service
/// enforces, so obviously broken payloads are not sent.
pub fn validate_registration(schema: &[FieldSchema], reg: &Registration) -> Result<(), String> {
    for field in schema {
        let value = reg.get(&field.name).filter(|v| !is_blank(v));

        let Some(value) = value else {
            if field.required {
                return Err(format!("{} is required", field.label));
            }
            continue;
        };

        match field.field_type {
            FieldType::Email => {
                if !value.as_str().map(looks_like_email).unwrap_or(false) {
                    return Err(format!("{} must be a valid email address", field.label));
                }
            }
            FieldType::Number => {
                let numeric = match value {
                    Value::Number(_) => true,
                    Value::String(s) => s.trim().parse::<f64>().is_ok(),
                    _ => false,
                };
                if !numeric {
                    return Err(format!("{} must be a number", field.label));
                }
            }
            FieldType::Date => {
                if !value.as_str().map(looks_like_date).unwrap_or(false) {
                    return Err(format!("{} must be a date", field.label));
                }
            }
            FieldType::Select => {
                let options = field.options.as_deref().unwrap_or(&[]);
                let chosen = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if !options.iter().any(|o| *o == chosen) {
                    return Err(format!("Invalid {} option: {}", field.label, chosen));
                }
            }
            FieldType::Text | FieldType::Textarea | FieldType::Checkbox => {}
        }
    }

    Ok(())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false)
}

fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
