use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input types the forms service accepts in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Select,
    Checkbox,
    Textarea,
    Date,
}

/// One entry of a form schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSchema {
    pub fn new(name: &str, field_type: FieldType, label: &str, required: bool) -> Self {
        FieldSchema {
            name: name.to_string(),
            field_type,
            label: label.to_string(),
            required,
            options: None,
        }
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }
}

/// Body of `POST /forms`
#[derive(Debug, Clone, Serialize)]
pub struct FormDefinition {
    pub name: String,
    pub description: String,
    pub schema: Vec<FieldSchema>,
}

/// What the service hands back after creating a form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedForm {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
}

impl CreatedForm {
    /// Accepts both `{"form": {...}}` and a bare form object.
    pub fn from_response(mut body: Value) -> Result<Self, serde_json::Error> {
        let form = match body.get_mut("form") {
            Some(inner) => inner.take(),
            None => body,
        };
        serde_json::from_value(form)
    }
}

/// `GET /forms/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct FormDetails {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Vec<FieldSchema>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
