use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{excerpt, ClientError, BODY_EXCERPT_LEN};
use crate::form::{
    validate_registration, CreatedForm, FieldSchema, FormDefinition, FormDetails, Page,
    Registration, SubmissionReceipt,
};
use crate::paginate::SubmissionSource;

/// Value of the `X-API-Client` header sent with submissions.
pub const API_CLIENT_NAME: &str = "sports-org-admin";

/// Thin client for the Dynamic Forms REST API.
pub struct FormsClient {
    http: Client,
    base_url: String,
}

impl FormsClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self::with_client(http, &config.api_base))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        FormsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /forms` with the administrative token.
    pub async fn create_form(
        &self,
        admin_token: &str,
        definition: &FormDefinition,
    ) -> Result<CreatedForm, ClientError> {
        let url = self.url("/forms");
        tracing::debug!(%url, name = %definition.name, "creating form");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(admin_token)
            .json(definition)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(status_error(resp, BODY_EXCERPT_LEN).await);
        }

        let body: Value = read_json(resp).await?;
        CreatedForm::from_response(body).map_err(|e| ClientError::Decode {
            status,
            excerpt: e.to_string(),
        })
    }

    /// `GET /forms/{id}`; the per-form key is optional for public forms.
    pub async fn show_form(
        &self,
        form_id: u64,
        form_key: Option<&str>,
    ) -> Result<FormDetails, ClientError> {
        let url = self.url(&format!("/forms/{form_id}"));
        tracing::debug!(%url, "fetching form");

        let mut req = self.http.get(&url);
        if let Some(key) = form_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp, BODY_EXCERPT_LEN).await);
        }
        read_json(resp).await
    }

    /// `POST /forms/{id}/submissions`. Only a 201 counts as accepted.
    pub async fn submit_registration(
        &self,
        form_id: u64,
        registration: &Registration,
    ) -> Result<SubmissionReceipt, ClientError> {
        let url = self.url(&format!("/forms/{form_id}/submissions"));
        tracing::debug!(%url, "submitting registration");

        let resp = self
            .http
            .post(&url)
            .header("X-API-Client", API_CLIENT_NAME)
            .json(registration)
            .send()
            .await?;

        if resp.status() != StatusCode::CREATED {
            return Err(status_error(resp, 100).await);
        }

        // A 201 whose body cannot be read still counts as registered.
        let body = resp.json::<Value>().await.unwrap_or(Value::Null);
        Ok(SubmissionReceipt::from_response(&body))
    }

    /// Submits each registration in turn; a failure is reported and the
    /// batch carries on. Payloads that fail `schema` are not sent.
    ///
    /// Returns how many registrations the service accepted.
    pub async fn submit_registrations(
        &self,
        form_id: u64,
        schema: &[FieldSchema],
        registrations: &[Registration],
    ) -> usize {
        let mut accepted = 0;

        for reg in registrations {
            let label = registration_label(reg);

            if let Err(reason) = validate_registration(schema, reg) {
                tracing::warn!(%label, "skipping invalid registration: {reason}");
                println!("✗ Skipped {label}: {reason}");
                continue;
            }

            match self.submit_registration(form_id, reg).await {
                Ok(receipt) => {
                    accepted += 1;
                    let code = receipt.code.as_deref().unwrap_or("?");
                    println!("✓ {label} registered (code: {code})");
                }
                Err(e) => {
                    tracing::error!(%label, "registration failed: {e}");
                    println!("✗ Failed to register {label}: {e}");
                }
            }
        }

        accepted
    }

    /// Submission listing of one form, read with that form's key.
    pub fn submissions<'a>(&'a self, form_id: u64, form_key: &'a str) -> SubmissionFeed<'a> {
        SubmissionFeed {
            client: self,
            form_id,
            form_key,
        }
    }
}

/// `GET /forms/{id}/submissions` bound to one form and its key.
pub struct SubmissionFeed<'a> {
    client: &'a FormsClient,
    form_id: u64,
    form_key: &'a str,
}

#[async_trait]
impl<'a> SubmissionSource for SubmissionFeed<'a> {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page, ClientError> {
        let url = self
            .client
            .url(&format!("/forms/{}/submissions", self.form_id));
        tracing::debug!(%url, page, limit, "fetching submissions page");

        let resp = self
            .client
            .http
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .bearer_auth(self.form_key)
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            return Err(status_error(resp, BODY_EXCERPT_LEN).await);
        }
        read_json(resp).await
    }
}

/// "club - team" for the sample registrations, else the first text value.
fn registration_label(reg: &Registration) -> String {
    let text = |key: &str| reg.get(key).and_then(Value::as_str);
    match (text("club_name"), text("team_name")) {
        (Some(club), Some(team)) => format!("{club} - {team}"),
        (Some(club), None) => club.to_string(),
        _ => reg
            .values()
            .find_map(Value::as_str)
            .unwrap_or("registration")
            .to_string(),
    }
}

async fn status_error(resp: Response, limit: usize) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Status {
        status,
        body: excerpt(&body, limit),
    }
}

/// Reads the body as text first so a non-JSON answer can be reported.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::debug!("decode failure: {e}");
        ClientError::Decode {
            status,
            excerpt: excerpt(&text, BODY_EXCERPT_LEN),
        }
    })
}
