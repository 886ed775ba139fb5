use std::path::Path;

use crate::api::FormsClient;
use crate::config::Credentials;
use crate::display;
use crate::error::ClientError;
use crate::form::{
    self, CreatedForm, ExportSummary, FieldSchema, FormDefinition, Record, Registration,
};
use crate::paginate::{fetch_all_submissions, PAGE_SIZE};

/// The client plus what carries over between operations: the current form,
/// its schema when known, and the credentials.
pub struct Session {
    pub client: FormsClient,
    pub credentials: Credentials,
    pub form_id: Option<u64>,
    /// Empty until a form is created or fetched; registrations are not
    /// checked locally while it is empty.
    pub schema: Vec<FieldSchema>,
}

impl Session {
    pub fn new(client: FormsClient, credentials: Credentials, form_id: Option<u64>) -> Self {
        Session {
            client,
            credentials,
            form_id,
            schema: Vec::new(),
        }
    }

    /// Creates a form and remembers its ID and key for later calls.
    pub async fn create_form(&mut self, definition: &FormDefinition) -> Option<CreatedForm> {
        let Some(token) = self.credentials.admin_token() else {
            println!("✗ {}", ClientError::MissingCredential("admin token (FORMS_ADMIN_TOKEN)"));
            return None;
        };

        match self.client.create_form(token, definition).await {
            Ok(form) => {
                self.form_id = Some(form.id);
                self.schema = definition.schema.clone();
                if form.api_key.is_some() {
                    self.credentials.form_key = form.api_key.clone();
                }
                display::print_created_form(&form);
                Some(form)
            }
            Err(e) => {
                tracing::error!("form creation failed: {e}");
                println!("✗ Error creating form: {e}");
                None
            }
        }
    }

    /// Fetches and prints the current form; its schema is kept for
    /// checking registrations.
    pub async fn show_form(&mut self) -> Result<(), ClientError> {
        let form_id = self.form_id.ok_or(ClientError::MissingFormId)?;
        let details = self
            .client
            .show_form(form_id, self.credentials.form_key())
            .await?;
        display::print_form_details(&details);
        self.schema = details.schema;
        Ok(())
    }

    /// Submits registrations to the current form. Returns how many were
    /// accepted.
    pub async fn submit_registrations(&self, registrations: &[Registration]) -> usize {
        let Some(form_id) = self.form_id else {
            println!("✗ No form ID set. Create a form first.");
            return 0;
        };

        self.client
            .submit_registrations(form_id, &self.schema, registrations)
            .await
    }

    /// Every submission of the current form, across all pages.
    pub async fn get_registrations(&self) -> Vec<Record> {
        let (Some(form_id), Some(form_key)) = (self.form_id, self.credentials.form_key()) else {
            println!("✗ No form ID or API key set.");
            return Vec::new();
        };

        let feed = self.client.submissions(form_id, form_key);
        fetch_all_submissions(&feed, PAGE_SIZE).await
    }

    /// Writes `records` to CSV. A failed export is reported and logged
    /// rather than returned, like the other session operations.
    pub fn export(&self, records: &[Record], filename: Option<&Path>) -> Option<ExportSummary> {
        match form::export_registrations_to_csv(records, filename) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::error!("CSV export failed: {e}");
                println!("✗ Error exporting registrations: {e}");
                None
            }
        }
    }
}
