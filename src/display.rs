use crate::form::{CreatedForm, FormDetails, Record};

/// One summary line per registration: `  - club (code)`
pub fn format_registration_line(record: &Record) -> String {
    let club = record.club_name().unwrap_or("None");
    let code = record.code.as_deref().unwrap_or("?");
    format!("  - {} ({})", club, code)
}

/// Summary of a newly created form, one entry per printed line.
pub fn created_form_lines(form: &CreatedForm) -> Vec<String> {
    let mut lines = vec!["✓ Form created successfully!".to_string()];
    if let Some(name) = &form.name {
        lines.push(format!("  Name: {}", name));
    }
    lines.push(format!("  Form ID: {}", form.id));
    lines.push(format!("  API Key: {}", form.api_key.as_deref().unwrap_or("None")));
    if let Some(code) = &form.code {
        lines.push(format!("  Form Code: {}", code));
    }
    if let Some(url) = &form.embed_url {
        lines.push(format!("  Embed URL: {}", url));
    }
    if let Some(endpoint) = &form.api_endpoint {
        lines.push(format!("  Submissions endpoint: {}", endpoint));
    }
    lines
}

pub fn print_created_form(form: &CreatedForm) {
    for line in created_form_lines(form) {
        println!("{}", line);
    }
}

pub fn form_details_lines(form: &FormDetails) -> Vec<String> {
    let mut lines = vec![format!(
        "Form {} - {}",
        form.id,
        form.name.as_deref().unwrap_or("Untitled Form")
    )];
    if let Some(description) = &form.description {
        lines.push(format!("  {}", description));
    }
    if let Some(code) = &form.code {
        lines.push(format!("  Code: {}", code));
    }
    if let Some(status) = &form.status {
        lines.push(format!("  Status: {}", status));
    }
    if let Some(created) = &form.created_at {
        let updated = form.updated_at.as_deref().unwrap_or(created.as_str());
        lines.push(format!("  Created: {} (updated {})", created, updated));
    }
    lines.push(format!("  Fields ({}):", form.schema.len()));
    for field in &form.schema {
        let required = if field.required { " *" } else { "" };
        lines.push(format!(
            "    {} [{:?}] {}{}",
            field.name, field.field_type, field.label, required
        ));
    }
    lines
}

pub fn print_form_details(form: &FormDetails) {
    for line in form_details_lines(form) {
        println!("{}", line);
    }
}

pub fn print_registrations(records: &[Record]) {
    if records.is_empty() {
        return;
    }
    println!("\nRegistrations:");
    for record in records {
        println!("{}", format_registration_line(record));
    }
}
