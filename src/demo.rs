use serde_json::{json, Value};

use crate::form::{FieldSchema, FieldType, FormDefinition, Registration};

/// The U14 championship registration form used by the demo.
pub fn competition_form() -> FormDefinition {
    FormDefinition {
        name: "U14 Championship Registration 2026".to_string(),
        description: "Register your team for the U14 Championship. Deadline: March 31, 2026"
            .to_string(),
        schema: competition_schema(),
    }
}

pub fn competition_schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new("club_name", FieldType::Text, "Club Name", true),
        FieldSchema::new("team_name", FieldType::Text, "Team Name", true),
        FieldSchema::new("coach_email", FieldType::Email, "Coach Email Address", true),
        FieldSchema::new("num_players", FieldType::Number, "Number of Players (max 14)", true),
        FieldSchema::new("division", FieldType::Select, "Division", true)
            .with_options(&["Div A", "Div B", "Div C"]),
        FieldSchema::new("notes", FieldType::Textarea, "Any special notes", false),
    ]
}

/// Three sample team registrations
pub fn sample_registrations() -> Vec<Registration> {
    vec![
        registration(json!({
            "club_name": "City United",
            "team_name": "Youth A",
            "coach_email": "coach@cityunited.com",
            "num_players": 14,
            "division": "Div A",
            "notes": "Looking forward to the tournament!"
        })),
        registration(json!({
            "club_name": "Metro Stars",
            "team_name": "Development",
            "coach_email": "dev@metrostars.com",
            "num_players": 12,
            "division": "Div B",
            "notes": "First time competing"
        })),
        registration(json!({
            "club_name": "Riverside FC",
            "team_name": "Premiers",
            "coach_email": "premier@riverside.com",
            "num_players": 14,
            "division": "Div A",
            "notes": null
        })),
    ]
}

/// The single registration submitted by the no-argument demo run.
pub fn demo_registration() -> Registration {
    registration(json!({
        "club_name": "City United",
        "team_name": "Youth A",
        "coach_email": "coach@cityunited.com",
        "num_players": 14,
        "division": "Div A",
        "notes": "Ready to compete!"
    }))
}

fn registration(value: Value) -> Registration {
    match value {
        Value::Object(map) => map,
        _ => Registration::new(),
    }
}
