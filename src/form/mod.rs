pub mod schema;
pub mod submission;
pub mod export;

pub use schema::{CreatedForm, FieldSchema, FieldType, FormDefinition, FormDetails};
pub use submission::{
    validate_registration, Fields, Page, Pagination, Record, Registration, SubmissionReceipt,
};
pub use export::{export_registrations_to_csv, write_registrations, ExportSummary};
