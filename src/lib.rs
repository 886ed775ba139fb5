pub mod api;
pub mod config;
pub mod demo;
pub mod display;
pub mod error;
pub mod form;
pub mod paginate;
pub mod session;

pub use api::{FormsClient, SubmissionFeed};
pub use error::ClientError;
pub use paginate::{fetch_all_submissions, SubmissionSource, PAGE_SIZE};
pub use session::Session;
