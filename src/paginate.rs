use async_trait::async_trait;

use crate::error::ClientError;
use crate::form::{Page, Record};

/// Number of records asked for per page.
pub const PAGE_SIZE: u32 = 100;

/// Anything that can hand out pages of a form's submissions.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page, ClientError>;
}

/// Fetches every page from `source`, in order, and returns all records.
///
/// Stops once the reported position reaches `last_page`. The number of
/// requests is bounded only by what the server reports: a `last_page` that
/// keeps growing keeps the loop going.
///
/// A failed page ends the loop and the records gathered so far are
/// returned; the failure is only logged.
///
/// # Arguments
/// * `source` - Where pages come from, usually a [`crate::SubmissionFeed`]
/// * `limit` - Records asked for per page
pub async fn fetch_all_submissions<S>(source: &S, limit: u32) -> Vec<Record>
where
    S: SubmissionSource + ?Sized,
{
    let mut all_registrations = Vec::new();
    let mut page = 1u32;

    loop {
        // A failed page ends retrieval but keeps what was already collected
        let batch = match source.fetch_page(page, limit).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(page, "Error retrieving registrations: {e}");
                println!("✗ Error retrieving registrations: {e}");
                break;
            }
        };

        // Records are kept in arrival order, duplicates included
        let pagination = batch.pagination;
        all_registrations.extend(batch.data);

        tracing::info!(
            "Retrieved page {}/{}",
            pagination.current_page,
            pagination.last_page
        );

        // Either position reaching the last page ends the listing
        if page.max(pagination.current_page) >= pagination.last_page {
            break;
        }

        page += 1;
    }

    tracing::info!("Retrieved {} registrations total", all_registrations.len());
    println!("✓ Retrieved {} registrations total", all_registrations.len());
    all_registrations
}
