//! Ranking API client — the single point of entry for all remote calls.
//!
//! The scoring service owns text extraction, feature scoring, and ranking;
//! this module only moves files up and result sets down. Each method issues
//! exactly one request: no retries, no cancellation. A failed action stays
//! failed until the user re-triggers it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::errors::AppError;
use crate::models::score::ScoreEntry;

/// A file staged for upload: its display name plus its bytes.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The remote ranking service seam. The controller holds an
/// `Arc<dyn RankingApi>` so tests can substitute a mock network layer.
#[async_trait]
pub trait RankingApi: Send + Sync {
    /// Uploads the single job-description file (multipart field `pdf`).
    /// The response body is ignored beyond success/failure status.
    async fn upload_job_description(&self, pdf: FilePart) -> Result<(), AppError>;

    /// Uploads all selected resumes under the repeated multipart field
    /// `pdfs`. Response body ignored beyond status, as above.
    async fn upload_candidate_resumes(&self, pdfs: Vec<FilePart>) -> Result<(), AppError>;

    /// Asks the service to rank whatever was previously uploaded. Server-side
    /// state — nothing is passed in this call.
    async fn calculate_ranks(&self) -> Result<Vec<ScoreEntry>, AppError>;
}

/// `RankingApi` over HTTP.
pub struct HttpRankingApi {
    client: Client,
    base_url: String,
}

impl HttpRankingApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Maps a non-success status to `AppError::Api`, carrying whatever body
    /// the service sent back.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RankingApi for HttpRankingApi {
    async fn upload_job_description(&self, pdf: FilePart) -> Result<(), AppError> {
        debug!("POST /upload_job_description ({})", pdf.file_name);
        let form = Form::new().part("pdf", file_part(pdf)?);

        let response = self
            .client
            .post(self.endpoint("upload_job_description"))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn upload_candidate_resumes(&self, pdfs: Vec<FilePart>) -> Result<(), AppError> {
        debug!("POST /upload_candidate_resumes ({} files)", pdfs.len());
        let mut form = Form::new();
        for pdf in pdfs {
            form = form.part("pdfs", file_part(pdf)?);
        }

        let response = self
            .client
            .post(self.endpoint("upload_candidate_resumes"))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn calculate_ranks(&self) -> Result<Vec<ScoreEntry>, AppError> {
        debug!("GET /calculate_ranks");
        let response = self
            .client
            .get(self.endpoint("calculate_ranks"))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        let entries: Vec<ScoreEntry> = serde_json::from_str(&body)?;

        debug!("ranking returned {} entries", entries.len());
        Ok(entries)
    }
}

fn file_part(file: FilePart) -> Result<Part, AppError> {
    Ok(Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str("application/pdf")?)
}
