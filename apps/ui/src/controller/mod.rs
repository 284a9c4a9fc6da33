//! The view controller: transient selection state, three independent busy
//! flags, and the named operations the session loop drives. Nothing here is
//! persisted — a new session starts from rest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{FilePart, RankingApi};
use crate::errors::AppError;
use crate::models::score::{ranked, ScoreEntry};

/// A file chosen by the user. Bytes are read at upload time, not selection
/// time, so a file that vanished after selection surfaces as an upload
/// failure rather than a selection error.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: PathBuf,
}

impl SelectedFile {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    async fn read(&self) -> Result<FilePart, AppError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| AppError::File {
                path: self.path.clone(),
                source,
            })?;
        Ok(FilePart {
            file_name: self.file_name(),
            bytes,
        })
    }
}

/// Outcome of a controller operation, handed to the presentation layer to
/// surface however it likes. Replaces the original UI's blocking alerts.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    JobFileSelected { name: String },
    ResumesSelected { count: usize },
    JobDescriptionUploaded,
    JobDescriptionUploadFailed { reason: String },
    ResumesUploaded { count: usize },
    ResumesUploadFailed { reason: String },
    RanksUpdated { count: usize },
    RankingFailed { reason: String },
    /// The triggering control is effectively disabled: precondition unmet or
    /// the action is already in flight.
    Ignored { reason: &'static str },
}

/// The single owner of all UI state. State is mutated only through the named
/// operations below; rendering is a pure projection over it.
pub struct Matcher {
    api: Arc<dyn RankingApi>,
    job_file: Option<SelectedFile>,
    resume_files: Vec<SelectedFile>,
    results: Vec<ScoreEntry>,
    is_loading: bool,
    is_uploading_jd: bool,
    is_uploading_resumes: bool,
}

impl Matcher {
    pub fn new(api: Arc<dyn RankingApi>) -> Self {
        Self {
            api,
            job_file: None,
            resume_files: Vec::new(),
            results: Vec::new(),
            is_loading: false,
            is_uploading_jd: false,
            is_uploading_resumes: false,
        }
    }

    pub fn job_file(&self) -> Option<&SelectedFile> {
        self.job_file.as_ref()
    }

    pub fn resume_files(&self) -> &[SelectedFile] {
        &self.resume_files
    }

    pub fn results(&self) -> &[ScoreEntry] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replaces the selected job description. The PDF constraint is advisory
    /// only: anything else is accepted with a warning.
    pub fn select_job_file(&mut self, path: impl Into<PathBuf>) -> Notice {
        let file = SelectedFile::new(path);
        warn_if_not_pdf(&file.path);
        let name = file.file_name();
        self.job_file = Some(file);
        Notice::JobFileSelected { name }
    }

    /// Replaces the resume selection wholesale — never appends.
    pub fn select_resume_files(&mut self, paths: Vec<PathBuf>) -> Notice {
        for path in &paths {
            warn_if_not_pdf(path);
        }
        self.resume_files = paths.into_iter().map(SelectedFile::new).collect();
        Notice::ResumesSelected {
            count: self.resume_files.len(),
        }
    }

    /// Uploads the selected job description. Leaves the selection and the
    /// current results untouched; the busy flag is cleared on every exit
    /// path, success or failure.
    pub async fn upload_job_description(&mut self) -> Notice {
        if self.is_uploading_jd {
            return Notice::Ignored {
                reason: "job description upload already in flight",
            };
        }
        let Some(file) = self.job_file.clone() else {
            return Notice::Ignored {
                reason: "no job description selected",
            };
        };

        self.is_uploading_jd = true;
        let outcome = self.send_job_description(&file).await;
        self.is_uploading_jd = false;

        match outcome {
            Ok(()) => {
                info!("job description uploaded: {}", file.file_name());
                Notice::JobDescriptionUploaded
            }
            Err(e) => {
                warn!("job description upload failed: {e}");
                Notice::JobDescriptionUploadFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Uploads the full resume selection in one multipart request, same
    /// flag discipline as the job-description upload.
    pub async fn upload_resumes(&mut self) -> Notice {
        if self.is_uploading_resumes {
            return Notice::Ignored {
                reason: "resume upload already in flight",
            };
        }
        if self.resume_files.is_empty() {
            return Notice::Ignored {
                reason: "no resumes selected",
            };
        }

        self.is_uploading_resumes = true;
        let count = self.resume_files.len();
        let outcome = self.send_resumes().await;
        self.is_uploading_resumes = false;

        match outcome {
            Ok(()) => {
                info!("{count} resume(s) uploaded");
                Notice::ResumesUploaded { count }
            }
            Err(e) => {
                warn!("resume upload failed: {e}");
                Notice::ResumesUploadFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Ranks whatever was previously uploaded (server-side state) and
    /// replaces the result set wholesale. The original UI left this path
    /// unhandled and could wedge its loading flag; here every exit clears
    /// the flag, and a failure leaves the current results untouched.
    pub async fn calculate_ranks(&mut self) -> Notice {
        if self.is_loading {
            return Notice::Ignored {
                reason: "ranking already in flight",
            };
        }

        self.is_loading = true;
        let outcome = self.api.calculate_ranks().await;
        self.is_loading = false;

        match outcome {
            Ok(entries) => {
                let count = entries.len();
                info!("ranking complete: {count} entries");
                self.results = entries;
                Notice::RanksUpdated { count }
            }
            Err(e) => {
                warn!("ranking failed: {e}");
                Notice::RankingFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Pure projection: descending by score, stable for ties.
    pub fn ranked_results(&self) -> Vec<ScoreEntry> {
        ranked(&self.results)
    }

    async fn send_job_description(&self, file: &SelectedFile) -> Result<(), AppError> {
        let part = file.read().await?;
        self.api.upload_job_description(part).await
    }

    async fn send_resumes(&self) -> Result<(), AppError> {
        let mut parts = Vec::with_capacity(self.resume_files.len());
        for file in &self.resume_files {
            parts.push(file.read().await?);
        }
        self.api.upload_candidate_resumes(parts).await
    }
}

fn warn_if_not_pdf(path: &Path) {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        warn!(
            "{} does not look like a PDF; the scoring service may reject it",
            path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Mock network layer recording what was sent and returning canned
    /// outcomes.
    #[derive(Default)]
    struct MockApi {
        fail_uploads: bool,
        fail_ranks: bool,
        ranks: Vec<ScoreEntry>,
        jd_uploads: Mutex<Vec<String>>,
        resume_uploads: Mutex<Vec<Vec<String>>>,
    }

    impl MockApi {
        fn failing_uploads() -> Self {
            MockApi {
                fail_uploads: true,
                ..Default::default()
            }
        }

        fn with_ranks(ranks: Vec<ScoreEntry>) -> Self {
            MockApi {
                ranks,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl RankingApi for MockApi {
        async fn upload_job_description(&self, pdf: FilePart) -> Result<(), AppError> {
            if self.fail_uploads {
                return Err(AppError::Api {
                    status: 500,
                    message: "upload rejected".to_string(),
                });
            }
            self.jd_uploads.lock().unwrap().push(pdf.file_name);
            Ok(())
        }

        async fn upload_candidate_resumes(&self, pdfs: Vec<FilePart>) -> Result<(), AppError> {
            if self.fail_uploads {
                return Err(AppError::Api {
                    status: 500,
                    message: "upload rejected".to_string(),
                });
            }
            self.resume_uploads
                .lock()
                .unwrap()
                .push(pdfs.into_iter().map(|p| p.file_name).collect());
            Ok(())
        }

        async fn calculate_ranks(&self) -> Result<Vec<ScoreEntry>, AppError> {
            if self.fail_ranks {
                return Err(AppError::Api {
                    status: 502,
                    message: "ranking unavailable".to_string(),
                });
            }
            Ok(self.ranks.clone())
        }
    }

    fn entry(filename: &str, score: &str) -> ScoreEntry {
        ScoreEntry {
            filename: filename.to_string(),
            score: score.to_string(),
        }
    }

    fn temp_pdf(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"%PDF-1.4 fixture").unwrap();
        path
    }

    fn matcher(api: MockApi) -> Matcher {
        Matcher::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_upload_jd_is_noop_without_selection() {
        let mut m = matcher(MockApi::default());

        let notice = m.upload_job_description().await;

        assert!(matches!(notice, Notice::Ignored { .. }));
        assert!(!m.is_uploading_jd);
    }

    #[tokio::test]
    async fn test_upload_jd_is_noop_while_in_flight() {
        let dir = TempDir::new().unwrap();
        let mut m = matcher(MockApi::default());
        m.select_job_file(temp_pdf(&dir, "jd.pdf"));
        m.is_uploading_jd = true;

        let notice = m.upload_job_description().await;

        assert!(matches!(notice, Notice::Ignored { .. }));
        assert!(m.is_uploading_jd);
    }

    #[tokio::test]
    async fn test_upload_jd_success_clears_flag_and_keeps_state() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(MockApi::default());
        let mut m = Matcher::new(api.clone());
        m.results = vec![entry("old.pdf", "10")];
        m.select_job_file(temp_pdf(&dir, "jd.pdf"));

        let notice = m.upload_job_description().await;

        assert_eq!(notice, Notice::JobDescriptionUploaded);
        assert!(!m.is_uploading_jd);
        assert!(m.job_file().is_some());
        assert_eq!(m.results().len(), 1);
        assert_eq!(*api.jd_uploads.lock().unwrap(), vec!["jd.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_upload_jd_failure_clears_flag() {
        let dir = TempDir::new().unwrap();
        let mut m = matcher(MockApi::failing_uploads());
        m.select_job_file(temp_pdf(&dir, "jd.pdf"));

        let notice = m.upload_job_description().await;

        assert!(matches!(notice, Notice::JobDescriptionUploadFailed { .. }));
        assert!(!m.is_uploading_jd);
    }

    #[tokio::test]
    async fn test_missing_file_surfaces_as_upload_failure() {
        let mut m = matcher(MockApi::default());
        m.select_job_file("/nonexistent/jd.pdf");

        let notice = m.upload_job_description().await;

        assert!(matches!(notice, Notice::JobDescriptionUploadFailed { .. }));
        assert!(!m.is_uploading_jd);
    }

    #[tokio::test]
    async fn test_upload_resumes_is_noop_when_selection_empty() {
        let mut m = matcher(MockApi::default());

        let notice = m.upload_resumes().await;

        assert!(matches!(notice, Notice::Ignored { .. }));
        assert!(!m.is_uploading_resumes);
    }

    #[tokio::test]
    async fn test_upload_resumes_sends_whole_selection() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(MockApi::default());
        let mut m = Matcher::new(api.clone());
        m.select_resume_files(vec![temp_pdf(&dir, "a.pdf"), temp_pdf(&dir, "b.pdf")]);

        let notice = m.upload_resumes().await;

        assert_eq!(notice, Notice::ResumesUploaded { count: 2 });
        assert!(!m.is_uploading_resumes);
        let batches = api.resume_uploads.lock().unwrap();
        assert_eq!(*batches, vec![vec!["a.pdf".to_string(), "b.pdf".to_string()]]);
    }

    #[tokio::test]
    async fn test_upload_resumes_failure_clears_flag() {
        let dir = TempDir::new().unwrap();
        let mut m = matcher(MockApi::failing_uploads());
        m.select_resume_files(vec![temp_pdf(&dir, "a.pdf")]);

        let notice = m.upload_resumes().await;

        assert!(matches!(notice, Notice::ResumesUploadFailed { .. }));
        assert!(!m.is_uploading_resumes);
    }

    #[tokio::test]
    async fn test_reselecting_resumes_replaces_selection() {
        let dir = TempDir::new().unwrap();
        let mut m = matcher(MockApi::default());

        m.select_resume_files(vec![temp_pdf(&dir, "a.pdf"), temp_pdf(&dir, "b.pdf")]);
        m.select_resume_files(vec![temp_pdf(&dir, "c.pdf")]);

        let names: Vec<String> = m.resume_files().iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["c.pdf"]);
    }

    #[tokio::test]
    async fn test_calculate_ranks_replaces_results_wholesale() {
        let mut m = matcher(MockApi::with_ranks(vec![
            entry("a.pdf", "42.5"),
            entry("b.pdf", "87.0"),
        ]));
        m.results = vec![entry("stale.pdf", "99")];

        let notice = m.calculate_ranks().await;

        assert_eq!(notice, Notice::RanksUpdated { count: 2 });
        assert!(!m.is_loading());
        assert_eq!(m.results().len(), 2);
        assert!(m.results().iter().all(|e| e.filename != "stale.pdf"));
    }

    #[tokio::test]
    async fn test_calculate_ranks_failure_clears_flag_and_keeps_results() {
        let mut m = matcher(MockApi {
            fail_ranks: true,
            ..Default::default()
        });
        m.results = vec![entry("kept.pdf", "55")];

        let notice = m.calculate_ranks().await;

        assert!(matches!(notice, Notice::RankingFailed { .. }));
        assert!(!m.is_loading());
        assert_eq!(m.results().len(), 1);
    }

    #[tokio::test]
    async fn test_ranked_results_sorts_descending() {
        let mut m = matcher(MockApi::with_ranks(vec![
            entry("a.pdf", "42.5"),
            entry("b.pdf", "87.0"),
        ]));
        m.calculate_ranks().await;

        let ranked = m.ranked_results();

        assert_eq!(ranked[0].filename, "b.pdf");
        assert_eq!(ranked[1].filename, "a.pdf");
        // derivation, not mutation: stored order is the wire order
        assert_eq!(m.results()[0].filename, "a.pdf");
    }
}
