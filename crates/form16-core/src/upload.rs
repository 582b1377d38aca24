//! Upload widget state machine and the single-request analysis flow
//!
//! ```text
//! Idle ──select pdf──▶ FileSelected ──submit──▶ Submitting ──ok──▶ Complete
//!   │                      ▲   │                     │
//!   └──select other──▶ Invalid ◀┘                    └──err──▶ Failed
//! ```
//!
//! Complete and Failed accept new selections and keep the held file, so the
//! same PDF can be resubmitted by hand. Nothing is retried automatically.

use crate::analysis::AnalysisResult;
use crate::config::PageConfig;
use crate::error::AnalyzeError;
use crate::ports::AnalysisClient;
use crate::render::StatusLine;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    FileSelected,
    Invalid,
    Submitting,
    Complete,
    Failed,
}

impl UploadState {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::FileSelected => "file-selected",
            UploadState::Invalid => "invalid",
            UploadState::Submitting => "submitting",
            UploadState::Complete => "complete",
            UploadState::Failed => "failed",
        }
    }
}

/// A picked or dropped file
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub mime_type: String,
    pub handle: F,
}

impl<F> SelectedFile<F> {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, handle: F) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            handle,
        }
    }
}

/// Holds the selected file and derives every control state from it
#[derive(Debug)]
pub struct UploadWidget<F> {
    state: UploadState,
    file: Option<SelectedFile<F>>,
    accepted_mime_type: String,
    status: Option<StatusLine>,
    results_visible: bool,
}

impl<F> UploadWidget<F> {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            state: UploadState::Idle,
            file: None,
            accepted_mime_type: config.accepted_mime_type.clone(),
            status: None,
            results_visible: false,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn file(&self) -> Option<&SelectedFile<F>> {
        self.file.as_ref()
    }

    /// Status label content, `None` until the first interaction
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Submit is enabled exactly when a valid file is held and idle
    pub fn submit_enabled(&self) -> bool {
        self.file.is_some() && self.state != UploadState::Submitting
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    /// Replace the held file with a new selection
    ///
    /// Selections made while a request is in flight are ignored so the
    /// pending response decides the next state.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::InvalidFileType`] when the declared type is not
    /// exactly the accepted one. The held file is cleared in that case.
    pub fn select(&mut self, file: SelectedFile<F>) -> Result<(), AnalyzeError> {
        if self.state == UploadState::Submitting {
            debug!(name = %file.name, "ignoring selection during upload");
            return Ok(());
        }

        if file.mime_type != self.accepted_mime_type {
            debug!(name = %file.name, mime_type = %file.mime_type, "rejected file");
            self.file = None;
            self.state = UploadState::Invalid;
            self.status = Some(StatusLine::invalid_file());
            return Err(AnalyzeError::InvalidFileType {
                mime_type: file.mime_type,
            });
        }

        debug!(name = %file.name, "file selected");
        self.status = Some(StatusLine::file_selected(&file.name));
        self.file = Some(file);
        self.state = UploadState::FileSelected;
        Ok(())
    }

    /// Move to Submitting and hand back the file to send
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::AlreadySubmitting`] while a request is running
    /// and [`AnalyzeError::NoFileSelected`] when no valid file is held.
    /// Nothing changes in either case.
    pub fn begin_submit(&mut self) -> Result<SelectedFile<F>, AnalyzeError>
    where
        F: Clone,
    {
        if self.state == UploadState::Submitting {
            return Err(AnalyzeError::AlreadySubmitting);
        }
        let file = self.file.clone().ok_or(AnalyzeError::NoFileSelected)?;

        debug!(name = %file.name, "submitting");
        self.state = UploadState::Submitting;
        self.results_visible = false;
        self.status = Some(StatusLine::processing());
        Ok(file)
    }

    /// Record that results were rendered and the panel revealed
    pub fn complete(&mut self) {
        if self.state != UploadState::Submitting {
            return;
        }
        debug!("analysis complete");
        self.state = UploadState::Complete;
        self.results_visible = true;
        self.status = Some(StatusLine::complete());
    }

    /// Record a failed analysis; the widget is immediately usable again
    pub fn fail(&mut self, error: &AnalyzeError) {
        if self.state != UploadState::Submitting {
            return;
        }
        warn!(error = %error, is_async = error.is_async(), "analysis failed");
        self.state = UploadState::Failed;
        self.results_visible = false;
        self.status = Some(StatusLine::failed(error));
    }
}

/// Send `file` to the analysis endpoint and parse the result
///
/// Runs the status check, body read and JSON parse in sequence. Every failure
/// is reported through the same [`AnalyzeError`] path.
pub async fn analyze<C: AnalysisClient>(
    client: &C,
    config: &PageConfig,
    file: &C::File,
) -> Result<AnalysisResult, AnalyzeError> {
    let response = client
        .post_file(&config.endpoint, &config.upload_field, file)
        .await?;

    if !response.is_success() {
        return Err(AnalyzeError::server(response.status, response.body));
    }

    AnalysisResult::from_json(&response.body).map_err(|e| AnalyzeError::Response {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpResponse;
    use crate::render::Tone;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn pdf(name: &str) -> SelectedFile<u32> {
        SelectedFile::new(name, "application/pdf", 1)
    }

    fn widget() -> UploadWidget<u32> {
        UploadWidget::new(&PageConfig::default())
    }

    /// Records every request and replays a canned outcome
    struct FakeClient {
        outcome: Result<HttpResponse, AnalyzeError>,
        calls: RefCell<Vec<(String, String, u32)>>,
    }

    impl FakeClient {
        fn responding(status: u16, body: &str) -> Self {
            Self {
                outcome: Ok(HttpResponse::new(status, body)),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Err(AnalyzeError::Transport {
                    message: message.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisClient for FakeClient {
        type File = u32;

        async fn post_file(
            &self,
            endpoint: &str,
            field: &str,
            file: &u32,
        ) -> Result<HttpResponse, AnalyzeError> {
            self.calls
                .borrow_mut()
                .push((endpoint.to_string(), field.to_string(), *file));
            self.outcome.clone()
        }
    }

    #[test]
    fn test_initial_state() {
        let w = widget();
        assert_eq!(w.state(), UploadState::Idle);
        assert!(!w.submit_enabled());
        assert!(!w.results_visible());
        assert!(w.status().is_none());
    }

    #[test]
    fn test_select_pdf_enables_submit() {
        let mut w = widget();
        w.select(pdf("form16.pdf")).unwrap();
        assert_eq!(w.state(), UploadState::FileSelected);
        assert!(w.submit_enabled());
        assert_eq!(w.status().unwrap().text, "File selected: form16.pdf");
        assert_eq!(w.status().unwrap().tone, Tone::Primary);
    }

    #[test]
    fn test_select_other_type_clears_file() {
        let mut w = widget();
        w.select(pdf("form16.pdf")).unwrap();
        let err = w
            .select(SelectedFile::new("scan.png", "image/png", 2))
            .unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::InvalidFileType {
                mime_type: "image/png".to_string()
            }
        );
        assert_eq!(w.state(), UploadState::Invalid);
        assert!(w.file().is_none());
        assert!(!w.submit_enabled());
        assert_eq!(w.status().unwrap().text, "Please upload a PDF file.");
    }

    #[test]
    fn test_mime_type_must_match_exactly() {
        let mut w = widget();
        assert!(w
            .select(SelectedFile::new("a.pdf", "application/pdf; charset=binary", 1))
            .is_err());
        assert!(w.select(SelectedFile::new("a.pdf", "", 1)).is_err());
        assert!(w.select(SelectedFile::new("a.pdf", "APPLICATION/PDF", 1)).is_err());
    }

    #[test]
    fn test_submit_without_file_is_rejected() {
        let mut w = widget();
        assert_eq!(w.begin_submit().unwrap_err(), AnalyzeError::NoFileSelected);
        assert_eq!(w.state(), UploadState::Idle);
    }

    #[test]
    fn test_submit_disables_and_hides() {
        let mut w = widget();
        w.select(pdf("form16.pdf")).unwrap();
        let file = w.begin_submit().unwrap();
        assert_eq!(file.name, "form16.pdf");
        assert_eq!(w.state(), UploadState::Submitting);
        assert!(!w.submit_enabled());
        assert!(!w.results_visible());
        assert_eq!(w.status().unwrap().text, "Processing... Please wait.");

        // A second click while in flight does nothing
        assert_eq!(w.begin_submit().unwrap_err(), AnalyzeError::AlreadySubmitting);
        assert_eq!(w.state(), UploadState::Submitting);
        assert_eq!(w.file().unwrap().name, "form16.pdf");
    }

    #[test]
    fn test_selection_ignored_while_submitting() {
        let mut w = widget();
        w.select(pdf("first.pdf")).unwrap();
        w.begin_submit().unwrap();
        w.select(SelectedFile::new("x.png", "image/png", 9)).unwrap();
        assert_eq!(w.state(), UploadState::Submitting);
        assert_eq!(w.file().unwrap().name, "first.pdf");
    }

    #[test]
    fn test_complete_reveals_results() {
        let mut w = widget();
        w.select(pdf("form16.pdf")).unwrap();
        w.begin_submit().unwrap();
        w.complete();
        assert_eq!(w.state(), UploadState::Complete);
        assert!(w.results_visible());
        assert!(w.submit_enabled());
        assert_eq!(w.status().unwrap().text, "Analysis Complete!");
    }

    #[test]
    fn test_fail_hides_results_and_reenables() {
        let mut w = widget();
        w.select(pdf("form16.pdf")).unwrap();
        w.begin_submit().unwrap();
        w.complete();
        w.begin_submit().unwrap();
        w.fail(&AnalyzeError::Transport {
            message: "Failed to fetch".to_string(),
        });
        assert_eq!(w.state(), UploadState::Failed);
        assert!(!w.results_visible());
        assert!(w.submit_enabled());
        assert_eq!(
            w.status().unwrap().text,
            "Error: Failed to fetch. Please try again."
        );
    }

    #[test]
    fn test_new_selection_after_failure() {
        let mut w = widget();
        w.select(pdf("a.pdf")).unwrap();
        w.begin_submit().unwrap();
        w.fail(&AnalyzeError::NoFileSelected);
        w.select(pdf("b.pdf")).unwrap();
        assert_eq!(w.state(), UploadState::FileSelected);
        assert_eq!(w.file().unwrap().name, "b.pdf");
    }

    #[test]
    fn test_complete_outside_submit_is_ignored() {
        let mut w = widget();
        w.complete();
        assert_eq!(w.state(), UploadState::Idle);
        assert!(!w.results_visible());
    }

    #[tokio::test]
    async fn test_analyze_posts_once_to_endpoint() {
        let client = FakeClient::responding(200, r#"{"gross_salary": "2,000,000"}"#);
        let result = analyze(&client, &PageConfig::default(), &7).await.unwrap();
        assert_eq!(
            result.gross_salary.as_ref().and_then(|a| a.value()),
            Some(2_000_000.0)
        );
        assert_eq!(
            client.calls.borrow().as_slice(),
            &[("/api/analyze-form16".to_string(), "form16".to_string(), 7)]
        );
    }

    #[tokio::test]
    async fn test_analyze_server_error_with_message() {
        let client = FakeClient::responding(400, r#"{"message":"bad file"}"#);
        let err = analyze(&client, &PageConfig::default(), &1).await.unwrap_err();
        let text = StatusLine::failed(&err).text;
        assert!(text.contains("400"));
        assert!(text.contains("bad file"));
    }

    #[tokio::test]
    async fn test_analyze_server_error_raw_text() {
        let client = FakeClient::responding(503, "Service Unavailable");
        let err = analyze(&client, &PageConfig::default(), &1).await.unwrap_err();
        let text = StatusLine::failed(&err).text;
        assert!(text.contains("503"));
        assert!(text.contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_analyze_bad_json_on_success() {
        let client = FakeClient::responding(200, "<html>oops</html>");
        let err = analyze(&client, &PageConfig::default(), &1).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Response { .. }));
    }

    #[tokio::test]
    async fn test_analyze_transport_failure() {
        let client = FakeClient::failing("Failed to fetch");
        let err = analyze(&client, &PageConfig::default(), &1).await.unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::Transport {
                message: "Failed to fetch".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_full_cycle_through_widget() {
        let config = PageConfig::default();
        let client = FakeClient::responding(200, r#"{"claimed_deductions": {}}"#);
        let mut w: UploadWidget<u32> = UploadWidget::new(&config);
        w.select(pdf("form16.pdf")).unwrap();

        let file = w.begin_submit().unwrap();
        match analyze(&client, &config, &file.handle).await {
            Ok(_) => w.complete(),
            Err(e) => w.fail(&e),
        }

        assert_eq!(w.state(), UploadState::Complete);
        assert_eq!(client.calls.borrow().len(), 1);
    }
}
