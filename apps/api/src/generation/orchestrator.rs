//! Form/Output Orchestrator — owns the workspace state around a generation call.
//!
//! Flow: begin_submit → (generator call, no lock held) → finish.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Ready(assets) ──submit──▶ Loading
//!                     └──err──▶ Idle (+ one alert)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::generation::generator::{GeneratedAssets, GenerationError};

pub const GENERATION_FAILED_ALERT: &str =
    "Failed to generate assets. Please check console for details.";
pub const COPIED_ALERT: &str = "Copied to clipboard!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading,
    Ready(GeneratedAssets),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    #[default]
    JobDescription,
    InterviewGuide,
}

impl ActiveTab {
    pub fn select(self, assets: &GeneratedAssets) -> &str {
        match self {
            ActiveTab::JobDescription => &assets.job_description,
            ActiveTab::InterviewGuide => &assets.interview_guide,
        }
    }
}

/// Result of asking the orchestrator to start a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank notes; nothing happened.
    Ignored,
    /// A generation is already in flight; the request was rejected, not queued.
    Busy,
    /// State is now `Loading`; the caller must run the generator with these notes.
    Started(String),
}

/// Platform write-text capability.
pub trait Clipboard {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no generated assets to act on")]
    NotReady,
}

/// Failure of `copy_active`, generic over the clipboard's own error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopyError<E> {
    #[error("no generated assets to copy")]
    NotReady,

    #[error("clipboard write failed: {0}")]
    Clipboard(#[source] E),
}

#[derive(Debug)]
pub struct FormOrchestrator {
    state: FormState,
    active_tab: ActiveTab,
    alerts: Vec<String>,
}

impl Default for FormOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormOrchestrator {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            active_tab: ActiveTab::default(),
            alerts: Vec::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FormState::Loading
    }

    pub fn assets(&self) -> Option<&GeneratedAssets> {
        match &self.state {
            FormState::Ready(assets) => Some(assets),
            _ => None,
        }
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    /// Text of the active tab, only while `Ready`.
    pub fn active_text(&self) -> Option<&str> {
        self.assets().map(|a| self.active_tab.select(a))
    }

    pub fn begin_submit(&mut self, raw_notes: &str) -> SubmitOutcome {
        if raw_notes.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.is_loading() {
            return SubmitOutcome::Busy;
        }
        // Prior assets are hidden from the moment loading starts.
        self.state = FormState::Loading;
        SubmitOutcome::Started(raw_notes.to_string())
    }

    /// Applies a generation result. Only meaningful while `Loading`.
    pub fn finish(&mut self, result: Result<GeneratedAssets, GenerationError>) {
        if !self.is_loading() {
            return;
        }
        match result {
            Ok(assets) => {
                info!("Generation succeeded");
                self.state = FormState::Ready(assets);
            }
            Err(e) => {
                error!("Generation failed: {e}");
                self.state = FormState::Idle;
                self.alerts.push(GENERATION_FAILED_ALERT.to_string());
            }
        }
    }

    pub fn select_tab(&mut self, tab: ActiveTab) -> Result<(), FormError> {
        if self.assets().is_none() {
            return Err(FormError::NotReady);
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Copies the active tab's text. Clipboard errors are not handled here.
    pub fn copy_active<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
    ) -> Result<(), CopyError<C::Error>> {
        let text = self.active_text().ok_or(CopyError::NotReady)?;
        clipboard.write_text(text).map_err(CopyError::Clipboard)?;
        self.alerts.push(COPIED_ALERT.to_string());
        Ok(())
    }

    /// Drains user-facing alerts in the order they were raised.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::generation::generator::AssetGenerator;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use thiserror::Error;

    /// Fake generator: returns a fixed result, optionally after a delay, and counts calls.
    pub(crate) struct FakeGenerator {
        pub calls: AtomicUsize,
        pub fail: bool,
        pub delay: Option<Duration>,
    }

    impl FakeGenerator {
        pub(crate) fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                delay: None,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }

        pub(crate) fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::ok()
            }
        }
    }

    pub(crate) fn sample_assets() -> GeneratedAssets {
        GeneratedAssets {
            job_description: "# Senior Rust Engineer\n- Remote".to_string(),
            interview_guide: "## Questions\n1. Tell me about a hard bug.".to_string(),
        }
    }

    #[async_trait]
    impl AssetGenerator for FakeGenerator {
        async fn generate(&self, _raw_notes: &str) -> Result<GeneratedAssets, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                Err(GenerationError::Llm(LlmError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }))
            } else {
                Ok(sample_assets())
            }
        }
    }

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("denied")]
    struct Denied;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Vec<String>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        type Error = Denied;

        fn write_text(&mut self, text: &str) -> Result<(), Denied> {
            if self.fail {
                return Err(Denied);
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    /// Runs both halves of a submit against `generator`.
    async fn submit(
        form: &mut FormOrchestrator,
        notes: &str,
        generator: &dyn AssetGenerator,
    ) -> SubmitOutcome {
        let outcome = form.begin_submit(notes);
        if let SubmitOutcome::Started(notes) = &outcome {
            let result = generator.generate(notes).await;
            form.finish(result);
        }
        outcome
    }

    fn ready() -> FormOrchestrator {
        let mut form = FormOrchestrator::new();
        assert!(matches!(form.begin_submit("notes"), SubmitOutcome::Started(_)));
        form.finish(Ok(sample_assets()));
        form
    }

    #[tokio::test]
    async fn test_blank_notes_never_call_generator() {
        let generator = FakeGenerator::ok();
        let mut form = FormOrchestrator::new();
        for notes in ["", "   ", "\n\t "] {
            assert_eq!(submit(&mut form, notes, &generator).await, SubmitOutcome::Ignored);
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[tokio::test]
    async fn test_success_reaches_ready_with_job_description_tab() {
        let generator = FakeGenerator::ok();
        let mut form = FormOrchestrator::new();
        submit(&mut form, "Senior Rust dev", &generator).await;
        assert_eq!(form.state(), &FormState::Ready(sample_assets()));
        assert_eq!(form.active_tab(), ActiveTab::JobDescription);
        assert_eq!(form.active_text(), Some(sample_assets().job_description.as_str()));
        assert!(form.take_alerts().is_empty());
    }

    #[test]
    fn test_begin_submit_enters_loading() {
        let mut form = FormOrchestrator::new();
        assert_eq!(
            form.begin_submit("  notes  "),
            SubmitOutcome::Started("  notes  ".to_string())
        );
        assert!(form.is_loading());
    }

    #[tokio::test]
    async fn test_failure_returns_to_idle_with_one_alert() {
        let generator = FakeGenerator::failing();
        let mut form = FormOrchestrator::new();
        submit(&mut form, "notes", &generator).await;
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(form.take_alerts(), vec![GENERATION_FAILED_ALERT.to_string()]);
        assert!(form.take_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_ready_does_not_resurrect_assets() {
        let mut form = ready();
        submit(&mut form, "new notes", &FakeGenerator::failing()).await;
        assert!(form.assets().is_none());
        assert_eq!(form.take_alerts().len(), 1);
    }

    #[test]
    fn test_loading_hides_previous_assets() {
        let mut form = ready();
        form.begin_submit("again");
        assert!(form.assets().is_none());
        assert!(form.active_text().is_none());
    }

    #[test]
    fn test_resubmit_while_loading_is_rejected() {
        let mut form = FormOrchestrator::new();
        form.begin_submit("first");
        assert_eq!(form.begin_submit("second"), SubmitOutcome::Busy);
        assert!(form.is_loading());
    }

    #[test]
    fn test_finish_outside_loading_is_ignored() {
        let mut form = FormOrchestrator::new();
        form.finish(Ok(sample_assets()));
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn test_success_replaces_assets_wholesale() {
        let mut form = ready();
        form.begin_submit("again");
        let replacement = GeneratedAssets {
            job_description: "new jd".to_string(),
            interview_guide: String::new(),
        };
        form.finish(Ok(replacement.clone()));
        assert_eq!(form.assets(), Some(&replacement));
    }

    #[test]
    fn test_tab_switch_requires_ready() {
        let mut form = FormOrchestrator::new();
        assert_eq!(form.select_tab(ActiveTab::InterviewGuide), Err(FormError::NotReady));
        assert_eq!(form.active_tab(), ActiveTab::JobDescription);

        let mut form = ready();
        form.select_tab(ActiveTab::InterviewGuide).unwrap();
        assert_eq!(form.active_text(), Some(sample_assets().interview_guide.as_str()));
    }

    #[test]
    fn test_copy_writes_active_text_and_confirms() {
        let mut form = ready();
        form.select_tab(ActiveTab::InterviewGuide).unwrap();
        let mut clipboard = RecordingClipboard::default();
        form.copy_active(&mut clipboard).unwrap();
        assert_eq!(clipboard.written, vec![sample_assets().interview_guide]);
        assert_eq!(form.take_alerts(), vec![COPIED_ALERT.to_string()]);
    }

    #[test]
    fn test_copy_failure_propagates_without_confirmation() {
        let mut form = ready();
        let mut clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let err = form.copy_active(&mut clipboard).unwrap_err();
        assert_eq!(err, CopyError::Clipboard(Denied));
        assert!(form.take_alerts().is_empty());
    }

    #[test]
    fn test_copy_without_assets_is_not_ready() {
        let mut form = FormOrchestrator::new();
        let mut clipboard = RecordingClipboard::default();
        assert_eq!(form.copy_active(&mut clipboard), Err(CopyError::NotReady));
    }
}
