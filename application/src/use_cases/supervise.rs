//! Supervise Task use case
//!
//! Drives one [`TaskRequest`] through the write → review loop until the
//! reviewer reports compliance or the iteration budget runs out.
//!
//! The loop itself is the [`SupervisorState`] machine from the domain; this
//! use case only performs the capability calls the state asks for, wraps
//! each in the per-call timeout, and checks cancellation between
//! transitions.

use crate::config::SupervisorParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::draft_reviewer::{DraftReviewer, ReviewError};
use crate::ports::draft_writer::{DraftWriter, GenerationError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use reviewer_domain::{
    DomainError, Route, SupervisorOutcome, SupervisorState, SupervisorStatus, TaskRequest,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fatal end of a supervisor run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupervisorError {
    #[error("Writer failed on iteration {iteration}: {source}")]
    Generation {
        iteration: u32,
        #[source]
        source: GenerationError,
    },

    #[error("Reviewer failed on iteration {iteration}: {source}")]
    Review {
        iteration: u32,
        #[source]
        source: ReviewError,
    },

    #[error("Task cancelled")]
    Cancelled,

    #[error("Task aborted: {0}")]
    Aborted(String),

    #[error(transparent)]
    State(#[from] DomainError),
}

impl SupervisorError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SupervisorError::Cancelled)
    }

    /// Writer call that failed, if any
    pub fn iteration(&self) -> Option<u32> {
        match self {
            SupervisorError::Generation { iteration, .. }
            | SupervisorError::Review { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }
}

/// Input for the [`SuperviseTaskUseCase`]
#[derive(Debug, Clone)]
pub struct SuperviseInput {
    pub request: TaskRequest,
    pub params: SupervisorParams,
}

impl SuperviseInput {
    pub fn new(request: TaskRequest) -> Self {
        Self {
            request,
            params: SupervisorParams::default(),
        }
    }

    pub fn with_params(mut self, params: SupervisorParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for supervising a single write/review task.
///
/// Every call to [`execute`](Self::execute) owns a fresh
/// [`SupervisorState`], so one use case can serve many tasks at once.
#[derive(Clone)]
pub struct SuperviseTaskUseCase {
    writer: Arc<dyn DraftWriter>,
    reviewer: Arc<dyn DraftReviewer>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl SuperviseTaskUseCase {
    pub fn new(writer: Arc<dyn DraftWriter>, reviewer: Arc<dyn DraftReviewer>) -> Self {
        Self {
            writer,
            reviewer,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: SuperviseInput,
    ) -> Result<SupervisorOutcome, SupervisorError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: SuperviseInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SupervisorOutcome, SupervisorError> {
        let mut state = SupervisorState::new(input.request, input.params.max_iterations);
        let result = self.drive(&mut state, &input.params, progress).await;

        if let Err(e) = &result {
            warn!("Task for {} ended with error: {}", state.request().path(), e);
            self.conversation_logger.log(ConversationEvent::new(
                "task_failed",
                serde_json::json!({
                    "path": state.request().path(),
                    "status": state.status().as_str(),
                    "iterations": state.iteration_count(),
                    "error": e.to_string(),
                }),
            ));
        }

        progress.on_finish(state.status(), state.iteration_count());
        result
    }

    /// Run several tasks concurrently, each with its own state.
    ///
    /// Results come back in submission order regardless of completion
    /// order. One task failing does not affect the others.
    pub async fn execute_batch(
        &self,
        inputs: Vec<SuperviseInput>,
    ) -> Vec<Result<SupervisorOutcome, SupervisorError>> {
        info!("Starting batch of {} tasks", inputs.len());

        let mut results: Vec<Option<Result<SupervisorOutcome, SupervisorError>>> =
            (0..inputs.len()).map(|_| None).collect();
        let mut join_set = JoinSet::new();

        for (index, input) in inputs.into_iter().enumerate() {
            let use_case = self.clone();
            join_set.spawn(async move { (index, use_case.execute(input).await) });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Some(slot) = results.get_mut(index) {
                        *slot = Some(result);
                    }
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        results
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(SupervisorError::Aborted(
                        "task did not run to completion".to_string(),
                    ))
                })
            })
            .collect()
    }

    /// Step `state` until it reaches a terminal status.
    async fn drive(
        &self,
        state: &mut SupervisorState,
        params: &SupervisorParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<SupervisorOutcome, SupervisorError> {
        info!(
            "Supervising {} (budget {}, timeout {}s)",
            state.request().path(),
            state.budget(),
            params.call_timeout.as_secs()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "task_started",
            serde_json::json!({
                "path": state.request().path(),
                "instructions": state.request().instructions(),
                "new_file": state.request().is_new_file(),
                "context_files": state.request().context_files().len(),
                "max_iterations": state.max_iterations(),
                "budget": state.budget(),
            }),
        ));

        state.begin()?;
        progress.on_task_start(state.request(), state.budget());

        loop {
            let route = state.next_route();
            // A terminal state keeps its result even if cancel arrived during the last call
            if route != Route::End && self.is_cancelled() {
                state.cancel()?;
                warn!(
                    "Task for {} cancelled after {} writer call(s)",
                    state.request().path(),
                    state.iteration_count()
                );
                return Err(SupervisorError::Cancelled);
            }

            match route {
                Route::Writer => self.write_step(state, params, progress).await?,
                Route::Reviewer => self.review_step(state, params, progress).await?,
                Route::End => break,
            }
        }

        let outcome = SupervisorOutcome::from_state(state)?;
        info!(
            "Task for {} finished: {} after {} iteration(s)",
            state.request().path(),
            outcome.status(),
            outcome.iterations()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "task_finished",
            serde_json::json!({
                "path": state.request().path(),
                "status": outcome.status().as_str(),
                "iterations": outcome.iterations(),
                "error_count": outcome.report().error_count(),
                "warning_count": outcome.report().warning_count(),
            }),
        ));
        Ok(outcome)
    }

    async fn write_step(
        &self,
        state: &mut SupervisorState,
        params: &SupervisorParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), SupervisorError> {
        let iteration = state.iteration_count() + 1;
        debug!(
            "Writer call {}/{} (feedback: {})",
            iteration,
            state.budget(),
            state.feedback().is_some()
        );
        progress.on_writer_start(iteration);

        let call = self.writer.generate(state.request(), state.feedback());
        let draft = match tokio::time::timeout(params.call_timeout, call).await {
            Ok(Ok(draft)) => draft,
            Ok(Err(source)) => {
                return Err(Self::abort(
                    state,
                    SupervisorError::Generation { iteration, source },
                ));
            }
            Err(_) => {
                return Err(Self::abort(
                    state,
                    SupervisorError::Generation {
                        iteration,
                        source: GenerationError::Timeout(params.call_timeout),
                    },
                ));
            }
        };

        let draft = state.record_draft(draft)?;
        debug!("Draft {} ready: {} bytes", iteration, draft.content.len());
        progress.on_draft(draft);
        self.conversation_logger.log(ConversationEvent::new(
            "draft_generated",
            serde_json::json!({
                "iteration": iteration,
                "path": draft.path,
                "action": draft.action.as_str(),
                "bytes": draft.content.len(),
                "explanation": draft.explanation,
            }),
        ));
        Ok(())
    }

    async fn review_step(
        &self,
        state: &mut SupervisorState,
        params: &SupervisorParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), SupervisorError> {
        let iteration = state.iteration_count();
        let Some(draft) = state.current_draft() else {
            return Err(DomainError::InvalidTransition {
                from: state.status(),
                event: "review",
            }
            .into());
        };

        debug!("Reviewer call for draft {}", iteration);
        progress.on_reviewer_start(iteration);

        let call = self.reviewer.review(draft);
        let report = match tokio::time::timeout(params.call_timeout, call).await {
            Ok(Ok(report)) => report,
            Ok(Err(source)) => {
                return Err(Self::abort(
                    state,
                    SupervisorError::Review { iteration, source },
                ));
            }
            Err(_) => {
                return Err(Self::abort(
                    state,
                    SupervisorError::Review {
                        iteration,
                        source: ReviewError::Timeout(params.call_timeout),
                    },
                ));
            }
        };

        let error_count = report.error_count();
        let warning_count = report.warning_count();
        let verdict = state.record_report(report)?;
        info!(
            "Review {}: {} error(s), {} warning(s) -> {}",
            iteration,
            error_count,
            warning_count,
            state.status()
        );

        if let Some(report) = state.last_report() {
            progress.on_review(report, verdict);
            self.conversation_logger.log(ConversationEvent::new(
                "review_completed",
                serde_json::json!({
                    "iteration": iteration,
                    "next": state.status().as_str(),
                    "report": report,
                }),
            ));
        }
        Ok(())
    }

    /// Move `state` to `failed` and hand the error back for propagation.
    fn abort(state: &mut SupervisorState, error: SupervisorError) -> SupervisorError {
        if let Err(e) = state.fail(error.to_string()) {
            warn!("Could not mark task as failed: {}", e);
        }
        error
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Final status for a finished run, error or not
pub fn final_status(result: &Result<SupervisorOutcome, SupervisorError>) -> SupervisorStatus {
    match result {
        Ok(outcome) => outcome.status(),
        Err(SupervisorError::Cancelled) => SupervisorStatus::Cancelled,
        Err(_) => SupervisorStatus::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use reviewer_domain::{Draft, ReviewVerdict, Violation, ViolationReport};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct ScriptedWriter {
        drafts: Mutex<VecDeque<Result<Draft, GenerationError>>>,
        feedback_seen: Mutex<Vec<Option<ViolationReport>>>,
        delay: Option<Duration>,
        cancel_on_generate: Option<CancellationToken>,
    }

    impl ScriptedWriter {
        fn new(drafts: Vec<Result<Draft, GenerationError>>) -> Self {
            Self {
                drafts: Mutex::new(VecDeque::from(drafts)),
                feedback_seen: Mutex::new(Vec::new()),
                delay: None,
                cancel_on_generate: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn cancelling(mut self, token: CancellationToken) -> Self {
            self.cancel_on_generate = Some(token);
            self
        }

        fn calls(&self) -> usize {
            self.feedback_seen.lock().unwrap().len()
        }

        fn feedback(&self) -> Vec<Option<ViolationReport>> {
            self.feedback_seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DraftWriter for ScriptedWriter {
        async fn generate(
            &self,
            _request: &TaskRequest,
            feedback: Option<&ViolationReport>,
        ) -> Result<Draft, GenerationError> {
            self.feedback_seen.lock().unwrap().push(feedback.cloned());
            if let Some(token) = &self.cancel_on_generate {
                token.cancel();
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.drafts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Other("No more drafts".to_string())))
        }
    }

    struct ScriptedReviewer {
        reports: Mutex<VecDeque<Result<ViolationReport, ReviewError>>>,
        reviewed: Mutex<Vec<Draft>>,
        cancel_on_review: Option<CancellationToken>,
        delay: Option<Duration>,
    }

    impl ScriptedReviewer {
        fn new(reports: Vec<Result<ViolationReport, ReviewError>>) -> Self {
            Self {
                reports: Mutex::new(VecDeque::from(reports)),
                reviewed: Mutex::new(Vec::new()),
                cancel_on_review: None,
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn cancelling(mut self, token: CancellationToken) -> Self {
            self.cancel_on_review = Some(token);
            self
        }

        fn calls(&self) -> usize {
            self.reviewed.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DraftReviewer for ScriptedReviewer {
        async fn review(&self, draft: &Draft) -> Result<ViolationReport, ReviewError> {
            self.reviewed.lock().unwrap().push(draft.clone());
            if let Some(token) = &self.cancel_on_review {
                token.cancel();
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reports
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ReviewError::Other("No more reports".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        verdicts: Mutex<Vec<ReviewVerdict>>,
        finished: Mutex<Option<(SupervisorStatus, u32)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_task_start(&self, _request: &TaskRequest, _budget: u32) {}
        fn on_writer_start(&self, _iteration: u32) {}
        fn on_draft(&self, _draft: &Draft) {}
        fn on_review(&self, _report: &ViolationReport, verdict: ReviewVerdict) {
            self.verdicts.lock().unwrap().push(verdict);
        }
        fn on_finish(&self, status: SupervisorStatus, iterations: u32) {
            *self.finished.lock().unwrap() = Some((status, iterations));
        }
    }

    // ==================== Helpers ====================

    fn request() -> TaskRequest {
        TaskRequest::new("src/app.py", "Add type hints").unwrap()
    }

    fn input(max_iterations: u32) -> SuperviseInput {
        SuperviseInput::new(request())
            .with_params(SupervisorParams::default().with_max_iterations(max_iterations))
    }

    fn draft(content: &str) -> Result<Draft, GenerationError> {
        Ok(Draft::new("src/app.py", content))
    }

    fn failing(rule: &str) -> Result<ViolationReport, ReviewError> {
        Ok(ViolationReport::new(vec![Violation::error(
            rule,
            "Missing type hints",
        )]))
    }

    fn clean() -> Result<ViolationReport, ReviewError> {
        Ok(ViolationReport::clean())
    }

    fn use_case(
        writer: &Arc<ScriptedWriter>,
        reviewer: &Arc<ScriptedReviewer>,
    ) -> SuperviseTaskUseCase {
        SuperviseTaskUseCase::new(writer.clone(), reviewer.clone())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_compliant_on_first_pass() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("def f() -> int: ...")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));

        let outcome = use_case(&writer, &reviewer)
            .execute(input(3))
            .await
            .unwrap();

        assert!(outcome.is_compliant());
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(outcome.draft().content, "def f() -> int: ...");
        assert_eq!(outcome.draft().iteration, 1);
        assert_eq!(writer.calls(), 1);
        assert_eq!(reviewer.calls(), 1);
    }

    #[tokio::test]
    async fn test_revises_until_compliant() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![failing("R1"), clean()]));

        let outcome = use_case(&writer, &reviewer)
            .execute(input(3))
            .await
            .unwrap();

        assert!(outcome.is_compliant());
        assert_eq!(outcome.iterations(), 2);
        assert_eq!(outcome.draft().content, "v2");
        assert_eq!(writer.calls(), 2);
    }

    #[tokio::test]
    async fn test_feedback_is_previous_report() {
        let writer = Arc::new(ScriptedWriter::new(vec![
            draft("v1"),
            draft("v2"),
            draft("v3"),
        ]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![
            failing("R1"),
            failing("R2"),
            clean(),
        ]));

        use_case(&writer, &reviewer)
            .execute(input(3))
            .await
            .unwrap();

        let feedback = writer.feedback();
        assert_eq!(feedback.len(), 3);
        assert!(feedback[0].is_none());
        assert_eq!(feedback[1].as_ref(), failing("R1").ok().as_ref());
        assert_eq!(feedback[2].as_ref(), failing("R2").ok().as_ref());
    }

    #[tokio::test]
    async fn test_exhausted_returns_last_report() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![failing("R1"), failing("R2")]));

        let outcome = use_case(&writer, &reviewer)
            .execute(input(2))
            .await
            .unwrap();

        assert!(!outcome.is_compliant());
        assert_eq!(outcome.status(), SupervisorStatus::Exhausted);
        assert_eq!(outcome.iterations(), 2);
        assert_eq!(outcome.draft().content, "v2");
        assert_eq!(outcome.report().violations()[0].rule_id, "R2");
        // No third writer call
        assert_eq!(writer.calls(), 2);
        assert_eq!(reviewer.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_max_iterations_runs_single_pass() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![failing("R1"), clean()]));

        let outcome = use_case(&writer, &reviewer)
            .execute(input(0))
            .await
            .unwrap();

        assert_eq!(outcome.status(), SupervisorStatus::Exhausted);
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(writer.calls(), 1);
        assert_eq!(reviewer.calls(), 1);
    }

    #[tokio::test]
    async fn test_warnings_only_is_compliant() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![Ok(ViolationReport::new(
            vec![Violation::warning("W1", "Line is long")],
        ))]));

        let outcome = use_case(&writer, &reviewer)
            .execute(input(2))
            .await
            .unwrap();

        assert!(outcome.is_compliant());
        assert_eq!(outcome.report().warning_count(), 1);
    }

    #[tokio::test]
    async fn test_writer_failure_is_fatal() {
        let writer = Arc::new(ScriptedWriter::new(vec![Err(GenerationError::Gateway(
            GatewayError::ConnectionError("refused".to_string()),
        ))]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));
        let progress = RecordingProgress::default();

        let err = use_case(&writer, &reviewer)
            .execute_with_progress(input(2), &progress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SupervisorError::Generation { iteration: 1, .. }
        ));
        assert_eq!(err.iteration(), Some(1));
        assert_eq!(reviewer.calls(), 0);
        assert_eq!(
            *progress.finished.lock().unwrap(),
            Some((SupervisorStatus::Failed, 0))
        );
    }

    #[tokio::test]
    async fn test_reviewer_failure_is_fatal() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![
            failing("R1"),
            Err(ReviewError::NoReviewers),
        ]));

        let err = use_case(&writer, &reviewer)
            .execute(input(3))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SupervisorError::Review {
                iteration: 2,
                source: ReviewError::NoReviewers,
            }
        );
        assert_eq!(writer.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_writer_timeout_is_fatal() {
        let writer = Arc::new(
            ScriptedWriter::new(vec![draft("v1")]).with_delay(Duration::from_secs(10)),
        );
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));
        let params = SupervisorParams::default().with_call_timeout(Duration::from_secs(1));

        let err = use_case(&writer, &reviewer)
            .execute(SuperviseInput::new(request()).with_params(params))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SupervisorError::Generation {
                iteration: 1,
                source: GenerationError::Timeout(Duration::from_secs(1)),
            }
        );
        assert_eq!(reviewer.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reviewer_timeout_is_fatal() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1")]));
        let reviewer = Arc::new(
            ScriptedReviewer::new(vec![clean()]).with_delay(Duration::from_secs(10)),
        );
        let params = SupervisorParams::default().with_call_timeout(Duration::from_secs(1));
        let progress = RecordingProgress::default();

        let err = use_case(&writer, &reviewer)
            .execute_with_progress(SuperviseInput::new(request()).with_params(params), &progress)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SupervisorError::Review {
                iteration: 1,
                source: ReviewError::Timeout(Duration::from_secs(1)),
            }
        );
        assert_eq!(writer.calls(), 1);
        assert!(progress.verdicts.lock().unwrap().is_empty());
        assert_eq!(
            *progress.finished.lock().unwrap(),
            Some((SupervisorStatus::Failed, 1))
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));
        let token = CancellationToken::new();
        token.cancel();
        let progress = RecordingProgress::default();

        let err = use_case(&writer, &reviewer)
            .with_cancellation(token)
            .execute_with_progress(input(2), &progress)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(writer.calls(), 0);
        assert_eq!(
            *progress.finished.lock().unwrap(),
            Some((SupervisorStatus::Cancelled, 0))
        );
    }

    #[tokio::test]
    async fn test_cancellation_checked_between_calls() {
        let token = CancellationToken::new();
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(
            ScriptedReviewer::new(vec![failing("R1"), clean()]).cancelling(token.clone()),
        );
        let progress = RecordingProgress::default();

        let err = use_case(&writer, &reviewer)
            .with_cancellation(token)
            .execute_with_progress(input(3), &progress)
            .await
            .unwrap_err();

        // The in-flight review completes; the next writer call never starts.
        assert!(err.is_cancelled());
        assert_eq!(reviewer.calls(), 1);
        assert_eq!(writer.calls(), 1);
        assert_eq!(*progress.verdicts.lock().unwrap(), vec![ReviewVerdict::Revise]);
        assert_eq!(
            *progress.finished.lock().unwrap(),
            Some((SupervisorStatus::Cancelled, 1))
        );
    }

    #[tokio::test]
    async fn test_cancellation_between_write_and_review() {
        let token = CancellationToken::new();
        let writer =
            Arc::new(ScriptedWriter::new(vec![draft("v1")]).cancelling(token.clone()));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));
        let progress = RecordingProgress::default();

        let err = use_case(&writer, &reviewer)
            .with_cancellation(token)
            .execute_with_progress(input(2), &progress)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(writer.calls(), 1);
        assert_eq!(reviewer.calls(), 0);
        assert_eq!(
            *progress.finished.lock().unwrap(),
            Some((SupervisorStatus::Cancelled, 1))
        );
    }

    #[tokio::test]
    async fn test_cancel_during_final_review_keeps_compliant_result() {
        let token = CancellationToken::new();
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1")]));
        let reviewer =
            Arc::new(ScriptedReviewer::new(vec![clean()]).cancelling(token.clone()));
        let logger = Arc::new(RecordingLogger::default());

        let result = use_case(&writer, &reviewer)
            .with_cancellation(token)
            .with_conversation_logger(logger.clone())
            .execute(input(2))
            .await;

        let outcome = result.unwrap();
        assert!(outcome.is_compliant());
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(
            logger.events.lock().unwrap().last().copied(),
            Some("task_finished")
        );
    }

    #[tokio::test]
    async fn test_cancel_during_final_review_keeps_exhausted_result() {
        let token = CancellationToken::new();
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1")]));
        let reviewer =
            Arc::new(ScriptedReviewer::new(vec![failing("R1")]).cancelling(token.clone()));

        let outcome = use_case(&writer, &reviewer)
            .with_cancellation(token)
            .execute(input(1))
            .await
            .unwrap();

        assert_eq!(outcome.status(), SupervisorStatus::Exhausted);
        assert_eq!(outcome.report().violations()[0].rule_id, "R1");
        assert_eq!(writer.calls(), 1);
    }

    #[tokio::test]
    async fn test_conversation_events() {
        let writer = Arc::new(ScriptedWriter::new(vec![draft("v1"), draft("v2")]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![failing("R1"), clean()]));
        let logger = Arc::new(RecordingLogger::default());

        use_case(&writer, &reviewer)
            .with_conversation_logger(logger.clone())
            .execute(input(2))
            .await
            .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "task_started",
                "draft_generated",
                "review_completed",
                "draft_generated",
                "review_completed",
                "task_finished",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_is_logged() {
        let writer = Arc::new(ScriptedWriter::new(vec![Err(GenerationError::Other(
            "boom".to_string(),
        ))]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![]));
        let logger = Arc::new(RecordingLogger::default());

        let result = use_case(&writer, &reviewer)
            .with_conversation_logger(logger.clone())
            .execute(input(2))
            .await;

        assert_eq!(final_status(&result), SupervisorStatus::Failed);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["task_started", "task_failed"]
        );
    }

    /// Writes the instructions verbatim to the requested path
    struct EchoWriter;

    #[async_trait]
    impl DraftWriter for EchoWriter {
        async fn generate(
            &self,
            request: &TaskRequest,
            _feedback: Option<&ViolationReport>,
        ) -> Result<Draft, GenerationError> {
            Ok(Draft::new(request.path(), request.instructions()))
        }
    }

    #[tokio::test]
    async fn test_batch_keeps_submission_order() {
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean(), clean(), clean()]));

        let inputs = vec![
            SuperviseInput::new(TaskRequest::new("a.py", "A").unwrap()),
            SuperviseInput::new(TaskRequest::new("b.py", "B").unwrap()),
            SuperviseInput::new(TaskRequest::new("c.py", "C").unwrap()),
        ];

        let results = SuperviseTaskUseCase::new(Arc::new(EchoWriter), reviewer.clone())
            .execute_batch(inputs)
            .await;

        let paths: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().unwrap().draft().path.clone())
            .collect();
        assert_eq!(paths, vec!["a.py", "b.py", "c.py"]);
        assert!(results.iter().all(|r| r.as_ref().is_ok_and(|o| o.is_compliant())));
        assert_eq!(reviewer.calls(), 3);
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let writer = Arc::new(ScriptedWriter::new(vec![
            draft("a"),
            Err(GenerationError::Other("boom".to_string())),
        ]));
        let reviewer = Arc::new(ScriptedReviewer::new(vec![clean()]));

        let inputs = vec![
            SuperviseInput::new(TaskRequest::new("a.py", "A").unwrap()),
            SuperviseInput::new(TaskRequest::new("b.py", "B").unwrap()),
        ];

        let results = use_case(&writer, &reviewer).execute_batch(inputs).await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }
}
