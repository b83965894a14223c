//! Multi-model reviewer capability.
//!
//! Each reviewer model checks the draft independently and concurrently.
//! A collator model then merges the lists into one de-duplicated set of
//! issues, which becomes the [`ViolationReport`].
//!
//! A failure of any single model fails the whole review.

use crate::ports::draft_reviewer::{DraftReviewer, ReviewError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use async_trait::async_trait;
use futures::future::try_join_all;
use reviewer_domain::{
    Draft, Model, ModelReviewResult, OutputSchema, ReviewIssue, ReviewerPromptTemplate,
    ViolationReport, build_consolidated_report, parse_review_issues,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Reviewer backed by several models and an optional collator.
pub struct MultiModelReviewer {
    gateway: Arc<dyn LlmGateway>,
    reviewers: Vec<Model>,
    collator: Option<Model>,
    rules_text: String,
}

impl MultiModelReviewer {
    /// Create with the default reviewer routes and collator.
    pub fn new(gateway: Arc<dyn LlmGateway>, rules_text: impl Into<String>) -> Self {
        Self {
            gateway,
            reviewers: Model::default_reviewers(),
            collator: Some(Model::default_collator()),
            rules_text: rules_text.into(),
        }
    }

    pub fn with_reviewers(mut self, reviewers: Vec<Model>) -> Self {
        self.reviewers = reviewers;
        self
    }

    pub fn with_collator(mut self, collator: Model) -> Self {
        self.collator = Some(collator);
        self
    }

    /// Skip collation; issue lists are concatenated instead.
    pub fn without_collator(mut self) -> Self {
        self.collator = None;
        self
    }

    pub fn reviewers(&self) -> &[Model] {
        &self.reviewers
    }

    pub fn collator(&self) -> Option<&Model> {
        self.collator.as_ref()
    }

    /// Ask one model for its issues on `prompt`.
    async fn query_model(&self, model: &Model, prompt: &str) -> Result<Vec<ReviewIssue>, ReviewError> {
        let request = StructuredRequest::new(model.clone(), prompt, OutputSchema::issues());
        let raw = self
            .gateway
            .respond(&request)
            .await
            .map_err(|source| Self::model_failed(model, source))?;

        let issues = parse_review_issues(&raw)
            .map_err(|e| ReviewError::MalformedOutput(format!("{}: {}", model, e)))?;
        debug!("{} reported {} issue(s)", model, issues.len());
        Ok(issues)
    }

    async fn review_with(&self, model: &Model, draft: &Draft) -> Result<ModelReviewResult, ReviewError> {
        let prompt = ReviewerPromptTemplate::review_file(draft, &self.rules_text);
        let issues = self.query_model(model, &prompt).await?;
        Ok(ModelReviewResult {
            model: model.to_string(),
            issues,
        })
    }

    fn model_failed(model: &Model, source: GatewayError) -> ReviewError {
        ReviewError::ModelFailed {
            model: model.to_string(),
            source,
        }
    }
}

/// Concatenate issue lists, dropping exact repeats.
fn merge_issues(results: Vec<ModelReviewResult>) -> Vec<ReviewIssue> {
    let mut merged: Vec<ReviewIssue> = Vec::new();
    for issue in results.into_iter().flat_map(|r| r.issues) {
        if !merged.contains(&issue) {
            merged.push(issue);
        }
    }
    merged
}

#[async_trait]
impl DraftReviewer for MultiModelReviewer {
    async fn review(&self, draft: &Draft) -> Result<ViolationReport, ReviewError> {
        if self.reviewers.is_empty() {
            return Err(ReviewError::NoReviewers);
        }

        info!(
            "Reviewing {} (iteration {}) with {} model(s)",
            draft.path,
            draft.iteration,
            self.reviewers.len()
        );

        let results = try_join_all(
            self.reviewers
                .iter()
                .map(|model| self.review_with(model, draft)),
        )
        .await?;

        let issues = match &self.collator {
            Some(collator) => {
                let prompt = ReviewerPromptTemplate::collate(&results, &self.rules_text);
                info!("Collating {} reviewer result(s) with {}", results.len(), collator);
                self.query_model(collator, &prompt).await?
            }
            None => merge_issues(results),
        };

        Ok(build_consolidated_report(&issues))
    }
}
