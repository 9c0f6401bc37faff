//! Monitoring dashboard state: the parameter form and the latest result.

use tracing::{info, warn};

use crate::client::{FailureKind, ScoringApi};
use crate::models::{OrsResult, PatientParameters, Reading};
use crate::ui::components::{score_color_bucket, ScoreBucket};

pub const CALCULATION_FAILED: &str = "Failed to calculate ORS. Please check your inputs.";

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    form: PatientParameters,
    result: Option<OrsResult>,
    error: Option<String>,
    failure: Option<FailureKind>,
    loading: bool,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: PatientParameters) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &PatientParameters {
        &self.form
    }

    /// Edit one form field by wire name.
    pub fn edit(&mut self, field: &str, value: impl Into<Reading>) -> bool {
        self.form.set(field, value)
    }

    /// Submit the form. On failure the form and any earlier result stay
    /// as they were and the generic error banner is set.
    pub async fn submit<A>(&mut self, api: &A) -> Option<&OrsResult>
    where
        A: ScoringApi + ?Sized,
    {
        self.error = None;
        self.failure = None;
        self.loading = true;

        let outcome = api.calculate_ors(&self.form).await;
        self.loading = false;

        match outcome {
            Ok(result) => {
                info!(ors_score = result.ors_score, risk_level = %result.risk_level, "Result received");
                self.result = Some(result);
                self.result.as_ref()
            }
            Err(e) => {
                warn!(error = %e, "ORS calculation failed");
                self.failure = Some(e.kind());
                self.error = Some(CALCULATION_FAILED.to_string());
                None
            }
        }
    }

    /// True while a submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&OrsResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Category of the last failure, when the banner is showing.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn score_bucket(&self) -> Option<ScoreBucket> {
        self.result.as_ref().map(|r| score_color_bucket(r.ors_score))
    }

    /// The conflict panel is only drawn for a non-empty list.
    pub fn shows_conflict_panel(&self) -> bool {
        self.result.as_ref().map_or(false, OrsResult::has_conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, MockScoringApi};
    use crate::models::{ComponentScores, RiskLevel};
    use chrono::{TimeZone, Utc};
    use reqwest::StatusCode;

    fn result(score: f64) -> OrsResult {
        OrsResult {
            ors_score: score,
            risk_level: RiskLevel::Moderate,
            alert: false,
            cmro2_do2_ratio: 1.8,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            component_scores: ComponentScores::default(),
            conflicts: vec![],
        }
    }

    #[tokio::test]
    async fn success_replaces_result() {
        let mut api = MockScoringApi::new();
        api.expect_calculate_ors()
            .times(1)
            .returning(|_| Ok(result(42.0)));

        let mut view = DashboardView::new();
        view.submit(&api).await;

        assert_eq!(view.result(), Some(&result(42.0)));
        assert_eq!(view.score_bucket(), Some(ScoreBucket::Amber));
        assert!(!view.shows_conflict_panel());
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_form_and_previous_result() {
        let mut api = MockScoringApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(result(70.0)));
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR)));

        let mut view = DashboardView::new();
        view.submit(&api).await;
        view.edit("spo2", "88");
        assert!(view.submit(&api).await.is_none());

        assert_eq!(view.error(), Some(CALCULATION_FAILED));
        assert_eq!(view.failure_kind(), Some(FailureKind::Server));
        assert_eq!(view.form().spo2, Reading::Text("88".into()));
        assert_eq!(view.result().map(|r| r.ors_score), Some(70.0));
    }

    #[tokio::test]
    async fn resubmitting_clears_the_banner() {
        let mut api = MockScoringApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Status(StatusCode::BAD_REQUEST)));
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(result(12.0)));

        let mut view = DashboardView::new();
        view.submit(&api).await;
        assert!(view.error().is_some());
        view.submit(&api).await;
        assert!(view.error().is_none());
        assert_eq!(view.score_bucket(), Some(ScoreBucket::Green));
    }

    #[tokio::test]
    async fn form_is_sent_as_entered() {
        let mut api = MockScoringApi::new();
        api.expect_calculate_ors()
            .withf(|params| params.hb == Reading::Text("7.2".into()))
            .times(1)
            .returning(|_| Ok(result(50.0)));

        let mut view = DashboardView::new();
        assert!(view.edit("hb", "7.2"));
        assert!(view.submit(&api).await.is_some());
    }

    #[tokio::test]
    async fn submit_clears_loading_on_both_outcomes() {
        let mut api = MockScoringApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(result(20.0)));
        api.expect_calculate_ors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Status(StatusCode::BAD_GATEWAY)));

        let mut view = DashboardView {
            loading: true,
            ..DashboardView::new()
        };
        view.submit(&api).await;
        assert!(!view.is_loading());
        assert!(view.result().is_some());

        view.loading = true;
        view.submit(&api).await;
        assert!(!view.is_loading());
        assert!(view.error().is_some());
        assert!(!DashboardView::new().is_loading());
    }
}
