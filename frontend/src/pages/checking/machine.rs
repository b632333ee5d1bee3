//! Submission lifecycle for the analyze workflow.
//!
//! `Idle -> Submitting -> {Success, Failure}`, with both terminal states
//! re-enterable. At most one request is in flight: `begin` refuses while
//! submitting, and responses only apply when one is expected, so a stale
//! reply arriving after a reset is dropped.

use shared::{PredictResponse, PredictionLabel};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Success(PredictResponse),
    Failure(PredictResponse),
}

impl Submission {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Submission::Submitting)
    }

    /// Enters `Submitting`. Refused when no image is selected or while a
    /// request is already in flight.
    pub fn begin(&mut self, image_selected: bool) -> bool {
        if !image_selected || self.is_in_flight() {
            return false;
        }
        *self = Submission::Submitting;
        true
    }

    /// Applies a successful verdict. Only valid while submitting.
    pub fn succeed(&mut self, outcome: PredictResponse) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        *self = Submission::Success(outcome);
        true
    }

    /// Collapses any failure (upload, upstream status, persistence) into the
    /// synthetic error verdict shown to the user. Only valid while submitting.
    pub fn fail(&mut self) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        *self = Submission::Failure(PredictResponse {
            result: PredictionLabel::Other("Error".to_string()),
            confidence: 0.0,
            message: Some("Analysis failed. Please try again.".to_string()),
        });
        true
    }

    /// Back to `Idle`. Ignored while a request is in flight so the
    /// one-submission invariant holds.
    pub fn reset(&mut self) {
        if !self.is_in_flight() {
            *self = Submission::Idle;
        }
    }

    /// The verdict to display, if any.
    pub fn outcome(&self) -> Option<&PredictResponse> {
        match self {
            Submission::Success(resp) | Submission::Failure(resp) => Some(resp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::fmt::format_confidence;

    fn verdict() -> PredictResponse {
        PredictResponse {
            result: PredictionLabel::Infected,
            confidence: 0.87,
            message: None,
        }
    }

    #[test]
    fn begin_requires_an_image() {
        let mut submission = Submission::Idle;
        assert!(!submission.begin(false));
        assert_eq!(submission, Submission::Idle);
    }

    #[test]
    fn begin_refused_while_in_flight() {
        let mut submission = Submission::Idle;
        assert!(submission.begin(true));
        assert!(!submission.begin(true));
        assert!(submission.is_in_flight());
    }

    #[test]
    fn success_stores_the_verdict() {
        let mut submission = Submission::Idle;
        submission.begin(true);
        assert!(submission.succeed(verdict()));
        assert_eq!(submission.outcome(), Some(&verdict()));
        assert!(!submission.is_in_flight());
    }

    #[test]
    fn failure_synthesizes_the_error_verdict() {
        let mut submission = Submission::Idle;
        submission.begin(true);
        assert!(submission.fail());

        let outcome = submission.outcome().unwrap();
        assert_eq!(outcome.result.to_string(), "Error");
        assert_eq!(format_confidence(outcome.confidence), "0.0");
        assert!(outcome.message.is_some());
    }

    #[test]
    fn responses_without_a_pending_request_are_dropped() {
        let mut submission = Submission::Idle;
        assert!(!submission.succeed(verdict()));
        assert!(!submission.fail());
        assert_eq!(submission, Submission::Idle);
    }

    #[test]
    fn terminal_states_are_reenterable() {
        let mut submission = Submission::Idle;
        submission.begin(true);
        submission.fail();
        assert!(submission.begin(true));
        submission.succeed(verdict());
        assert!(submission.begin(true));
    }

    #[test]
    fn reset_clears_terminal_states_but_not_in_flight() {
        let mut submission = Submission::Idle;
        submission.begin(true);
        submission.succeed(verdict());
        submission.reset();
        assert_eq!(submission, Submission::Idle);

        submission.begin(true);
        submission.reset();
        assert!(submission.is_in_flight());
    }
}
