use statig::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Accepted,
    Rejected,
    Cancel,
}

/// Where a submission currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct SubmissionLifecycle;

impl SubmissionLifecycle {
    pub fn new() -> Self {
        Self
    }
}

/// An acceptance always wins: the server holds the orphanage even when the
/// attempt that carried it was abandoned. Rejections only count while submitting.
#[state_machine(initial = "State::idle()")]
impl SubmissionLifecycle {
    #[state]
    fn idle(event: &SubmissionEvent) -> Outcome<State> {
        match event {
            SubmissionEvent::Submit => Transition(State::submitting()),
            SubmissionEvent::Accepted => {
                tracing::info!("Abandoned submission accepted");
                Transition(State::succeeded())
            }
            _ => Handled,
        }
    }

    #[state]
    fn submitting(event: &SubmissionEvent) -> Outcome<State> {
        match event {
            SubmissionEvent::Accepted => {
                tracing::info!("Submission accepted");
                Transition(State::succeeded())
            }
            SubmissionEvent::Rejected => {
                tracing::warn!("Submission failed");
                Transition(State::failed())
            }
            SubmissionEvent::Cancel => Transition(State::idle()),
            SubmissionEvent::Submit => {
                tracing::debug!("Submit ignored while a request is in flight");
                Handled
            }
        }
    }

    #[state]
    fn succeeded(event: &SubmissionEvent) -> Outcome<State> {
        tracing::debug!(?event, "Submission already completed");
        Handled
    }

    #[state]
    fn failed(event: &SubmissionEvent) -> Outcome<State> {
        match event {
            SubmissionEvent::Submit => {
                tracing::info!("Resubmitting orphanage");
                Transition(State::submitting())
            }
            SubmissionEvent::Accepted => Transition(State::succeeded()),
            _ => Handled,
        }
    }
}

/// Current phase of a running lifecycle machine
pub fn current_state(machine: &StateMachine<SubmissionLifecycle>) -> SubmissionState {
    match machine.state() {
        State::Idle { .. } => SubmissionState::Idle,
        State::Submitting { .. } => SubmissionState::Submitting,
        State::Succeeded { .. } => SubmissionState::Succeeded,
        State::Failed { .. } => SubmissionState::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(events: &[SubmissionEvent]) -> SubmissionState {
        let mut sm = SubmissionLifecycle::new().state_machine();
        for event in events {
            sm.handle(event);
        }
        current_state(&sm)
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(drive(&[]), SubmissionState::Idle);
    }

    #[test]
    fn test_accepted_submission_succeeds() {
        use SubmissionEvent::*;
        assert_eq!(drive(&[Submit]), SubmissionState::Submitting);
        assert_eq!(drive(&[Submit, Accepted]), SubmissionState::Succeeded);
    }

    #[test]
    fn test_failed_submission_can_be_retried() {
        use SubmissionEvent::*;
        assert_eq!(drive(&[Submit, Rejected]), SubmissionState::Failed);
        assert_eq!(
            drive(&[Submit, Rejected, Submit, Accepted]),
            SubmissionState::Succeeded
        );
    }

    #[test]
    fn test_rejections_ignored_outside_submitting() {
        use SubmissionEvent::*;
        assert_eq!(drive(&[Rejected, Cancel]), SubmissionState::Idle);
        assert_eq!(drive(&[Submit, Cancel, Rejected]), SubmissionState::Idle);
        assert_eq!(drive(&[Submit, Accepted, Submit]), SubmissionState::Succeeded);
        assert_eq!(drive(&[Submit, Accepted, Rejected]), SubmissionState::Succeeded);
    }

    #[test]
    fn test_late_acceptance_wins() {
        use SubmissionEvent::*;
        assert_eq!(drive(&[Submit, Cancel, Accepted]), SubmissionState::Succeeded);
        assert_eq!(
            drive(&[Submit, Rejected, Accepted]),
            SubmissionState::Succeeded
        );
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        use SubmissionEvent::*;
        assert_eq!(drive(&[Submit, Cancel]), SubmissionState::Idle);
        assert_eq!(drive(&[Submit, Submit, Cancel]), SubmissionState::Idle);
    }
}
