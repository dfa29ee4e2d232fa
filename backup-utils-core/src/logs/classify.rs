/// Markers are matched case-sensitively against the notification type.
const SUCCESS_MARKERS: &[&str] = &["Successful", "Healthy"];
const FAILURE_MARKERS: &[&str] = &["Failed", "Unhealthy"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Success,
    Failure,
    Neutral,
}

/// Success markers are checked first, so a type carrying both kinds of
/// marker counts as a success.
pub fn classify(notification_type: &str) -> EventOutcome {
    if SUCCESS_MARKERS.iter().any(|m| notification_type.contains(m)) {
        EventOutcome::Success
    } else if FAILURE_MARKERS.iter().any(|m| notification_type.contains(m)) {
        EventOutcome::Failure
    } else {
        EventOutcome::Neutral
    }
}

pub fn is_failure(notification_type: &str) -> bool {
    classify(notification_type) == EventOutcome::Failure
}
