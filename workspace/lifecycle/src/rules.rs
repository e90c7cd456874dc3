//! Status state machines for activities, participations, and complaints.
//!
//! The legacy system only rendered these states; here every transition is
//! validated at the point of mutation and illegal moves fail with
//! `InvalidTransition` before anything is written.

use chrono::NaiveDateTime;
use model::entities::activity::ActivityStatus;
use model::entities::complaint::ComplaintStatus;
use model::entities::participation::ParticipationStatus;

use crate::error::{DomainError, Result};

/// Validates a participation transition.
///
/// Allowed paths: `pending -> approved -> present` and `pending -> rejected`.
pub fn validate_participation_transition(
    from: ParticipationStatus,
    to: ParticipationStatus,
) -> Result<()> {
    use ParticipationStatus::*;

    let allowed = matches!((from, to), (Pending, Approved) | (Approved, Present) | (Pending, Rejected));
    if allowed {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

/// Validates an activity transition.
///
/// Status only moves forward along `upcoming -> ongoing -> completed`.
/// Forward jumps are allowed (an activity whose event window passed without
/// an `ongoing` update completes directly); reverse moves and
/// self-transitions are not.
pub fn validate_activity_transition(from: ActivityStatus, to: ActivityStatus) -> Result<()> {
    fn rank(status: ActivityStatus) -> u8 {
        match status {
            ActivityStatus::Upcoming => 0,
            ActivityStatus::Ongoing => 1,
            ActivityStatus::Completed => 2,
        }
    }

    if rank(to) > rank(from) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

/// Activity status implied by the event window at the given instant.
pub fn activity_status_at(
    now: NaiveDateTime,
    event_start: NaiveDateTime,
    event_end: NaiveDateTime,
) -> ActivityStatus {
    if now < event_start {
        ActivityStatus::Upcoming
    } else if now <= event_end {
        ActivityStatus::Ongoing
    } else {
        ActivityStatus::Completed
    }
}

/// Validates the ordering of an activity's registration and event windows.
pub fn validate_activity_windows(
    registration_start: NaiveDateTime,
    registration_end: NaiveDateTime,
    event_start: NaiveDateTime,
    event_end: NaiveDateTime,
) -> Result<()> {
    if registration_start > registration_end {
        return Err(DomainError::Validation(
            "registration_start must not be after registration_end".to_string(),
        ));
    }
    if registration_end > event_start {
        return Err(DomainError::Validation(
            "registration must close before the event starts".to_string(),
        ));
    }
    if event_start > event_end {
        return Err(DomainError::Validation(
            "event_start must not be after event_end".to_string(),
        ));
    }
    Ok(())
}

/// Validates resolving a complaint: only open complaints resolve, and a
/// non-empty organizer response is required.
pub fn validate_complaint_resolution(status: ComplaintStatus, response: &str) -> Result<()> {
    if status == ComplaintStatus::Resolved {
        return Err(DomainError::InvalidTransition {
            from: status.as_str().to_string(),
            to: ComplaintStatus::Resolved.as_str().to_string(),
        });
    }
    if response.trim().is_empty() {
        return Err(DomainError::Validation(
            "a response is required to resolve a complaint".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_participation_happy_path() {
        use ParticipationStatus::*;
        assert!(validate_participation_transition(Pending, Approved).is_ok());
        assert!(validate_participation_transition(Approved, Present).is_ok());
        assert!(validate_participation_transition(Pending, Rejected).is_ok());
    }

    #[test]
    fn test_participation_illegal_moves() {
        use ParticipationStatus::*;

        // no transition out of terminal states
        assert!(validate_participation_transition(Present, Pending).is_err());
        assert!(validate_participation_transition(Present, Approved).is_err());
        assert!(validate_participation_transition(Rejected, Approved).is_err());
        assert!(validate_participation_transition(Rejected, Pending).is_err());

        // no skipping approval, no rejecting after approval
        assert!(validate_participation_transition(Pending, Present).is_err());
        assert!(validate_participation_transition(Approved, Rejected).is_err());

        // self-transitions are not moves
        assert!(validate_participation_transition(Pending, Pending).is_err());

        // the terminal set matches the transition table
        assert!(Present.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Approved.is_terminal());

        let err = validate_participation_transition(Present, Pending).unwrap_err();
        match err {
            DomainError::InvalidTransition { from, to } => {
                assert_eq!(from, "present");
                assert_eq!(to, "pending");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn test_activity_monotonic() {
        use ActivityStatus::*;
        assert!(validate_activity_transition(Upcoming, Ongoing).is_ok());
        assert!(validate_activity_transition(Ongoing, Completed).is_ok());
        assert!(validate_activity_transition(Upcoming, Completed).is_ok());

        assert!(validate_activity_transition(Completed, Ongoing).is_err());
        assert!(validate_activity_transition(Ongoing, Upcoming).is_err());
        assert!(validate_activity_transition(Upcoming, Upcoming).is_err());
    }

    #[test]
    fn test_activity_status_at_windows() {
        let start = dt(25, 7);
        let end = dt(25, 17);

        assert_eq!(activity_status_at(dt(24, 12), start, end), ActivityStatus::Upcoming);
        assert_eq!(activity_status_at(dt(25, 7), start, end), ActivityStatus::Ongoing);
        assert_eq!(activity_status_at(dt(25, 12), start, end), ActivityStatus::Ongoing);
        assert_eq!(activity_status_at(dt(25, 17), start, end), ActivityStatus::Ongoing);
        assert_eq!(activity_status_at(dt(26, 8), start, end), ActivityStatus::Completed);
    }

    #[test]
    fn test_window_ordering() {
        assert!(validate_activity_windows(dt(1, 8), dt(10, 17), dt(20, 7), dt(20, 17)).is_ok());
        // registration closing on event start is allowed
        assert!(validate_activity_windows(dt(1, 8), dt(20, 7), dt(20, 7), dt(20, 17)).is_ok());

        assert!(validate_activity_windows(dt(10, 8), dt(1, 17), dt(20, 7), dt(20, 17)).is_err());
        assert!(validate_activity_windows(dt(1, 8), dt(21, 17), dt(20, 7), dt(20, 17)).is_err());
        assert!(validate_activity_windows(dt(1, 8), dt(10, 17), dt(20, 17), dt(20, 7)).is_err());
    }

    #[test]
    fn test_complaint_resolution() {
        assert!(validate_complaint_resolution(ComplaintStatus::Open, "Đã kiểm tra lại").is_ok());
        assert!(validate_complaint_resolution(ComplaintStatus::Open, "   ").is_err());
        assert!(validate_complaint_resolution(ComplaintStatus::Resolved, "x").is_err());
    }
}
