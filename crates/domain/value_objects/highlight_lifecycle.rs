//! Status transitions and time-window rules for a single highlight.
//!
//! `pending -> approved | rejected`. Both outcomes are terminal for `status`; later admin edits
//! change data, never status. Whether an approved highlight is showing right now depends on the
//! clock as well as on stored data, so every read path goes through [`is_active_now`].

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    entities::highlights::{HighlightEntity, ReviewHighlightEntity},
    value_objects::enums::highlight_statuses::HighlightStatus,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("highlight already processed (status: {0})")]
    AlreadyProcessed(HighlightStatus),
    #[error("approval window must be a positive number of days within the calendar range, got {0}")]
    InvalidDuration(i64),
}

/// `status == approved AND active AND (ends_at IS NULL OR ends_at >= now)`.
pub fn is_active_now(highlight: &HighlightEntity, now: DateTime<Utc>) -> bool {
    highlight.status() == HighlightStatus::Approved
        && highlight.active
        && highlight.ends_at.is_none_or(|ends_at| ends_at >= now)
}

/// A pending request, or an approved highlight still showing, blocks a new request.
pub fn has_outstanding_request(highlights: &[HighlightEntity], now: DateTime<Utc>) -> bool {
    highlights.iter().any(|highlight| {
        highlight.status() == HighlightStatus::Pending || is_active_now(highlight, now)
    })
}

/// `business.featured` holds while any highlight is approved, whatever its time window.
pub fn featured_from(highlights: &[HighlightEntity]) -> bool {
    highlights
        .iter()
        .any(|highlight| highlight.status() == HighlightStatus::Approved)
}

pub fn approve(
    highlight: &HighlightEntity,
    days: i64,
    now: DateTime<Utc>,
) -> Result<ReviewHighlightEntity, TransitionError> {
    ensure_pending(highlight)?;
    if days <= 0 {
        return Err(TransitionError::InvalidDuration(days));
    }
    let ends_at = Duration::try_days(days)
        .and_then(|window| now.checked_add_signed(window))
        .ok_or(TransitionError::InvalidDuration(days))?;

    Ok(ReviewHighlightEntity {
        status: HighlightStatus::Approved.to_string(),
        active: Some(true),
        starts_at: Some(Some(now)),
        ends_at: Some(Some(ends_at)),
        reviewed_at: Some(now),
        admin_notes: None,
    })
}

pub fn reject(
    highlight: &HighlightEntity,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<ReviewHighlightEntity, TransitionError> {
    ensure_pending(highlight)?;

    Ok(ReviewHighlightEntity {
        status: HighlightStatus::Rejected.to_string(),
        active: None,
        starts_at: None,
        ends_at: None,
        reviewed_at: Some(now),
        admin_notes: Some(notes),
    })
}

fn ensure_pending(highlight: &HighlightEntity) -> Result<(), TransitionError> {
    match highlight.status() {
        HighlightStatus::Pending => Ok(()),
        status => Err(TransitionError::AlreadyProcessed(status)),
    }
}

/// What an admin or owner sees for a highlight at a given instant.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightPhase {
    Pending,
    Rejected,
    Active,
    /// Approved but switched off by an administrator.
    Paused,
    Expired,
}

impl HighlightPhase {
    pub fn of(highlight: &HighlightEntity, now: DateTime<Utc>) -> Self {
        match highlight.status() {
            HighlightStatus::Pending => HighlightPhase::Pending,
            HighlightStatus::Rejected => HighlightPhase::Rejected,
            HighlightStatus::Approved if is_active_now(highlight, now) => HighlightPhase::Active,
            HighlightStatus::Approved if !highlight.active => HighlightPhase::Paused,
            HighlightStatus::Approved => HighlightPhase::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::highlight_types::HighlightType;
    use uuid::Uuid;

    fn highlight(status: HighlightStatus, active: bool, ends_at: Option<DateTime<Utc>>) -> HighlightEntity {
        let now = Utc::now();
        HighlightEntity {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            type_: HighlightType::Carousel.to_string(),
            status: status.to_string(),
            active,
            title: None,
            subtitle: None,
            sort_order: 0,
            starts_at: None,
            ends_at,
            requested_at: Some(now),
            reviewed_at: None,
            admin_notes: None,
            created_at: now,
        }
    }

    #[test]
    fn active_window_boundaries() {
        let now = Utc::now();
        let one_second = Duration::seconds(1);

        let expired = highlight(HighlightStatus::Approved, true, Some(now - one_second));
        let running = highlight(HighlightStatus::Approved, true, Some(now + one_second));
        let open_ended = highlight(HighlightStatus::Approved, true, None);
        let ends_exactly_now = highlight(HighlightStatus::Approved, true, Some(now));

        assert!(!is_active_now(&expired, now));
        assert!(is_active_now(&running, now));
        assert!(is_active_now(&open_ended, now));
        assert!(is_active_now(&open_ended, now + Duration::days(3650)));
        assert!(is_active_now(&ends_exactly_now, now));
    }

    #[test]
    fn switched_off_or_unapproved_is_never_active() {
        let now = Utc::now();
        assert!(!is_active_now(&highlight(HighlightStatus::Approved, false, None), now));
        assert!(!is_active_now(&highlight(HighlightStatus::Pending, true, None), now));
        assert!(!is_active_now(&highlight(HighlightStatus::Rejected, true, None), now));
    }

    #[test]
    fn approve_opens_window_from_now() {
        let now = Utc::now();
        let pending = highlight(HighlightStatus::Pending, false, None);

        let review = approve(&pending, 7, now).unwrap();

        assert_eq!(review.status, "approved");
        assert_eq!(review.active, Some(true));
        assert_eq!(review.starts_at, Some(Some(now)));
        assert_eq!(review.ends_at, Some(Some(now + Duration::days(7))));
        assert_eq!(review.reviewed_at, Some(now));
        assert_eq!(review.admin_notes, None);
    }

    #[test]
    fn approve_rejects_non_positive_days() {
        let pending = highlight(HighlightStatus::Pending, false, None);
        assert_eq!(
            approve(&pending, 0, Utc::now()),
            Err(TransitionError::InvalidDuration(0))
        );
    }

    #[test]
    fn approve_rejects_window_past_representable_dates() {
        let now = Utc::now();
        let pending = highlight(HighlightStatus::Pending, false, None);

        assert_eq!(
            approve(&pending, i64::MAX, now),
            Err(TransitionError::InvalidDuration(i64::MAX))
        );
        assert_eq!(
            approve(&pending, 100_000_000, now),
            Err(TransitionError::InvalidDuration(100_000_000))
        );
        assert!(approve(&pending, 3650, now).is_ok());
    }

    #[test]
    fn reject_records_notes_and_leaves_window() {
        let now = Utc::now();
        let pending = highlight(HighlightStatus::Pending, false, None);

        let review = reject(&pending, Some("blurry image".to_string()), now).unwrap();

        assert_eq!(review.status, "rejected");
        assert_eq!(review.active, None);
        assert_eq!(review.ends_at, None);
        assert_eq!(review.admin_notes, Some(Some("blurry image".to_string())));
    }

    #[test]
    fn processed_highlights_cannot_transition() {
        let now = Utc::now();
        let approved = highlight(HighlightStatus::Approved, true, None);
        let rejected = highlight(HighlightStatus::Rejected, false, None);

        assert_eq!(
            approve(&approved, 7, now),
            Err(TransitionError::AlreadyProcessed(HighlightStatus::Approved))
        );
        assert_eq!(
            reject(&rejected, None, now),
            Err(TransitionError::AlreadyProcessed(HighlightStatus::Rejected))
        );
    }

    #[test]
    fn outstanding_request_detection() {
        let now = Utc::now();
        let past = Some(now - Duration::days(1));

        assert!(!has_outstanding_request(&[], now));
        assert!(has_outstanding_request(
            &[highlight(HighlightStatus::Pending, false, None)],
            now
        ));
        assert!(has_outstanding_request(
            &[highlight(HighlightStatus::Approved, true, None)],
            now
        ));
        assert!(!has_outstanding_request(
            &[
                highlight(HighlightStatus::Approved, true, past),
                highlight(HighlightStatus::Rejected, false, None),
            ],
            now
        ));
    }

    #[test]
    fn featured_ignores_time_window() {
        let expired = highlight(
            HighlightStatus::Approved,
            true,
            Some(Utc::now() - Duration::days(30)),
        );
        assert!(featured_from(&[expired]));
        assert!(!featured_from(&[highlight(HighlightStatus::Rejected, false, None)]));
        assert!(!featured_from(&[]));
    }

    #[test]
    fn phase_reflects_status_switch_and_window() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(1));

        assert_eq!(
            HighlightPhase::of(&highlight(HighlightStatus::Pending, false, None), now),
            HighlightPhase::Pending
        );
        assert_eq!(
            HighlightPhase::of(&highlight(HighlightStatus::Approved, true, None), now),
            HighlightPhase::Active
        );
        assert_eq!(
            HighlightPhase::of(&highlight(HighlightStatus::Approved, false, None), now),
            HighlightPhase::Paused
        );
        assert_eq!(
            HighlightPhase::of(&highlight(HighlightStatus::Approved, true, past), now),
            HighlightPhase::Expired
        );
        assert_eq!(
            HighlightPhase::of(&highlight(HighlightStatus::Rejected, false, None), now),
            HighlightPhase::Rejected
        );
    }
}
