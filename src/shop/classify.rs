//! Redemption error classification.
//!
//! The redemption endpoint does not distinguish "the card is still being
//! produced" from "this redemption failed" in its status codes — only in
//! free-text error messages. This module is the single place that mapping
//! lives, so the phrase list can be updated (or replaced with upstream
//! error codes some day) without touching any call site.
//!
//! Known risk, accepted and documented: a future upstream rewording that
//! matches nothing here silently degrades to `FAILURE`. That is the
//! conservative direction — the order stays stored and redemption can be
//! retried — but keep the list in sync with upstream wording.

use crate::model::OrderStatus;

/// Messages that mean the redemption is still in flight and safe to retry
/// later. Matched exactly, case-sensitive.
pub const PENDING_MESSAGES: [&str; 2] = [
    "Card creation delayed",
    "Invoice is unpaid or payment has not confirmed",
];

/// Substring that also signals a transient delay. Case-sensitive.
const PLEASE_WAIT: &str = "Please wait";

/// Classify a redemption transport error by its remote message.
///
/// A match yields [`OrderStatus::Pending`] (non-terminal, retry later);
/// anything else — including no message at all — yields
/// [`OrderStatus::Failure`].
pub fn classify_redemption_error(message: Option<&str>) -> OrderStatus {
    match message {
        Some(m) if PENDING_MESSAGES.contains(&m) || m.contains(PLEASE_WAIT) => {
            OrderStatus::Pending
        }
        _ => OrderStatus::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pending_phrases() {
        assert_eq!(
            classify_redemption_error(Some("Card creation delayed")),
            OrderStatus::Pending
        );
        assert_eq!(
            classify_redemption_error(Some("Invoice is unpaid or payment has not confirmed")),
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_please_wait_substring() {
        assert_eq!(
            classify_redemption_error(Some("Please wait 2 minutes and try again")),
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            classify_redemption_error(Some("please wait a moment")),
            OrderStatus::Failure
        );
        assert_eq!(
            classify_redemption_error(Some("card creation delayed")),
            OrderStatus::Failure
        );
    }

    #[test]
    fn test_unknown_wording_degrades_to_failure() {
        assert_eq!(
            classify_redemption_error(Some("Card unavailable")),
            OrderStatus::Failure
        );
        assert_eq!(classify_redemption_error(None), OrderStatus::Failure);
    }

    #[test]
    fn test_exact_phrases_do_not_match_as_substrings() {
        // Only the "Please wait" rule is a substring match
        assert_eq!(
            classify_redemption_error(Some("Error: Card creation delayed badly")),
            OrderStatus::Failure
        );
    }
}
