//! Expiration policy for current-value entries.

use crate::error::ExpirationError;
use crate::identity::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifespan policy applied when a key is first added to a store.
///
/// The policy is fixed at entry creation; updating an existing entry's
/// value never changes the policy it was created with. Revision history
/// never expires regardless of the policy on the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expiration {
    /// Entry never expires.
    #[default]
    None,
    /// Entry expires once the timeout elapses without an access; every
    /// read refreshes the clock.
    Sliding(Duration),
    /// Entry expires at the given deadline.
    Absolute(Timestamp),
}

impl Expiration {
    /// Validate the policy against the current time.
    ///
    /// Called before any store mutation, so a rejected policy leaves the
    /// store untouched.
    pub fn validate(&self, now: Timestamp) -> Result<(), ExpirationError> {
        match *self {
            Expiration::None => Ok(()),
            Expiration::Sliding(timeout) if timeout.is_zero() => {
                Err(ExpirationError::ZeroSlidingTimeout)
            }
            Expiration::Sliding(_) => Ok(()),
            Expiration::Absolute(deadline) if deadline <= now => {
                Err(ExpirationError::DeadlineNotInFuture { deadline })
            }
            Expiration::Absolute(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_none_is_always_valid() {
        assert!(Expiration::None.validate(Utc::now()).is_ok());
        assert_eq!(Expiration::default(), Expiration::None);
    }

    #[test]
    fn test_zero_sliding_timeout_rejected() {
        let err = Expiration::Sliding(Duration::ZERO).validate(Utc::now());
        assert_eq!(err, Err(ExpirationError::ZeroSlidingTimeout));
        assert!(Expiration::Sliding(Duration::from_secs(60))
            .validate(Utc::now())
            .is_ok());
    }

    #[test]
    fn test_past_deadline_rejected() {
        let now = Utc::now();
        let past = now - chrono::Duration::seconds(1);
        assert_eq!(
            Expiration::Absolute(past).validate(now),
            Err(ExpirationError::DeadlineNotInFuture { deadline: past })
        );
        assert!(Expiration::Absolute(now + chrono::Duration::seconds(1))
            .validate(now)
            .is_ok());
    }
}
