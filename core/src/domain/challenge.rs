//! Per-identifier verification state machine.
//!
//! ```text
//! NoChallenge -> Active(0) -> Active(1) -> ... -> Locked
//! Active(n)   -> NoChallenge            (correct code)
//! Locked      -> NoChallenge            (lock TTL expiry only)
//! ```
//!
//! Transitions are pure; the verifier turns the resulting state into store
//! writes.

/// What the store says about an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeState {
    /// No code is active (never issued, expired or consumed)
    NoChallenge,
    /// A code is active and `attempts` wrong submissions were counted
    Active { attempts: u32 },
    /// The account lock is present
    Locked,
}

/// A submitted code, already compared against the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Correct,
    Wrong,
}

/// Outcome of applying a submission to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStep {
    /// Code accepted; code and counter are cleared
    Verified,
    /// Wrong code; `attempts_left` more wrong submissions are tolerated
    /// before the lock
    Rejected { attempts_left: u32 },
    /// Wrong code that exhausted the attempts; the account lock is set
    LockedOut,
    /// Nothing to verify against
    ExpiredOrMissing,
    /// The account lock was already present
    AccountLocked,
}

impl ChallengeState {
    /// Build the state from what was read from the store. The lock wins
    /// over everything else.
    pub fn from_store(locked: bool, code_present: bool, attempts: u32) -> Self {
        if locked {
            ChallengeState::Locked
        } else if code_present {
            ChallengeState::Active { attempts }
        } else {
            ChallengeState::NoChallenge
        }
    }

    /// Apply a submission. `max_failed_attempts` is the number of wrong
    /// submissions that trips the lock.
    pub fn on_submission(
        self,
        submission: Submission,
        max_failed_attempts: u32,
    ) -> (ChallengeState, VerifyStep) {
        match (self, submission) {
            (ChallengeState::Locked, _) => (ChallengeState::Locked, VerifyStep::AccountLocked),
            (ChallengeState::NoChallenge, _) => {
                (ChallengeState::NoChallenge, VerifyStep::ExpiredOrMissing)
            }
            (ChallengeState::Active { .. }, Submission::Correct) => {
                (ChallengeState::NoChallenge, VerifyStep::Verified)
            }
            (ChallengeState::Active { attempts }, Submission::Wrong) => {
                let failed = attempts.saturating_add(1);
                if failed >= max_failed_attempts {
                    (ChallengeState::Locked, VerifyStep::LockedOut)
                } else {
                    (
                        ChallengeState::Active { attempts: failed },
                        VerifyStep::Rejected {
                            attempts_left: max_failed_attempts - 1 - failed,
                        },
                    )
                }
            }
        }
    }
}
