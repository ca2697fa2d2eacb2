//! Unit tests for the challenge state machine

use crate::domain::challenge::{ChallengeState, Submission, VerifyStep};

const MAX_FAILED: u32 = 3;

#[test]
fn test_from_store_lock_wins() {
    assert_eq!(ChallengeState::from_store(true, true, 1), ChallengeState::Locked);
    assert_eq!(ChallengeState::from_store(true, false, 0), ChallengeState::Locked);
    assert_eq!(
        ChallengeState::from_store(false, true, 2),
        ChallengeState::Active { attempts: 2 }
    );
    assert_eq!(ChallengeState::from_store(false, false, 2), ChallengeState::NoChallenge);
}

#[test]
fn test_correct_code_clears_challenge() {
    let (next, step) = ChallengeState::Active { attempts: 2 }.on_submission(Submission::Correct, MAX_FAILED);
    assert_eq!(next, ChallengeState::NoChallenge);
    assert_eq!(step, VerifyStep::Verified);
}

#[test]
fn test_three_wrong_submissions_lock() {
    let state = ChallengeState::Active { attempts: 0 };

    let (state, step) = state.on_submission(Submission::Wrong, MAX_FAILED);
    assert_eq!(step, VerifyStep::Rejected { attempts_left: 1 });
    assert_eq!(state, ChallengeState::Active { attempts: 1 });

    let (state, step) = state.on_submission(Submission::Wrong, MAX_FAILED);
    assert_eq!(step, VerifyStep::Rejected { attempts_left: 0 });
    assert_eq!(state, ChallengeState::Active { attempts: 2 });

    let (state, step) = state.on_submission(Submission::Wrong, MAX_FAILED);
    assert_eq!(step, VerifyStep::LockedOut);
    assert_eq!(state, ChallengeState::Locked);
}

#[test]
fn test_locked_ignores_submissions() {
    for submission in [Submission::Correct, Submission::Wrong] {
        let (next, step) = ChallengeState::Locked.on_submission(submission, MAX_FAILED);
        assert_eq!(next, ChallengeState::Locked);
        assert_eq!(step, VerifyStep::AccountLocked);
    }
}

#[test]
fn test_no_challenge_is_expired() {
    let (next, step) = ChallengeState::NoChallenge.on_submission(Submission::Correct, MAX_FAILED);
    assert_eq!(next, ChallengeState::NoChallenge);
    assert_eq!(step, VerifyStep::ExpiredOrMissing);
}

#[test]
fn test_single_attempt_policy() {
    let (next, step) = ChallengeState::Active { attempts: 0 }.on_submission(Submission::Wrong, 1);
    assert_eq!(next, ChallengeState::Locked);
    assert_eq!(step, VerifyStep::LockedOut);
}
