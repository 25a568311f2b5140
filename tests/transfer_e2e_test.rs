// ==========================================
// Transfer workflow end-to-end tests
// ==========================================
// Covers the full path: absence -> assignment -> transfer request ->
// admin decision, including terminality and the approval effect.
// ==========================================

mod helpers;

use chrono::NaiveDate;
use helpers::TestEnv;
use substitute_planner::{Actor, ApiError, DayLabel, TransferDecision, TransferStatus};

struct Scenario {
    env: TestEnv,
    original: i64,
    substitute: i64,
    proposed: i64,
    substitution_id: i64,
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
}

/// Alice absent, Bob assigned as substitute, Dan available as target.
fn seed() -> Scenario {
    let env = TestEnv::new();
    let original = env.add_teacher("Alice", "T-001");
    let substitute = env.add_teacher("Bob", "T-002");
    let proposed = env.add_teacher("Dan", "T-004");
    env.set_class(original, DayLabel::Day1, 3, "Class 7");
    env.set_free(substitute, DayLabel::Day1, 3);
    env.set_free(proposed, DayLabel::Day1, 3);

    env.api
        .declare_absence(&Actor::admin(), original, monday())
        .unwrap();
    let plan = env.api.daily_plan(monday()).unwrap();
    let substitution_id = plan.periods[&3][0].substitution_id;
    // The id-ascending tie-break assigns Bob, not Dan.
    assert_eq!(plan.periods[&3][0].substitute_teacher_id, substitute);

    Scenario {
        env,
        original,
        substitute,
        proposed,
        substitution_id,
    }
}

#[test]
fn rejection_leaves_the_assignment_and_is_terminal() {
    let s = seed();
    let filed = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.substitute),
            s.substitution_id,
            s.proposed,
            "conflict",
            false,
        )
        .unwrap();
    assert_eq!(filed.status, TransferStatus::Pending);

    // Pending request shows up in the plan view count.
    let plan = s.env.api.daily_plan(monday()).unwrap();
    assert_eq!(plan.periods[&3][0].pending_transfers, 1);

    s.env
        .api
        .decide_transfer(&Actor::admin(), filed.id, TransferDecision::Reject)
        .unwrap();

    // Substitution still shows Bob.
    let plan = s.env.api.daily_plan(monday()).unwrap();
    assert_eq!(plan.periods[&3][0].substitute_teacher_id, s.substitute);
    assert_eq!(plan.periods[&3][0].pending_transfers, 0);

    // Second decision attempt fails and changes nothing.
    let err = s
        .env
        .api
        .decide_transfer(&Actor::admin(), filed.id, TransferDecision::Approve)
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyDecided(_)));
    let plan = s.env.api.daily_plan(monday()).unwrap();
    assert_eq!(plan.periods[&3][0].substitute_teacher_id, s.substitute);
}

#[test]
fn approval_moves_only_the_substitute_field() {
    let s = seed();
    let filed = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.substitute),
            s.substitution_id,
            s.proposed,
            "doctor appointment",
            false,
        )
        .unwrap();

    s.env
        .api
        .decide_transfer(&Actor::admin(), filed.id, TransferDecision::Approve)
        .unwrap();

    let plan = s.env.api.daily_plan(monday()).unwrap();
    let entry = &plan.periods[&3][0];
    assert_eq!(entry.substitute_teacher_id, s.proposed);
    assert_eq!(entry.original_teacher_id, s.original);
    assert_eq!(entry.class_name, "Class 7");
    assert_eq!(entry.substitution_id, s.substitution_id);

    // The duty now belongs to Dan; Bob holds nothing.
    assert!(s
        .env
        .api
        .duties_for(&Actor::teacher(s.substitute), s.substitute, monday())
        .unwrap()
        .is_empty());
    assert_eq!(
        s.env
            .api
            .duties_for(&Actor::teacher(s.proposed), s.proposed, monday())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn filing_is_restricted_to_the_duty_holder() {
    let s = seed();

    // The absent teacher does not hold the duty.
    let err = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.original),
            s.substitution_id,
            s.proposed,
            "conflict",
            false,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::NotOwner(_)));

    // Admins do not file transfers either; the workflow is teacher-initiated.
    let err = s
        .env
        .api
        .file_transfer(&Actor::admin(), s.substitution_id, s.proposed, "conflict", false)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotOwner(_)));

    // Blank reason is invalid.
    let err = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.substitute),
            s.substitution_id,
            s.proposed,
            "  ",
            false,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn pending_queue_is_admin_only_and_drains_on_decision() {
    let s = seed();
    let filed = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.substitute),
            s.substitution_id,
            s.proposed,
            "conflict",
            false,
        )
        .unwrap();

    let err = s
        .env
        .api
        .pending_transfers(&Actor::teacher(s.substitute))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotOwner(_)));

    let pending = s.env.api.pending_transfers(&Actor::admin()).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, filed.id);

    s.env
        .api
        .decide_transfer(&Actor::admin(), filed.id, TransferDecision::Reject)
        .unwrap();
    assert!(s.env.api.pending_transfers(&Actor::admin()).unwrap().is_empty());
}

#[test]
fn recompute_invalidates_open_requests_against_dropped_rows() {
    let s = seed();
    let filed = s
        .env
        .api
        .file_transfer(
            &Actor::teacher(s.substitute),
            s.substitution_id,
            s.proposed,
            "conflict",
            false,
        )
        .unwrap();

    // Cancelling the absence recomputes the date and drops the
    // substitution; the cascade removes the request with it.
    s.env
        .api
        .cancel_absence(&Actor::admin(), s.original, monday())
        .unwrap();

    let err = s
        .env
        .api
        .decide_transfer(&Actor::admin(), filed.id, TransferDecision::Approve)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
