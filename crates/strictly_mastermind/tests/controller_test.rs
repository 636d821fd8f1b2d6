//! Tests for the game session controller state machine.

mod support;

use std::sync::Arc;

use strictly_mastermind::{
    GameSessionController, INVALID_GUESS_MESSAGE, IntentOutcome, ServiceError, Stage, ViewStage,
};
use support::{Call, ScriptedService};

async fn started(service: ScriptedService) -> GameSessionController<ScriptedService> {
    let controller = GameSessionController::new(service);
    assert_eq!(controller.start_game().await, IntentOutcome::Applied);
    controller
}

#[tokio::test]
async fn test_start_game_moves_to_awaiting_guess() {
    let controller = started(ScriptedService::new().with_game("g1")).await;

    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::AwaitingGuess);
    assert_eq!(snap.view_stage(), ViewStage::InGameWaiting);
    assert_eq!(snap.session().session_id(), Some("g1"));
    assert!(snap.session().attempts().is_empty());
    assert!(!snap.session().completed());
    assert!(!snap.has_error());
}

#[tokio::test]
async fn test_full_game_scenario() {
    let controller = started(
        ScriptedService::new()
            .with_game("g1")
            .with_score(1, 2)
            .with_score(4, 0),
    )
    .await;

    assert_eq!(controller.submit_guess("1234").await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::AwaitingGuess);
    assert_eq!(snap.session().attempts().len(), 1);
    let first = &snap.session().attempts()[0];
    assert_eq!(first.code(), "1234");
    assert_eq!(*first.exact_matches(), 1);
    assert_eq!(*first.partial_matches(), 2);

    assert_eq!(controller.submit_guess("5566").await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Finished);
    assert_eq!(snap.view_stage(), ViewStage::Finished);
    assert_eq!(snap.session().attempts().len(), 2);
    assert!(snap.session().completed());
    assert_eq!(snap.session().solved_in(), Some(2));

    assert_eq!(
        controller.service().calls(),
        vec![
            Call::Create,
            Call::Guess {
                session_id: "g1".into(),
                code: "1234".into()
            },
            Call::Guess {
                session_id: "g1".into(),
                code: "5566".into()
            },
        ]
    );
}

#[tokio::test]
async fn test_invalid_guess_never_reaches_service() {
    let controller = started(ScriptedService::new().with_game("g1")).await;

    for raw in ["123", "12345", "12a4", ""] {
        assert_eq!(controller.submit_guess(raw).await, IntentOutcome::Invalid);
        let snap = controller.snapshot();
        assert_eq!(*snap.stage(), Stage::AwaitingGuess);
        assert_eq!(snap.error_message(), INVALID_GUESS_MESSAGE);
        assert_eq!(snap.guess_input(), raw);
    }
    assert_eq!(controller.service().guess_calls(), 0);
}

#[tokio::test]
async fn test_valid_guess_clears_previous_error() {
    let controller = started(ScriptedService::new().with_game("g1").with_score(0, 1)).await;

    controller.submit_guess("abcd").await;
    assert!(controller.snapshot().has_error());

    assert_eq!(controller.submit_guess("1234").await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert!(!snap.has_error());
    assert!(snap.guess_input().is_empty());
}

#[tokio::test]
async fn test_guess_failure_leaves_no_history() {
    let controller = started(
        ScriptedService::new()
            .with_game("g1")
            .with_score(1, 1)
            .with_guess(Err(ServiceError::rejected("invalid session"))),
    )
    .await;

    controller.submit_guess("1234").await;
    assert_eq!(controller.submit_guess("4321").await, IntentOutcome::Failed);

    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::AwaitingGuess);
    assert_eq!(snap.session().attempts().len(), 1);
    assert_eq!(
        snap.error_message(),
        "Error making guess: API Error: invalid session"
    );
    assert_eq!(snap.guess_input(), "4321");
}

#[tokio::test]
async fn test_submit_outside_awaiting_guess_is_noop() {
    let controller = GameSessionController::new(ScriptedService::new());

    assert_eq!(controller.submit_guess("1234").await, IntentOutcome::Rejected);
    assert_eq!(controller.snapshot(), Default::default());
    assert!(controller.service().calls().is_empty());
}

#[tokio::test]
async fn test_submit_after_finish_is_noop() {
    let controller = started(ScriptedService::new().with_game("g1").with_score(4, 0)).await;
    controller.submit_guess("1111").await;
    let before = controller.snapshot();

    assert_eq!(controller.submit_guess("2222").await, IntentOutcome::Rejected);
    assert_eq!(controller.snapshot(), before);
    assert_eq!(controller.service().guess_calls(), 1);
}

#[tokio::test]
async fn test_start_failure_allows_retry() {
    let controller = GameSessionController::new(
        ScriptedService::new()
            .with_create(Err(ServiceError::transport("connection refused")))
            .with_game("g2"),
    );

    assert_eq!(controller.start_game().await, IntentOutcome::Failed);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Uninitialized);
    assert_eq!(
        snap.error_message(),
        "Error creating game: Network error: connection refused"
    );

    assert_eq!(controller.start_game().await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::AwaitingGuess);
    assert!(!snap.has_error());
    assert_eq!(snap.session().session_id(), Some("g2"));
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let controller = started(ScriptedService::new().with_game("g1")).await;

    assert_eq!(controller.start_game().await, IntentOutcome::Rejected);
    assert_eq!(controller.service().calls(), vec![Call::Create]);
}

#[tokio::test]
async fn test_reset_from_finished() {
    let controller = started(ScriptedService::new().with_game("g1").with_score(4, 0)).await;
    controller.submit_guess("1234").await;

    assert_eq!(controller.reset(), IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Uninitialized);
    assert_eq!(snap.session().session_id(), None);
    assert!(snap.session().attempts().is_empty());
    assert!(!snap.has_error());
    assert!(snap.guess_input().is_empty());
}

#[tokio::test]
async fn test_reset_outside_finished_is_rejected() {
    let controller = started(ScriptedService::new().with_game("g1")).await;

    assert_eq!(controller.reset(), IntentOutcome::Rejected);
    assert_eq!(controller.stage(), Stage::AwaitingGuess);
}

#[tokio::test]
async fn test_abandon_deletes_remote_game() {
    let controller = started(ScriptedService::new().with_game("g1").with_score(0, 0)).await;
    controller.submit_guess("1234").await;

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Uninitialized);
    assert!(snap.session().attempts().is_empty());
    assert_eq!(
        controller.service().calls().last(),
        Some(&Call::Delete {
            session_id: "g1".into()
        })
    );
}

#[tokio::test]
async fn test_abandon_swallows_delete_failure() {
    let controller = started(
        ScriptedService::new()
            .with_game("g1")
            .with_delete(Err(ServiceError::transport("timed out"))),
    )
    .await;

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Uninitialized);
    assert!(!snap.has_error());
}

#[tokio::test]
async fn test_abandon_before_start_makes_no_call() {
    let controller = GameSessionController::new(ScriptedService::new());

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    assert!(controller.service().calls().is_empty());
}

#[tokio::test]
async fn test_abandon_from_finished_is_rejected() {
    let controller = started(ScriptedService::new().with_game("g1").with_score(4, 0)).await;
    controller.submit_guess("1234").await;

    assert_eq!(controller.abandon().await, IntentOutcome::Rejected);
    assert_eq!(controller.stage(), Stage::Finished);
}

#[tokio::test]
async fn test_overlapping_guess_is_rejected() {
    let service = ScriptedService::new().with_game("g1").with_score(1, 0);
    let gate = service.gate_guess();
    let controller = Arc::new(started(service).await);

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_guess("1234").await })
    };
    gate.entered.notified().await;

    assert_eq!(controller.stage(), Stage::Submitting);
    assert_eq!(controller.snapshot().view_stage(), ViewStage::InGameBusy);
    assert_eq!(controller.submit_guess("4321").await, IntentOutcome::Rejected);
    assert_eq!(controller.start_game().await, IntentOutcome::Rejected);

    gate.release.notify_one();
    assert_eq!(in_flight.await.unwrap(), IntentOutcome::Applied);
    assert_eq!(controller.snapshot().session().attempts().len(), 1);
    assert_eq!(controller.service().guess_calls(), 1);
}

#[tokio::test]
async fn test_stale_guess_after_abandon_is_discarded() {
    let service = ScriptedService::new().with_game("g1").with_score(4, 0);
    let gate = service.gate_guess();
    let controller = Arc::new(started(service).await);

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_guess("1234").await })
    };
    gate.entered.notified().await;

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    gate.release.notify_one();
    assert_eq!(in_flight.await.unwrap(), IntentOutcome::Stale);

    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::Uninitialized);
    assert_eq!(snap.session().session_id(), None);
    assert!(snap.session().attempts().is_empty());
    assert!(!snap.session().completed());
}

#[tokio::test]
async fn test_stale_guess_does_not_touch_next_game() {
    let service = ScriptedService::new()
        .with_game("g1")
        .with_score(4, 0)
        .with_game("g2");
    let gate = service.gate_guess();
    let controller = Arc::new(started(service).await);

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_guess("1234").await })
    };
    gate.entered.notified().await;

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    assert_eq!(controller.start_game().await, IntentOutcome::Applied);
    assert_eq!(controller.snapshot().session().session_id(), Some("g2"));

    gate.release.notify_one();
    assert_eq!(in_flight.await.unwrap(), IntentOutcome::Stale);

    let snap = controller.snapshot();
    assert_eq!(*snap.stage(), Stage::AwaitingGuess);
    assert_eq!(snap.session().session_id(), Some("g2"));
    assert!(snap.session().attempts().is_empty());
    assert!(!snap.session().completed());
    assert!(!snap.has_error());
}

#[tokio::test]
async fn test_stale_create_after_abandon_is_cleaned_up() {
    let service = ScriptedService::new().with_game("orphan");
    let gate = service.gate_create();
    let controller = Arc::new(GameSessionController::new(service));

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start_game().await })
    };
    gate.entered.notified().await;
    assert_eq!(controller.stage(), Stage::Creating);
    assert_eq!(controller.snapshot().view_stage(), ViewStage::PreGame);

    assert_eq!(controller.abandon().await, IntentOutcome::Applied);
    gate.release.notify_one();
    assert_eq!(in_flight.await.unwrap(), IntentOutcome::Stale);

    assert_eq!(controller.stage(), Stage::Uninitialized);
    assert_eq!(controller.snapshot().session().session_id(), None);
    assert_eq!(
        controller.service().calls(),
        vec![
            Call::Create,
            Call::Delete {
                session_id: "orphan".into()
            }
        ]
    );
}

#[tokio::test]
async fn test_subscribers_see_each_transition() {
    let controller = GameSessionController::new(ScriptedService::new().with_game("g1"));
    let mut updates = controller.subscribe();
    assert!(!updates.has_changed().unwrap());

    controller.start_game().await;
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update().stage(), Stage::AwaitingGuess);

    controller.submit_guess("xx").await;
    assert!(updates.has_changed().unwrap());
    assert_eq!(
        updates.borrow_and_update().error_message(),
        INVALID_GUESS_MESSAGE
    );
}
