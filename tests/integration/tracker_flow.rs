/// End-to-end flows through the tracker facade: auth preconditions, the
/// toggle cycle against a live subscription, and sign-in state changes.
use std::sync::Arc;

use habitgrid::*;
use tempfile::NamedTempFile;

fn tracker() -> HabitTracker {
    let store = SqliteHabitStore::in_memory().expect("store");
    let identity = LocalIdentityProvider::in_memory().expect("identity");
    HabitTracker::new(Arc::new(store), Arc::new(identity))
}

async fn signed_in_tracker() -> HabitTracker {
    let tracker = tracker();
    tracker
        .identity()
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .expect("sign up");
    tracker
}

#[tokio::test]
async fn unauthenticated_writes_fail_fast() {
    let tracker = tracker();

    let result = tracker.create_habit("Read", HabitKind::Good).await;
    assert!(matches!(result, Err(Error::Auth(AuthError::NotSignedIn))));

    // The store was never touched: after signing in, the list is empty.
    tracker
        .identity()
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .unwrap();
    let rx = tracker.habits().await.unwrap();
    assert!(rx.borrow().is_empty());
}

#[tokio::test]
async fn sign_up_validations() {
    let tracker = tracker();
    let identity = tracker.identity();

    let weak = identity.sign_up("ada@example.com", "Ada", "abc").await;
    assert!(matches!(weak, Err(AuthError::WeakPassword)));

    identity
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .unwrap();
    let duplicate = identity
        .sign_up("Ada@Example.com", "Ada again", "hunter23")
        .await;
    assert!(matches!(duplicate, Err(AuthError::DuplicateAccount { .. })));
}

#[tokio::test]
async fn sign_in_checks_credentials() {
    let tracker = tracker();
    let identity = tracker.identity();

    let unknown = identity.sign_in("nobody@example.com", "whatever").await;
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

    identity
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .unwrap();
    identity.sign_out().await;

    let wrong = identity.sign_in("ada@example.com", "hunter23").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    let user = identity
        .sign_in("ada@example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(user.display_name, "Ada");
}

#[tokio::test]
async fn session_subscription_observes_state_changes() {
    let tracker = tracker();
    let rx = tracker.identity().subscribe().await;
    assert!(rx.borrow().is_none());

    tracker
        .identity()
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .unwrap();
    assert_eq!(
        rx.borrow().as_ref().map(|u| u.email.clone()),
        Some("ada@example.com".to_string())
    );

    tracker.sign_out().await;
    assert!(rx.borrow().is_none());
}

#[tokio::test]
async fn toggle_cycle_round_trips_through_the_store() {
    let tracker = signed_in_tracker().await;
    tracker.create_habit("Read", HabitKind::Good).await.unwrap();

    let rx = tracker.habits().await.unwrap();
    let today = today();
    let day = DateKey::from_date(today);

    let expected = [DayStatus::Success, DayStatus::Fail, DayStatus::Empty];
    for status in expected {
        let habit = rx.borrow()[0].clone();
        let written = tracker.toggle_day(&habit, &day, today).await.unwrap();
        assert_eq!(written, Some(status));
    }

    assert!(rx.borrow()[0].statuses.is_empty());
}

#[tokio::test]
async fn future_days_are_never_written() {
    let tracker = signed_in_tracker().await;
    tracker.create_habit("Read", HabitKind::Good).await.unwrap();

    let rx = tracker.habits().await.unwrap();
    let today = today();
    let habit = rx.borrow()[0].clone();
    let tomorrow = DateKey::from_date(today.succ_opt().unwrap());

    let written = tracker.toggle_day(&habit, &tomorrow, today).await.unwrap();
    assert_eq!(written, None);
    assert!(rx.borrow()[0].statuses.is_empty());
}

#[tokio::test]
async fn streaks_flow_from_toggled_days() {
    let tracker = signed_in_tracker().await;
    tracker.create_habit("Read", HabitKind::Good).await.unwrap();

    let rx = tracker.habits().await.unwrap();
    let today = today();
    let yesterday = today.pred_opt().unwrap();

    for day in [today, yesterday] {
        let habit = rx.borrow()[0].clone();
        tracker
            .toggle_day(&habit, &DateKey::from_date(day), today)
            .await
            .unwrap();
    }

    let habit = rx.borrow()[0].clone();
    assert_eq!(current_streak(&habit.statuses, today), 2);
    assert_eq!(longest_streak(&habit.statuses, today), 2);
}

#[tokio::test]
async fn rename_is_validated_before_reaching_the_store() {
    let tracker = signed_in_tracker().await;
    let id = tracker.create_habit("Read", HabitKind::Good).await.unwrap();

    let invalid = tracker.rename_habit(&id, "   ").await;
    assert!(matches!(invalid, Err(Error::Domain(_))));

    tracker.rename_habit(&id, "Read more").await.unwrap();
    let rx = tracker.habits().await.unwrap();
    assert_eq!(rx.borrow()[0].name, "Read more");
}

#[tokio::test]
async fn open_shares_one_database_for_store_and_identity() {
    let db = NamedTempFile::new().expect("Failed to create temp file");
    let tracker = HabitTracker::open(db.path().to_path_buf()).unwrap();

    tracker
        .identity()
        .sign_up("ada@example.com", "Ada", "hunter22")
        .await
        .unwrap();
    tracker.create_habit("Read", HabitKind::Good).await.unwrap();

    let rx = tracker.habits().await.unwrap();
    assert_eq!(rx.borrow().len(), 1);
}
