//! End-to-end tests for the single-venue view: load, select, check,
//! submit, resync - driven through the Store runtime with a scripted
//! directory.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use venuebook_booking::mocks::{MemoryCredentialStore, MockDirectory};
use venuebook_booking::{
    BookingEnvironment, DateRange, FlowStatus, NoticeKind, Selection, Session, SessionContext,
    StoredProfile, VenueViewAction, VenueViewState, venue_view_reducer,
};
use venuebook_runtime::Store;
use venuebook_testing::{FixedClock, test_clock};

type TestEnv = BookingEnvironment<MockDirectory, MemoryCredentialStore, FixedClock>;

fn session_context(signed_in: bool) -> Arc<SessionContext<MemoryCredentialStore>> {
    let context = SessionContext::new(MemoryCredentialStore::new());
    if signed_in {
        context.set(Session {
            access_token: "token-abc".to_string(),
            profile: StoredProfile {
                name: "ingrid".to_string(),
                email: "ingrid@example.com".to_string(),
                avatar: None,
                venue_manager: false,
            },
        });
    }
    Arc::new(context)
}

fn venue_store(
    directory: MockDirectory,
    signed_in: bool,
) -> Store<
    VenueViewState,
    VenueViewAction,
    TestEnv,
    venuebook_core::composition::CombinedReducer<VenueViewState, VenueViewAction, TestEnv>,
> {
    let env = BookingEnvironment::new(directory, session_context(signed_in), test_clock());
    Store::new(VenueViewState::default(), venue_view_reducer(), env)
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn range(from: &str, to: &str) -> DateRange {
    DateRange::new(day(from), day(to)).unwrap()
}

async fn open_view(
    store: &Store<
        VenueViewState,
        VenueViewAction,
        TestEnv,
        venuebook_core::composition::CombinedReducer<VenueViewState, VenueViewAction, TestEnv>,
    >,
    venue_id: &str,
) {
    let mut handle = store
        .send(VenueViewAction::ViewOpened {
            venue_id: venue_id.to_string(),
        })
        .await
        .unwrap();
    handle.wait().await;
}

async fn select_checked_range(
    store: &Store<
        VenueViewState,
        VenueViewAction,
        TestEnv,
        venuebook_core::composition::CombinedReducer<VenueViewState, VenueViewAction, TestEnv>,
    >,
    from: &str,
    to: &str,
) {
    for action in [
        VenueViewAction::CheckInPicked { date: day(from) },
        VenueViewAction::CheckOutPicked { date: day(to) },
        VenueViewAction::GuestsChanged { guests: 2 },
        VenueViewAction::CheckAvailability,
    ] {
        let mut handle = store.send(action).await.unwrap();
        handle.wait().await;
    }
}

#[tokio::test]
async fn opening_the_view_ingests_the_booked_ranges() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture(
        "v-1",
        &[("2024-06-10", "2024-06-15")],
    ));

    let store = venue_store(directory, true);
    open_view(&store, "v-1").await;

    let (loading, booked, has_venue) = store
        .state(|s| (s.loading, s.booked.clone(), s.venue.is_some()))
        .await;

    assert!(!loading);
    assert!(has_venue);
    assert_eq!(booked, vec![range("2024-06-10", "2024-06-15")]);
}

#[tokio::test]
async fn disjoint_range_checks_available() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture(
        "v-1",
        &[("2024-06-10", "2024-06-15")],
    ));

    let store = venue_store(directory, true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    let verdict = store.state(|s| s.verdict).await.unwrap();
    assert!(verdict.available);
}

#[tokio::test]
async fn boundary_range_checks_unavailable_and_blocks_submission() {
    // same-day turnover is disallowed
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture(
        "v-1",
        &[("2024-06-10", "2024-06-15")],
    ));

    let store = venue_store(directory.clone(), true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-15", "2024-06-18").await;

    let verdict = store.state(|s| s.verdict).await.unwrap();
    assert!(!verdict.available);

    let mut handle = store.send(VenueViewAction::SubmitBooking).await.unwrap();
    handle.wait().await;

    // Rejected locally: nothing left the client
    assert_eq!(directory.create_booking_calls(), 0);
    let notice = store.state(|s| s.notice.clone()).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[tokio::test]
async fn successful_submission_resets_selection_and_resyncs_from_the_api() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture("v-1", &[]));

    let store = venue_store(directory.clone(), true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    let result = store
        .send_and_wait_for(
            VenueViewAction::SubmitBooking,
            |a| {
                matches!(
                    a,
                    VenueViewAction::BookingsRefreshed { .. }
                        | VenueViewAction::BookingRejected { .. }
                        | VenueViewAction::RefreshFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    assert!(matches!(result, VenueViewAction::BookingsRefreshed { .. }));

    let state = store.state(Clone::clone).await;
    assert_eq!(state.selection, Selection::Empty);
    assert!(state.verdict.is_none());
    assert_eq!(state.status, FlowStatus::Idle);
    // The refreshed snapshot carries the booking the API now owns
    assert_eq!(state.booked, vec![range("2024-06-16", "2024-06-20")]);

    assert_eq!(directory.create_booking_calls(), 1);
    // Initial load plus the post-submission refetch
    assert_eq!(directory.get_venue_calls(), 2);
}

#[tokio::test]
async fn server_rejection_keeps_the_selection_for_retry() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture("v-1", &[]));
    directory.fail_next_create(venuebook_client::ApiError::Api {
        status: 500,
        message: "Internal error".to_string(),
    });

    let store = venue_store(directory.clone(), true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    let result = store
        .send_and_wait_for(
            VenueViewAction::SubmitBooking,
            |a| matches!(a, VenueViewAction::BookingRejected { .. }),
            Duration::from_secs(5),
        )
        .await;
    assert!(result.is_ok());

    let state = store.state(Clone::clone).await;
    assert_eq!(state.status, FlowStatus::Idle);
    assert!(matches!(state.selection, Selection::RangeSelected { .. }));
    assert_eq!(state.notice.unwrap().kind, NoticeKind::Error);

    // No refetch on the failure path
    assert_eq!(directory.get_venue_calls(), 1);
}

#[tokio::test]
async fn server_side_conflict_maps_to_a_conflict_message() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture("v-1", &[]));
    directory.fail_next_create(venuebook_client::ApiError::Api {
        status: 409,
        message: "Dates already taken".to_string(),
    });

    let store = venue_store(directory, true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    let result = store
        .send_and_wait_for(
            VenueViewAction::SubmitBooking,
            |a| matches!(a, VenueViewAction::BookingRejected { .. }),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    match result {
        VenueViewAction::BookingRejected { error, .. } => {
            assert_eq!(error, venuebook_booking::BookingError::Conflict);
        },
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn rapid_double_submit_creates_exactly_one_booking() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture("v-1", &[]));

    let store = venue_store(directory.clone(), true);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    // Slow the API down so the second click lands mid-flight
    directory.set_latency(Duration::from_millis(100));

    let mut first = store.send(VenueViewAction::SubmitBooking).await.unwrap();
    let mut second = store.send(VenueViewAction::SubmitBooking).await.unwrap();
    first.wait().await;
    second.wait().await;

    assert_eq!(directory.create_booking_calls(), 1);
}

#[tokio::test]
async fn unauthenticated_submission_parks_the_intent() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture("v-1", &[]));

    let store = venue_store(directory.clone(), false);
    open_view(&store, "v-1").await;
    select_checked_range(&store, "2024-06-16", "2024-06-20").await;

    let mut handle = store.send(VenueViewAction::SubmitBooking).await.unwrap();
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    let pending = state.pending.unwrap();
    assert_eq!(pending.venue_id, "v-1");
    assert_eq!(pending.range, range("2024-06-16", "2024-06-20"));
    assert_eq!(pending.guests, 2);
    // Selection survives the detour
    assert!(matches!(state.selection, Selection::RangeSelected { .. }));
    assert_eq!(directory.create_booking_calls(), 0);
}

#[tokio::test]
async fn late_venue_load_cannot_mutate_a_closed_view() {
    let directory = MockDirectory::new();
    directory.insert_venue(MockDirectory::venue_fixture(
        "v-1",
        &[("2024-06-10", "2024-06-15")],
    ));
    directory.set_latency(Duration::from_millis(150));

    let store = venue_store(directory, true);

    // Open, then navigate away before the response lands
    let mut load = store
        .send(VenueViewAction::ViewOpened {
            venue_id: "v-1".to_string(),
        })
        .await
        .unwrap();
    let mut close = store.send(VenueViewAction::ViewClosed).await.unwrap();
    close.wait().await;
    load.wait().await;

    let state = store.state(Clone::clone).await;
    assert!(state.venue.is_none());
    assert!(state.booked.is_empty());
    assert!(!state.loading);
}
