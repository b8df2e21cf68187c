use super::availability::{AvailabilityFetcher, BoardStatus};
use super::coordinator::{BookingCoordinator, BookingEvent};
use super::notice::{Notice, NoticeKind};
use super::selection::SelectionTracker;
use super::submitter::{PreconditionError, SubmitError};
use crate::http_handler::common::{AppointmentStatus, ConsultationType};
use crate::keychain::Keychain;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn consultation_types() -> Vec<ConsultationType> {
    serde_json::from_value(json!([
        {"id": 1, "name": "general", "description": "general practice visit"},
        {"id": 2, "name": "teleconsultation", "description": "remote video visit"},
    ]))
    .unwrap()
}

fn session(server: &MockServer) -> (Keychain, mpsc::Receiver<Notice>) {
    Keychain::new(&server.uri(), Some("test-token")).unwrap()
}

async fn mount_slots(server: &MockServer, doctor_id: u32, day: &str, slots: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/doctors/{doctor_id}/available-slots")))
        .and(query_param("date", day))
        .respond_with(ResponseTemplate::new(200).set_body_json(slots))
        .mount(server)
        .await;
}

#[test]
fn date_change_clears_time() {
    let tracker = SelectionTracker::new(date(2030, 5, 20));
    tracker.set_time("09:00".to_string());
    assert_eq!(tracker.snapshot().time(), Some("09:00"));

    assert!(tracker.set_date(date(2030, 5, 21)));
    assert_eq!(tracker.snapshot().time(), None);
    assert_eq!(tracker.snapshot().date(), date(2030, 5, 21));
}

#[test]
fn unchanged_date_keeps_time() {
    let tracker = SelectionTracker::new(date(2030, 5, 20));
    tracker.set_time("09:00".to_string());
    assert!(!tracker.set_date(date(2030, 5, 20)));
    assert_eq!(tracker.snapshot().time(), Some("09:00"));
}

#[test]
fn selection_updates_notify_subscribers_synchronously() {
    let tracker = SelectionTracker::new(date(2030, 5, 20));
    let mut rx = tracker.subscribe();
    assert!(!rx.has_changed().unwrap());

    tracker.set_consultation_type(2);
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().consultation_type_id(), Some(2));

    tracker.clear_time();
    assert!(rx.has_changed().unwrap());
}

#[tokio::test]
async fn slots_are_sorted_and_deduped() {
    let server = MockServer::start().await;
    mount_slots(
        &server,
        7,
        "2030-05-20",
        json!([
            {"value": "10:00", "label": "10h-11h"},
            {"value": "09:00", "label": "9h-10h"},
            {"value": "10:00", "label": "10h-11h"},
            {"value": "14:00", "label": "14h-15h"},
        ]),
    )
    .await;
    let (keychain, _notice_rx) = session(&server);

    keychain.availability().refresh(7, date(2030, 5, 20)).await.unwrap();

    let board = keychain.availability().board().await.unwrap();
    let values: Vec<&str> = board.slots().iter().map(|s| s.value()).collect();
    assert_eq!(values, vec!["09:00", "10:00", "14:00"]);
    assert_eq!(board.status(), BoardStatus::Fresh);
}

#[tokio::test]
async fn fetch_is_idempotent_and_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/7/available-slots"))
        .and(query_param("date", "2030-05-20"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"value": "09:00", "label": "9h-10h"},
        ])))
        .expect(2)
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    let avail = keychain.availability();

    avail.clone().refresh(7, date(2030, 5, 20)).await.unwrap();
    let first = avail.board().await.unwrap();
    avail.clone().refresh(7, date(2030, 5, 20)).await.unwrap();
    let second = avail.board().await.unwrap();

    assert_eq!(first.slots(), second.slots());
}

#[tokio::test]
async fn empty_slot_list_is_not_an_error() {
    let server = MockServer::start().await;
    let today = chrono::Local::now().date_naive();
    mount_slots(&server, 7, &today.format("%Y-%m-%d").to_string(), json!([])).await;
    let (keychain, mut notice_rx) = session(&server);

    keychain.availability().refresh(7, today).await.unwrap();

    let board = keychain.availability().board().await.unwrap();
    assert_eq!(board.status(), BoardStatus::Fresh);
    assert!(board.slots().is_empty());
    assert!(notice_rx.try_recv().is_err(), "fully booked must not raise a notice");
}

#[tokio::test]
async fn failed_fetch_is_empty_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/7/available-slots"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (keychain, mut notice_rx) = session(&server);

    keychain.availability().refresh(7, date(2030, 5, 20)).await.unwrap();

    let board = keychain.availability().board().await.unwrap();
    assert_eq!(board.status(), BoardStatus::Failed);
    assert!(board.slots().is_empty());
    assert!(!board.contains("09:00"));
    let notice = notice_rx.try_recv().unwrap();
    assert_eq!(notice.kind(), NoticeKind::Error);
}

#[tokio::test]
async fn stale_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/7/available-slots"))
        .and(query_param("date", "2030-05-20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"value": "09:00", "label": "9h-10h"}]))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    mount_slots(&server, 7, "2030-05-21", json!([{"value": "11:00", "label": "11h-12h"}])).await;
    let (keychain, _notice_rx) = session(&server);
    let avail = keychain.availability();

    // The fetch for the first date resolves after the second one; its response
    // must not overwrite the newer board.
    let slow = avail.clone().refresh(7, date(2030, 5, 20));
    let fast = avail.clone().refresh(7, date(2030, 5, 21));
    fast.await.unwrap();
    slow.await.unwrap();

    let board = avail.board().await.unwrap();
    assert_eq!(board.date(), date(2030, 5, 21));
    let values: Vec<&str> = board.slots().iter().map(|s| s.value()).collect();
    assert_eq!(values, vec!["11:00"]);
    assert!(!avail.is_loading());
}

#[tokio::test]
async fn submit_without_time_makes_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    keychain.selection().set_consultation_type(2);

    let selection = keychain.selection().snapshot();
    let result = keychain.submitter().submit(&selection, 7, &consultation_types()).await;

    let err = result.unwrap_err();
    assert_eq!(err, SubmitError::Precondition(PreconditionError::NoTimeSelected));
    assert_eq!(err.to_string(), "select a time slot");
}

#[tokio::test]
async fn submit_without_credential_fails_fast() {
    let server = MockServer::start().await;
    let (keychain, _notice_rx) = Keychain::new(&server.uri(), None).unwrap();
    keychain.selection().set_time("09:00".to_string());
    keychain.selection().set_consultation_type(2);

    let selection = keychain.selection().snapshot();
    let result = keychain.submitter().submit(&selection, 7, &consultation_types()).await;

    assert_eq!(
        result.unwrap_err(),
        SubmitError::Precondition(PreconditionError::NotAuthenticated)
    );
}

#[tokio::test]
async fn submit_checks_consultation_type_against_reference_list() {
    let server = MockServer::start().await;
    let (keychain, _notice_rx) = session(&server);
    keychain.selection().set_time("09:00".to_string());

    let selection = keychain.selection().snapshot();
    let submitter = keychain.submitter();
    assert_eq!(
        submitter.submit(&selection, 7, &consultation_types()).await.unwrap_err(),
        SubmitError::Precondition(PreconditionError::NoConsultationType)
    );

    keychain.selection().set_consultation_type(99);
    let selection = keychain.selection().snapshot();
    assert_eq!(
        submitter.submit(&selection, 7, &consultation_types()).await.unwrap_err(),
        SubmitError::Precondition(PreconditionError::UnknownConsultationType(99))
    );
}

#[tokio::test]
async fn booking_round_trip_clears_time_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/7/available-slots"))
        .and(query_param("date", "2030-03-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"value": "09:00", "label": "9h-10h"},
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_slots(&server, 7, "2030-03-10", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(body_json(json!({
            "doctor_id": 7,
            "appointment_date": "2030-03-10",
            "appointment_time": "09:00",
            "consultation_type_id": 2,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 41,
            "doctor_id": 7,
            "appointment_date": "2030-03-10",
            "appointment_time": "09:00",
            "consultation_type_id": 2,
            "status": "pending",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    let avail = keychain.availability();

    keychain.selection().set_date(date(2030, 3, 10));
    avail.clone().refresh(7, date(2030, 3, 10)).await.unwrap();
    let board = avail.board().await.unwrap();
    assert!(board.contains("09:00"));

    keychain.selection().set_time("09:00".to_string());
    keychain.selection().set_consultation_type(2);
    let selection = keychain.selection().snapshot();
    let appt =
        keychain.submitter().submit(&selection, 7, &consultation_types()).await.unwrap();
    assert_eq!(appt.id(), 41);
    assert_eq!(appt.status(), AppointmentStatus::Pending);

    // The coordinator's post-success duties: force a re-pick and re-fetch.
    keychain.selection().clear_time();
    avail.clone().refresh(7, date(2030, 3, 10)).await.unwrap();
    assert_eq!(keychain.selection().snapshot().time(), None);
    assert!(avail.board().await.unwrap().slots().is_empty());
}

#[tokio::test]
async fn validation_error_message_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": {"appointment_time": ["slot taken"]},
        })))
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    keychain.selection().set_time("09:00".to_string());
    keychain.selection().set_consultation_type(2);

    let selection = keychain.selection().snapshot();
    let result = keychain.submitter().submit(&selection, 7, &consultation_types()).await;

    assert_eq!(result.unwrap_err(), SubmitError::Validation("slot taken".to_string()));
}

#[tokio::test]
async fn second_submit_is_rejected_while_first_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({
                    "id": 41,
                    "doctor_id": 7,
                    "appointment_date": "2030-03-10",
                    "appointment_time": "09:00",
                    "consultation_type_id": 2,
                    "status": "pending",
                }))
                .set_delay(Duration::from_millis(250)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    keychain.selection().set_date(date(2030, 3, 10));
    keychain.selection().set_time("09:00".to_string());
    keychain.selection().set_consultation_type(2);

    let submitter = keychain.submitter();
    let first = {
        let submitter = Arc::clone(&submitter);
        let selection = keychain.selection().snapshot();
        let types = consultation_types();
        tokio::spawn(async move { submitter.submit(&selection, 7, &types).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(submitter.is_in_flight());

    let selection = keychain.selection().snapshot();
    let second = submitter.submit(&selection, 7, &consultation_types()).await;
    assert_eq!(second.unwrap_err(), SubmitError::AlreadyInFlight);

    assert!(first.await.unwrap().is_ok());
    assert!(!submitter.is_in_flight());
}

#[tokio::test]
async fn coordinator_rejects_time_outside_current_slot_set() {
    let server = MockServer::start().await;
    mount_slots(&server, 7, "2030-05-20", json!([{"value": "09:00", "label": "9h-10h"}])).await;
    let (keychain, mut notice_rx) = session(&server);
    keychain.selection().set_date(date(2030, 5, 20));
    keychain.availability().refresh(7, date(2030, 5, 20)).await.unwrap();
    let (_tx, event_rx) = mpsc::channel(4);
    let mut coordinator = BookingCoordinator::new(keychain.clone(), 7, event_rx);

    coordinator.handle_event(BookingEvent::SetTime("10:00".to_string())).await;
    assert_eq!(keychain.selection().snapshot().time(), None);
    assert_eq!(notice_rx.try_recv().unwrap().kind(), NoticeKind::Warning);

    coordinator.handle_event(BookingEvent::SetTime("09:00".to_string())).await;
    assert_eq!(keychain.selection().snapshot().time(), Some("09:00"));
}

#[tokio::test]
async fn doctor_change_clears_time_and_invalidates_the_board() {
    let server = MockServer::start().await;
    mount_slots(&server, 7, "2030-05-20", json!([{"value": "09:00", "label": "9h-10h"}])).await;
    mount_slots(&server, 8, "2030-05-20", json!([{"value": "11:00", "label": "11h-12h"}])).await;
    let (keychain, mut notice_rx) = session(&server);
    keychain.selection().set_date(date(2030, 5, 20));
    keychain.availability().refresh(7, date(2030, 5, 20)).await.unwrap();
    let (_tx, event_rx) = mpsc::channel(4);
    let mut coordinator = BookingCoordinator::new(keychain.clone(), 7, event_rx);

    coordinator.handle_event(BookingEvent::SetTime("09:00".to_string())).await;
    assert_eq!(keychain.selection().snapshot().time(), Some("09:00"));

    coordinator.handle_event(BookingEvent::SetDoctor(8)).await;
    assert_eq!(
        keychain.selection().snapshot().time(),
        None,
        "a time picked from the old doctor's board must not survive"
    );

    // The old doctor's slots are never selectable again, whether the new
    // board is already in or the fetch is still pending.
    coordinator.handle_event(BookingEvent::SetTime("09:00".to_string())).await;
    assert_eq!(keychain.selection().snapshot().time(), None);
    assert_eq!(notice_rx.try_recv().unwrap().kind(), NoticeKind::Warning);
}

#[tokio::test]
async fn superseded_fetch_does_not_clear_the_loading_flag() {
    let server = MockServer::start().await;
    mount_slots(&server, 7, "2030-05-20", json!([{"value": "09:00", "label": "9h-10h"}])).await;
    Mock::given(method("GET"))
        .and(path("/doctors/7/available-slots"))
        .and(query_param("date", "2030-05-21"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"value": "11:00", "label": "11h-12h"}]))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    let avail = keychain.availability();

    // The older request resolves while the newer one is still in flight; only
    // the owner of the latest sequence may clear the flag.
    let old = avail.clone().refresh(7, date(2030, 5, 20));
    let new = avail.clone().refresh(7, date(2030, 5, 21));
    old.await.unwrap();
    assert!(avail.is_loading(), "the flag belongs to the newer request");
    new.await.unwrap();
    assert!(!avail.is_loading());
    assert_eq!(avail.board().await.unwrap().date(), date(2030, 5, 21));
}

#[tokio::test]
async fn coordinator_rejects_past_dates() {
    let server = MockServer::start().await;
    let (keychain, mut notice_rx) = session(&server);
    let initial = keychain.selection().snapshot().date();
    let (_tx, event_rx) = mpsc::channel(4);
    let mut coordinator = BookingCoordinator::new(keychain.clone(), 7, event_rx);

    let yesterday = chrono::Local::now().date_naive() - chrono::Days::new(1);
    coordinator.handle_event(BookingEvent::SetDate(yesterday)).await;

    assert_eq!(keychain.selection().snapshot().date(), initial);
    assert_eq!(notice_rx.try_recv().unwrap().kind(), NoticeKind::Warning);
}

#[tokio::test]
async fn coordinator_loads_consultation_types_once_asked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consultation-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "general", "description": "general practice visit"},
            {"id": 4, "name": "checkup", "description": "yearly checkup"},
        ])))
        .mount(&server)
        .await;
    let (keychain, _notice_rx) = session(&server);
    let (_tx, event_rx) = mpsc::channel(4);
    let mut coordinator = BookingCoordinator::new(keychain.clone(), 7, event_rx);

    coordinator.handle_event(BookingEvent::ShowTypes).await;
    assert_eq!(coordinator.consultation_types().len(), 2);

    coordinator.handle_event(BookingEvent::SetConsultationType(4)).await;
    assert_eq!(keychain.selection().snapshot().consultation_type_id(), Some(4));
}

#[tokio::test]
async fn availability_fetcher_can_be_built_standalone() {
    let server = MockServer::start().await;
    mount_slots(&server, 3, "2030-05-20", json!([{"value": "08:30", "label": "8h30-9h"}])).await;
    let client =
        Arc::new(crate::http_handler::http_client::HTTPClient::new(&server.uri(), None).unwrap());
    let (notice_tx, _notice_rx) = mpsc::channel(4);
    let fetcher = Arc::new(AvailabilityFetcher::new(client, notice_tx));

    assert!(fetcher.board().await.is_none());
    fetcher.clone().refresh(3, date(2030, 5, 20)).await.unwrap();
    assert_eq!(fetcher.board().await.unwrap().doctor_id(), 3);
}
