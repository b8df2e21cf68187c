use super::notice::Notice;
use crate::event;
use crate::http_handler::common::Slot;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::available_slots_get::AvailableSlotsRequest;
use crate::http_handler::http_request::request_common::NoBodyHTTPRequestType;
use chrono::NaiveDate;
use itertools::Itertools;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;

/// Freshness of a published slot list. `Failed` keeps "could not check"
/// distinguishable from a legitimately fully booked day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardStatus {
    Fresh,
    Failed,
}

/// The most recently published slot list together with the (doctor, date) pair
/// it belongs to.
#[derive(Debug, Clone)]
pub struct SlotBoard {
    doctor_id: u32,
    date: NaiveDate,
    slots: Vec<Slot>,
    status: BoardStatus,
}

impl SlotBoard {
    pub fn doctor_id(&self) -> u32 { self.doctor_id }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn slots(&self) -> &[Slot] { &self.slots }
    pub fn status(&self) -> BoardStatus { self.status }

    /// Whether `time` may be selected: only members of a successfully fetched
    /// slot set qualify.
    pub fn contains(&self, time: &str) -> bool {
        self.status == BoardStatus::Fresh && self.slots.iter().any(|s| s.value() == time)
    }
}

/// Retrieves open time slots for a chosen doctor and date.
///
/// Every `refresh` claims the next value of a monotonic sequence counter
/// before the request leaves, so refresh call order defines which request is
/// newest. A response only gets published while its claimed sequence is still
/// the latest; superseded responses are discarded regardless of arrival order.
pub struct AvailabilityFetcher {
    client: Arc<HTTPClient>,
    board: RwLock<Option<SlotBoard>>,
    fetch_seq: AtomicU64,
    loading: AtomicBool,
    notice_tx: mpsc::Sender<Notice>,
}

impl AvailabilityFetcher {
    pub fn new(client: Arc<HTTPClient>, notice_tx: mpsc::Sender<Notice>) -> Self {
        Self {
            client,
            board: RwLock::new(None),
            fetch_seq: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            notice_tx,
        }
    }

    /// While `true`, a request is in flight and consumers must suppress any
    /// "no slots" messaging.
    pub fn is_loading(&self) -> bool { self.loading.load(Ordering::SeqCst) }

    /// `None` until the first fetch has resolved.
    pub async fn board(&self) -> Option<SlotBoard> { self.board.read().await.clone() }

    /// Starts a fetch for `(doctor_id, date)` without blocking the caller.
    /// The returned handle is only awaited by tests; the coordinator drops it.
    pub fn refresh(self: Arc<Self>, doctor_id: u32, date: NaiveDate) -> JoinHandle<()> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);
        tokio::spawn(async move { self.run_fetch(seq, doctor_id, date).await })
    }

    async fn run_fetch(&self, seq: u64, doctor_id: u32, date: NaiveDate) {
        let result = AvailableSlotsRequest::new(doctor_id, date).send_request(&self.client).await;
        let mut board = self.board.write().await;
        // Stale check and publication happen under the same lock, otherwise a
        // superseded response could slip in between them.
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            event!("Discarding stale slot response for doctor {doctor_id} on {date}");
            return;
        }
        match result {
            Ok(response) => {
                *board = Some(SlotBoard {
                    doctor_id,
                    date,
                    slots: Self::normalize(response.into_slots()),
                    status: BoardStatus::Fresh,
                });
            }
            Err(err) => {
                event!("Slot fetch for doctor {doctor_id} on {date} failed: {err}");
                *board =
                    Some(SlotBoard { doctor_id, date, slots: Vec::new(), status: BoardStatus::Failed });
                let _ = self
                    .notice_tx
                    .try_send(Notice::error("could not check availability, please retry"));
            }
        }
        // A newer refresh may have claimed the next sequence since the check
        // above; the loading flag then belongs to that request, not this one.
        if self.fetch_seq.load(Ordering::SeqCst) == seq {
            self.loading.store(false, Ordering::SeqCst);
        }
    }

    /// Ascending by time of day, unique by value. Zero-padded 24h values sort
    /// lexicographically in time order.
    fn normalize(slots: Vec<Slot>) -> Vec<Slot> {
        slots
            .into_iter()
            .sorted_by(|a, b| a.value().cmp(b.value()))
            .dedup_by(|a, b| a.value() == b.value())
            .collect()
    }
}
