use crate::booking::availability::AvailabilityFetcher;
use crate::booking::notice::Notice;
use crate::booking::selection::SelectionTracker;
use crate::booking::submitter::BookingSubmitter;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::request_common::RequestError;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver};

/// Struct representing the key components of a booking session, providing
/// access to the HTTP client, the availability fetcher, the booking submitter,
/// and the selection tracker.
///
/// One `Keychain` is created at login (with the bearer credential of that
/// session) and dropped at logout; subsystems receive it by injection instead
/// of reaching for ambient global state.
#[derive(Clone)]
pub struct Keychain {
    /// The HTTP client for performing network requests.
    client: Arc<HTTPClient>,
    /// The fetcher publishing the current slot board.
    availability: Arc<AvailabilityFetcher>,
    /// The submitter guarding and sending appointment creations.
    submitter: Arc<BookingSubmitter>,
    /// The tracker owning the in-progress selection.
    selection: Arc<SelectionTracker>,
    /// Side channel for transient user-visible notices.
    notice_tx: mpsc::Sender<Notice>,
}

impl Keychain {
    /// Creates a new session keychain.
    ///
    /// # Arguments
    /// - `url`: The base URL of the clinic API.
    /// - `token`: The bearer credential obtained at login, if any.
    ///
    /// # Returns
    /// The keychain plus the receiving end of the notice channel.
    ///
    /// # Errors
    /// `RequestError` if the HTTP client cannot be constructed from the
    /// credential.
    pub fn new(url: &str, token: Option<&str>) -> Result<(Self, Receiver<Notice>), RequestError> {
        let client = Arc::new(HTTPClient::new(url, token)?);
        let (notice_tx, notice_rx) = mpsc::channel(32);
        let availability =
            Arc::new(AvailabilityFetcher::new(Arc::clone(&client), notice_tx.clone()));
        let submitter = Arc::new(BookingSubmitter::new(Arc::clone(&client)));
        let selection = Arc::new(SelectionTracker::new(chrono::Local::now().date_naive()));
        Ok((Self { client, availability, submitter, selection, notice_tx }, notice_rx))
    }

    /// Provides a cloned reference to the HTTP client.
    pub fn client(&self) -> Arc<HTTPClient> { Arc::clone(&self.client) }

    /// Provides a cloned reference to the availability fetcher.
    pub fn availability(&self) -> Arc<AvailabilityFetcher> { Arc::clone(&self.availability) }

    /// Provides a cloned reference to the booking submitter.
    pub fn submitter(&self) -> Arc<BookingSubmitter> { Arc::clone(&self.submitter) }

    /// Provides a cloned reference to the selection tracker.
    pub fn selection(&self) -> Arc<SelectionTracker> { Arc::clone(&self.selection) }

    /// Provides a sender for the notice side channel.
    pub fn notice_tx(&self) -> mpsc::Sender<Notice> { self.notice_tx.clone() }
}
