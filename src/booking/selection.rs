use chrono::NaiveDate;
use tokio::sync::watch;

/// The user's in-progress, unsubmitted booking choice.
///
/// Owned exclusively by one session; mutated only through the
/// [`SelectionTracker`] so the date/time coupling invariant cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    date: NaiveDate,
    time: Option<String>,
    consultation_type_id: Option<u32>,
}

impl Selection {
    fn new(date: NaiveDate) -> Self {
        Self { date, time: None, consultation_type_id: None }
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn time(&self) -> Option<&str> { self.time.as_deref() }
    pub fn consultation_type_id(&self) -> Option<u32> { self.consultation_type_id }
}

/// Holds the mutable [`Selection`] behind a watch channel whose `send_modify`
/// family notifies all subscribers synchronously with each update.
pub struct SelectionTracker {
    tx: watch::Sender<Selection>,
}

impl SelectionTracker {
    pub fn new(date: NaiveDate) -> Self {
        Self { tx: watch::Sender::new(Selection::new(date)) }
    }

    /// Subscribers see every update; the coordinator uses this as the
    /// submit-button-enablement seam.
    pub fn subscribe(&self) -> watch::Receiver<Selection> { self.tx.subscribe() }

    pub fn snapshot(&self) -> Selection { self.tx.borrow().clone() }

    /// Sets the date and reports whether it actually changed. A change
    /// atomically clears `time`: a slot picked for a previous date must never
    /// survive a date change.
    pub fn set_date(&self, date: NaiveDate) -> bool {
        self.tx.send_if_modified(|sel| {
            if sel.date == date {
                return false;
            }
            sel.date = date;
            sel.time = None;
            true
        })
    }

    /// Membership of `time` in the current slot set is checked by the caller
    /// against the most recently published board, not here.
    pub fn set_time(&self, time: String) {
        self.tx.send_modify(|sel| sel.time = Some(time));
    }

    pub fn clear_time(&self) {
        self.tx.send_modify(|sel| sel.time = None);
    }

    pub fn set_consultation_type(&self, id: u32) {
        self.tx.send_modify(|sel| sel.consultation_type_id = Some(id));
    }
}
