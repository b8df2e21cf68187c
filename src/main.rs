#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod booking;
mod console_communication;
mod http_handler;
mod keychain;
mod logger;

use crate::booking::coordinator::BookingCoordinator;
use crate::booking::notice::NoticeKind;
use crate::console_communication::ConsoleEndpoint;
use crate::keychain::Keychain;
use std::env;
use tokio::sync::mpsc;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let base_url_var = env::var("CLINIC_BASE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:8000/api", |v| v.as_str());
    let token = env::var("CLINIC_API_TOKEN").ok();
    let doctor_id = env::var("CLINIC_DOCTOR_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(1);

    let (keychain, mut notice_rx) = Keychain::new(base_url, token.as_deref())
        .unwrap_or_else(|e| fatal!("Could not create session: {e}"));

    tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            match notice.kind() {
                NoticeKind::Info => info!("{}", notice.message()),
                NoticeKind::Warning => warn!("{}", notice.message()),
                NoticeKind::Error => error!("{}", notice.message()),
            }
        }
    });

    let (event_tx, event_rx) = mpsc::channel(16);
    ConsoleEndpoint::start(event_tx);

    info!("clinibook connected to {base_url}, doctor {doctor_id}");
    if token.is_none() {
        warn!("No CLINIC_API_TOKEN set, booking will be rejected locally");
    }
    BookingCoordinator::new(keychain, doctor_id, event_rx).run().await;
    info!("Session closed");
}
