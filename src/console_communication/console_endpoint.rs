use super::console_command::{self, ConsoleCommand, HELP};
use crate::booking::coordinator::BookingEvent;
use crate::{log, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Reads user commands from stdin and forwards them to the coordinator, in
/// issue order. Stands in for the UI event source.
pub(crate) struct ConsoleEndpoint {}

impl ConsoleEndpoint {
    pub(crate) fn start(event_tx: Sender<BookingEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                match console_command::parse(line.trim()) {
                    Ok(Some(ConsoleCommand::Event(ev))) => {
                        let quit = ev == BookingEvent::Quit;
                        if event_tx.send(ev).await.is_err() || quit {
                            break;
                        }
                    }
                    Ok(Some(ConsoleCommand::Help)) => log!("{HELP}"),
                    Ok(None) => {}
                    Err(msg) => warn!("{msg}"),
                }
            }
        })
    }
}
