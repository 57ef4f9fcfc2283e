use flipbook_core::{
    DocumentInput, DocumentLoader, DocumentSource, Flipbook, FlipbookOptions, Outcome,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{ChannelPresenter, FlipbookCommand, FlipbookUpdate};

type Session<L> = Flipbook<<L as DocumentLoader>::Source, ChannelPresenter>;

/// Async worker task that owns the open flipbook, processes commands and
/// sends updates. Page turns complete when their timer fires, independently
/// of incoming commands.
pub async fn worker_task<L: DocumentLoader>(
    loader: L,
    mut command_rx: mpsc::UnboundedReceiver<FlipbookCommand>,
    update_tx: mpsc::UnboundedSender<FlipbookUpdate>,
) {
    let mut session: Option<Session<L>> = None;

    loop {
        let deadline = session.as_ref().and_then(|book| book.transition_deadline());

        tokio::select! {
            biased;

            _ = wait_until(deadline) => {
                if let Some(book) = session.as_mut() {
                    if let Err(e) = book.complete_transition().await {
                        log::error!("Failed to finish page turn: {}", e);
                        let _ = update_tx.send(FlipbookUpdate::Error {
                            message: e.to_string(),
                        });
                    }
                }
            }
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                process_command(cmd, &loader, &mut session, &update_tx).await;
            }
        }
    }

    log::debug!("Flipbook worker stopped");
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn process_command<L: DocumentLoader>(
    cmd: FlipbookCommand,
    loader: &L,
    session: &mut Option<Session<L>>,
    update_tx: &mpsc::UnboundedSender<FlipbookUpdate>,
) {
    match cmd {
        FlipbookCommand::Open { input, options } => {
            close_session(session, update_tx);
            *session = handle_open(loader, input, options, update_tx).await;
        }
        FlipbookCommand::Input(intent) => {
            let Some(book) = session.as_mut() else {
                log::debug!("Ignoring {:?}: no document open", intent);
                return;
            };
            match book.dispatch(intent).await {
                Ok(Outcome::CloseRequested) => close_session(session, update_tx),
                Ok(outcome) => log::debug!("{:?} -> {:?}", intent, outcome),
                Err(e) => {
                    log::error!("{:?} failed: {}", intent, e);
                    let _ = update_tx.send(FlipbookUpdate::Error {
                        message: e.to_string(),
                    });
                }
            }
        }
        FlipbookCommand::Close => close_session(session, update_tx),
    }
}

async fn handle_open<L: DocumentLoader>(
    loader: &L,
    input: DocumentInput,
    options: FlipbookOptions,
    update_tx: &mpsc::UnboundedSender<FlipbookUpdate>,
) -> Option<Session<L>> {
    let description = input.describe();
    log::info!("Opening {}", description);

    let opened = match loader.load(input).await {
        Ok(source) => {
            Flipbook::open(source, ChannelPresenter::new(update_tx.clone()), options).await
        }
        Err(e) => Err(e),
    };

    match opened {
        Ok(book) => {
            // The first view was already published while opening
            let _ = update_tx.send(FlipbookUpdate::Opened {
                total_pages: book.state().total_pages(),
                thumbnails: book.thumbnails().to_vec(),
            });
            Some(book)
        }
        Err(e) => {
            log::error!("Could not open {}: {}", description, e);
            let _ = update_tx.send(FlipbookUpdate::Error {
                message: e.to_string(),
            });
            None
        }
    }
}

fn close_session<S: DocumentSource>(
    session: &mut Option<Flipbook<S, ChannelPresenter>>,
    update_tx: &mpsc::UnboundedSender<FlipbookUpdate>,
) {
    if session.take().is_some() {
        log::info!("Closed document");
        let _ = update_tx.send(FlipbookUpdate::Closed);
    }
}
