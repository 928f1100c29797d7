//! Abschluss-Signal einer Plot-Definition.
//!
//! `operate()` liefert sofort eine `PlotSession`. Deren `completion` ist ein
//! eigenes Future, das erst beim Übergang nach Committed, Discarded oder
//! Cancelled auflöst.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

use crate::core::PlotId;

/// Endzustand einer Definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// Form wurde übernommen
    Committed(PlotId),
    /// Form war unvollständig und wurde verworfen
    Discarded(PlotId),
    /// Definition wurde abgebrochen
    Cancelled(PlotId),
}

impl PlotOutcome {
    /// Betroffener Plot.
    pub fn plot(&self) -> PlotId {
        match self {
            PlotOutcome::Committed(id) | PlotOutcome::Discarded(id) | PlotOutcome::Cancelled(id) => {
                *id
            }
        }
    }

    /// Wurde die Form übernommen?
    pub fn is_committed(&self) -> bool {
        matches!(self, PlotOutcome::Committed(_))
    }
}

/// Future auf den Endzustand. Klonbar, alle Klone sehen dasselbe Ergebnis.
///
/// Ein ohne Ergebnis gedroppter Sender gilt als abgebrochene Definition.
#[derive(Clone)]
pub struct PlotCompletion {
    plot: PlotId,
    shared: Shared<oneshot::Receiver<PlotOutcome>>,
}

impl PlotCompletion {
    /// Endzustand, falls schon erreicht.
    pub fn outcome(&self) -> Option<PlotOutcome> {
        if let Some(result) = self.shared.peek() {
            return Some(self.settled(result.clone()));
        }
        self.shared
            .clone()
            .now_or_never()
            .map(|result| self.settled(result))
    }

    /// Schon aufgelöst?
    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }

    fn settled(&self, result: Result<PlotOutcome, oneshot::Canceled>) -> PlotOutcome {
        result.unwrap_or(PlotOutcome::Cancelled(self.plot))
    }
}

impl fmt::Debug for PlotCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotCompletion")
            .field("plot", &self.plot)
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl Future for PlotCompletion {
    type Output = PlotOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<PlotOutcome> {
        let plot = self.plot;
        self.shared
            .poll_unpin(cx)
            .map(|result| result.unwrap_or(PlotOutcome::Cancelled(plot)))
    }
}

/// Auflöse-Seite. Wird sie ohne Ergebnis gedroppt, gilt die Definition als abgebrochen.
#[derive(Debug)]
pub(crate) struct CompletionSender {
    sender: oneshot::Sender<PlotOutcome>,
}

impl CompletionSender {
    /// Erstellt Sender und Future für einen Plot.
    pub(crate) fn channel(plot: PlotId) -> (Self, PlotCompletion) {
        let (sender, receiver) = oneshot::channel();
        (
            Self { sender },
            PlotCompletion {
                plot,
                shared: receiver.shared(),
            },
        )
    }

    /// Löst auf. Der Sender wird dabei verbraucht, es gibt nur ein Ergebnis.
    pub(crate) fn resolve(self, outcome: PlotOutcome) {
        if self.sender.send(outcome).is_err() {
            log::debug!("{}: Completion ohne Empfänger", outcome.plot());
        }
    }
}

/// Ergebnis von `operate()`: sofort verfügbarer Handle plus Abschluss-Future.
#[derive(Debug, Clone)]
pub struct PlotSession {
    /// Der bearbeitete Plot
    pub plot: PlotId,
    /// Löst beim Endzustand der Definition auf
    pub completion: PlotCompletion,
}
