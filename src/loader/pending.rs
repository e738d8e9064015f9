//! Non-blocking fetch on a helper thread, completed on the caller's thread.

use std::sync::mpsc;

use super::{
    CurveFetcher, CurveLoader, LoadOutcome, Notifier, TransportError, Validity,
};
use crate::error::WCurveError;
use crate::scene::SceneContainer;

type FetchResult = Result<String, TransportError>;

/// A fetch in flight.
///
/// Only the blocking I/O runs on the helper thread. Parsing, building and
/// alerting happen in [`poll`](Self::poll), on whichever thread owns the
/// scene container, so each load yields its own outcome and loads never
/// race on shared state.
pub struct PendingLoad {
    url: String,
    result_rx: mpsc::Receiver<FetchResult>,
    outcome: Option<LoadOutcome>,
}

impl PendingLoad {
    /// Start fetching `url` on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::ThreadSpawn`] if the helper thread cannot be
    /// started.
    pub fn try_spawn<F>(
        fetcher: F,
        url: impl Into<String>,
    ) -> Result<Self, WCurveError>
    where
        F: CurveFetcher + Send + 'static,
    {
        let url = url.into();
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>();

        let thread_url = url.clone();
        let _ = std::thread::Builder::new()
            .name("curve-fetch".into())
            .spawn(move || {
                let _ = result_tx.send(fetcher.fetch(&thread_url));
            })
            .map_err(WCurveError::ThreadSpawn)?;

        log::debug!("fetch of {url} started");
        Ok(Self {
            url,
            result_rx,
            outcome: None,
        })
    }

    /// [`try_spawn`](Self::try_spawn) that never fails: if the thread
    /// cannot be started the load completes as a transport failure on the
    /// first poll.
    pub fn spawn<F>(fetcher: F, url: impl Into<String>) -> Self
    where
        F: CurveFetcher + Send + 'static,
    {
        let url = url.into();
        Self::try_spawn(fetcher, url.clone()).unwrap_or_else(|e| {
            log::error!("fetch of {url} not started: {e}");
            Self::failed(url, &e)
        })
    }

    /// A load that completes with `error` as its transport failure.
    fn failed(url: String, error: &WCurveError) -> Self {
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>();
        let _ = result_tx.send(Err(TransportError::new(
            "ThreadSpawnError",
            error.to_string(),
        )));
        Self {
            url,
            result_rx,
            outcome: None,
        }
    }

    /// The URL being loaded.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `Unknown` while in flight, then the final validity.
    #[must_use]
    pub fn validity(&self) -> Validity {
        self.outcome.map_or(Validity::Unknown, |o| o.validity)
    }

    /// Whether the load has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check for completion without blocking.
    ///
    /// Returns the outcome exactly once, on the poll that observes the
    /// finished fetch; `None` before and after.
    pub fn poll<N, C>(
        &mut self,
        loader: &CurveLoader<N>,
        container: &mut C,
    ) -> Option<LoadOutcome>
    where
        N: Notifier,
        C: SceneContainer + ?Sized,
    {
        if self.outcome.is_some() {
            return None;
        }

        let body = match self.result_rx.try_recv() {
            Ok(body) => body,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => Err(TransportError::new(
                "Disconnected",
                "fetch thread exited without a result",
            )),
        };

        let outcome = loader.complete(&self.url, body, container);
        self.outcome = Some(outcome);
        Some(outcome)
    }
}
