//! Network-idle detection
//!
//! A page is considered idle once no request has been in flight for a
//! quiescence window. Network events are subscribed *before* the page is
//! loaded so that requests issued during navigation are counted.

use std::collections::HashSet;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::stream::{self, BoxStream, Stream, StreamExt};

/// A single network lifecycle event, reduced to what idle tracking needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkActivity {
    Started(String),
    Finished(String),
}

/// Set of request ids currently in flight
#[derive(Debug, Default)]
pub struct InflightRequests {
    pending: HashSet<String>,
}

impl InflightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event. Returns true if the page just became idle.
    pub fn record(&mut self, activity: NetworkActivity) -> bool {
        match activity {
            // Redirects reuse the request id, so a set keeps the count honest
            NetworkActivity::Started(id) => {
                self.pending.insert(id);
                false
            }
            NetworkActivity::Finished(id) => self.pending.remove(&id) && self.pending.is_empty(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Merged stream of network activity for one page
pub struct NetworkIdle {
    activity: BoxStream<'static, NetworkActivity>,
    quiet_window: Duration,
}

impl NetworkIdle {
    /// Start listening for network events on `page`.
    pub async fn subscribe(page: &Page, quiet_window: Duration) -> Result<Self, CdpError> {
        let started = page
            .event_listener::<EventRequestWillBeSent>()
            .await?
            .map(|e| NetworkActivity::Started(e.request_id.inner().clone()));
        let finished = page
            .event_listener::<EventLoadingFinished>()
            .await?
            .map(|e| NetworkActivity::Finished(e.request_id.inner().clone()));
        let failed = page
            .event_listener::<EventLoadingFailed>()
            .await?
            .map(|e| NetworkActivity::Finished(e.request_id.inner().clone()));

        let activity = stream::select(started, stream::select(finished, failed)).boxed();
        Ok(Self::from_stream(activity, quiet_window))
    }

    pub fn from_stream<S>(activity: S, quiet_window: Duration) -> Self
    where
        S: Stream<Item = NetworkActivity> + Send + 'static,
    {
        Self {
            activity: activity.boxed(),
            quiet_window,
        }
    }

    /// Resolve once nothing has been in flight for the quiet window.
    ///
    /// There is no upper bound: a page that keeps issuing requests keeps this
    /// waiting. A closed event stream (page gone) ends the wait.
    pub async fn wait(mut self) {
        let mut inflight = InflightRequests::new();

        loop {
            if inflight.is_idle() {
                match tokio::time::timeout(self.quiet_window, self.activity.next()).await {
                    Err(_elapsed) => return,
                    Ok(Some(activity)) => {
                        inflight.record(activity);
                    }
                    Ok(None) => return,
                }
            } else {
                match self.activity.next().await {
                    Some(activity) => {
                        if inflight.record(activity) {
                            tracing::trace!("Network quiet, starting idle window");
                        } else {
                            tracing::trace!(inflight = inflight.len(), "Waiting for network");
                        }
                    }
                    None => return,
                }
            }
        }
    }
}
