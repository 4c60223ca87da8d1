//! The weather display component: fetch once on mount, then render either a
//! placeholder or the reading.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    model::{DisplayState, SAN_FRANCISCO, WeatherReading},
    provider::WeatherProvider,
    view::{self, Element},
};

pub const LOADING_TEXT: &str = "Loading...";

/// A mounted weather display.
///
/// Dropping the value unmounts it: the pending fetch is cancelled and a
/// response arriving afterwards is discarded.
#[derive(Debug)]
pub struct WeatherDisplay {
    state: watch::Receiver<DisplayState>,
    // Kept so teardown can cancel under the channel's write lock.
    writer: watch::Sender<DisplayState>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl WeatherDisplay {
    /// Mount the display and start its single fetch in the background.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn mount(provider: Arc<dyn WeatherProvider>) -> Self {
        let (tx, rx) = watch::channel(DisplayState::Loading);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(fetch_once(provider, tx.clone(), cancel.clone()));

        tracing::debug!("Weather display mounted");

        Self {
            state: rx,
            writer: tx,
            cancel,
            task: Some(task),
        }
    }

    pub fn state(&self) -> DisplayState {
        *self.state.borrow()
    }

    /// Receiver that observes the `Loading` -> `Loaded` transition.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.clone()
    }

    /// Render the current state. Never triggers a request.
    pub fn render(&self) -> Element {
        render(&self.state())
    }

    /// Render the current state as an HTML fragment.
    pub fn render_html(&self) -> askama::Result<String> {
        view::render_html(&SAN_FRANCISCO, LOADING_TEXT, &self.state())
    }

    /// Wait until the fetch has finished, whatever its outcome.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::error!("Weather fetch task did not complete: {err}");
            }
        }
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for WeatherDisplay {
    fn drop(&mut self) {
        // A reading published concurrently either lands before this or is refused.
        self.writer.send_if_modified(|_| {
            self.cancel.cancel();
            false
        });
        tracing::debug!("Weather display unmounted");
    }
}

pub fn render(state: &DisplayState) -> Element {
    match state.reading() {
        None => Element::Container(vec![Element::Text(LOADING_TEXT.into())]),
        Some(reading) => Element::Container(vec![
            Element::Heading(format!("Weather in {}", SAN_FRANCISCO.name)),
            Element::Paragraph(format!("Temperature: {}°C", reading.temperature)),
            Element::Paragraph(format!("Wind Speed: {} km/h", reading.windspeed)),
        ]),
    }
}

async fn fetch_once(
    provider: Arc<dyn WeatherProvider>,
    tx: watch::Sender<DisplayState>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Display unmounted before weather arrived, dropping request");
            return;
        }
        result = provider.current_weather(&SAN_FRANCISCO) => result,
    };

    match result {
        Ok(reading) => {
            if !publish_reading(&tx, &cancel, reading) {
                tracing::debug!("Display unmounted before weather arrived, discarding reading");
            }
        }
        Err(err) => {
            tracing::error!("Error fetching weather data: {err}");
        }
    }
}

/// Store the reading unless the display has been torn down. The check runs
/// under the channel's write lock, the same lock `Drop` cancels under.
fn publish_reading(
    tx: &watch::Sender<DisplayState>,
    cancel: &CancellationToken,
    reading: WeatherReading,
) -> bool {
    tx.send_if_modified(|state| {
        if cancel.is_cancelled() {
            return false;
        }
        *state = DisplayState::Loaded(reading);
        true
    })
}
