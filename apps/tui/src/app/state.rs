use std::sync::Arc;
use std::time::{Duration, Instant};

use throbber_widgets_tui::ThrobberState;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{error, info};

use fuel_story::data::{self, DataError, DataSource, LoadReport};
use fuel_story::story::SlideController;

const THROBBER_STEP: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(SlideController),
    Failed(String),
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub source: DataSource,
    pub load_state: LoadState,
    pub throbber: ThrobberState,
    /// Mark currently under the pointer, for telling hover enter from move.
    pub hovered: Option<usize>,
    loader: Option<oneshot::Receiver<Result<LoadReport, DataError>>>,
    last_tick: Instant,
}

impl App {
    pub fn new(source: DataSource) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            load_state: LoadState::Loading,
            throbber: ThrobberState::default(),
            hovered: None,
            loader: None,
            last_tick: Instant::now(),
        }
    }

    /// Fetches the dataset in the background. The presentation starts once
    /// [`App::update`] sees the result.
    pub fn start_loading(&mut self) {
        let (tx, rx) = oneshot::channel();
        let source = self.source.clone();
        tokio::spawn(async move {
            let result = data::load(&source).await;
            let _ = tx.send(result);
        });
        self.loader = Some(rx);
        self.load_state = LoadState::Loading;
    }

    pub fn controller(&self) -> Option<&SlideController> {
        match &self.load_state {
            LoadState::Ready(controller) => Some(controller),
            _ => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut SlideController> {
        match &mut self.load_state {
            LoadState::Ready(controller) => Some(controller),
            _ => None,
        }
    }

    pub fn update(&mut self) {
        if self.last_tick.elapsed() >= THROBBER_STEP {
            self.throbber.calc_next();
            self.last_tick = Instant::now();
        }
        self.poll_loader();
    }

    fn poll_loader(&mut self) {
        let Some(receiver) = self.loader.as_mut() else {
            return;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                self.loader = None;
                self.load_state = LoadState::Failed("dataset loader stopped unexpectedly".into());
                return;
            }
        };
        self.loader = None;

        match outcome {
            Ok(report) => {
                info!(
                    records = report.records.len(),
                    skipped = report.skipped.len(),
                    "starting presentation"
                );
                let mut controller = SlideController::new(Arc::from(report.records));
                controller.start();
                self.load_state = LoadState::Ready(controller);
            }
            Err(err) => {
                error!(%err, source = %self.source, "dataset could not be loaded");
                self.load_state = LoadState::Failed(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_waiting_on(rx: oneshot::Receiver<Result<LoadReport, DataError>>) -> App {
        let mut app = App::new(DataSource::default());
        app.loader = Some(rx);
        app
    }

    #[test]
    fn loading_holds_until_the_loader_answers() {
        let (_tx, rx) = oneshot::channel();
        let mut app = app_waiting_on(rx);

        app.update();
        assert!(matches!(app.load_state, LoadState::Loading));
        assert!(app.loader.is_some());
    }

    #[test]
    fn failed_load_shows_the_error_and_never_starts() {
        let (tx, rx) = oneshot::channel();
        let mut app = app_waiting_on(rx);
        let _ = tx.send(Err(DataError::Empty));

        app.update();
        assert!(
            matches!(&app.load_state, LoadState::Failed(message) if *message == DataError::Empty.to_string())
        );
        assert!(app.controller().is_none());
        assert!(app.loader.is_none());
    }

    #[test]
    fn dropped_loader_is_a_failure() {
        let (tx, rx) = oneshot::channel();
        let mut app = app_waiting_on(rx);
        drop(tx);

        app.update();
        assert!(
            matches!(&app.load_state, LoadState::Failed(message) if message.contains("stopped unexpectedly"))
        );
        assert!(app.controller().is_none());
    }
}
