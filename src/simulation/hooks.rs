//! Notifications sent to the rendering side
//!
//! All callbacks are fire-and-forget; the scheduler never reads anything back.

use crate::core::types::ActivityKind;
use crate::world::location::Location;

/// Receiver for scene side effects
pub trait SceneHooks {
    fn show_activity_indicator(&mut self, _location: &Location, _activity: ActivityKind) {}

    fn hide_activity_indicator(&mut self) {}

    /// Called with the visible part of a phrase each time more of it is typed
    fn show_speech(&mut self, _text: &str) {}

    fn hide_speech(&mut self) {}
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SceneHooks for NoopHooks {}

/// Forwards notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHooks;

impl SceneHooks for LogHooks {
    fn show_activity_indicator(&mut self, location: &Location, activity: ActivityKind) {
        tracing::info!("{} at {}", activity, location.kind().as_str());
    }

    fn hide_activity_indicator(&mut self) {
        tracing::debug!("activity indicator hidden");
    }

    fn show_speech(&mut self, text: &str) {
        tracing::trace!("speech: {}", text);
    }

    fn hide_speech(&mut self) {
        tracing::debug!("speech hidden");
    }
}

/// A recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    ShowIndicator(Location, ActivityKind),
    HideIndicator,
    ShowSpeech(String),
    HideSpeech,
}

/// Keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    pub events: Vec<SceneEvent>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&SceneEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn last(&self) -> Option<&SceneEvent> {
        self.events.last()
    }
}

impl SceneHooks for RecordingHooks {
    fn show_activity_indicator(&mut self, location: &Location, activity: ActivityKind) {
        self.events.push(SceneEvent::ShowIndicator(*location, activity));
    }

    fn hide_activity_indicator(&mut self) {
        self.events.push(SceneEvent::HideIndicator);
    }

    fn show_speech(&mut self, text: &str) {
        self.events.push(SceneEvent::ShowSpeech(text.to_string()));
    }

    fn hide_speech(&mut self) {
        self.events.push(SceneEvent::HideSpeech);
    }
}

impl<H: SceneHooks + ?Sized> SceneHooks for &mut H {
    fn show_activity_indicator(&mut self, location: &Location, activity: ActivityKind) {
        (**self).show_activity_indicator(location, activity);
    }

    fn hide_activity_indicator(&mut self) {
        (**self).hide_activity_indicator();
    }

    fn show_speech(&mut self, text: &str) {
        (**self).show_speech(text);
    }

    fn hide_speech(&mut self) {
        (**self).hide_speech();
    }
}
