use serde::{Deserialize, Serialize};

use crate::core::FoundData;

/// Signal sent to the tooltip owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum TooltipEvent {
    #[serde(rename = "showTooltip")]
    Show(FoundData),
    /// Carries the selection that was showing.
    #[serde(rename = "hideTooltip")]
    Hide(FoundData),
}

impl TooltipEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "showTooltip",
            Self::Hide(_) => "hideTooltip",
        }
    }

    #[must_use]
    pub fn data(&self) -> FoundData {
        match *self {
            Self::Show(data) | Self::Hide(data) => data,
        }
    }
}

/// Receiver for tooltip show/hide signals.
pub trait TooltipSink {
    fn emit(&mut self, event: TooltipEvent);
}

impl<F> TooltipSink for F
where
    F: FnMut(TooltipEvent),
{
    fn emit(&mut self, event: TooltipEvent) {
        self(event);
    }
}

/// Sink that keeps every event in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipRecorder {
    events: Vec<TooltipEvent>,
}

impl TooltipRecorder {
    #[must_use]
    pub fn events(&self) -> &[TooltipEvent] {
        &self.events
    }

    #[must_use]
    pub fn last(&self) -> Option<&TooltipEvent> {
        self.events.last()
    }

    /// Drains recorded events.
    pub fn take(&mut self) -> Vec<TooltipEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TooltipSink for TooltipRecorder {
    fn emit(&mut self, event: TooltipEvent) {
        self.events.push(event);
    }
}
