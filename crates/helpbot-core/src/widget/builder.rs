//! Explicit widget construction.

use helpbot_types::config::WidgetConfig;

use super::Widget;
use crate::event::EventBus;
use crate::resolver::{AnswerResolver, BoxAnswerResolver};

/// Builder for [`Widget`].
///
/// ```
/// use helpbot_core::widget::Widget;
/// use helpbot_types::config::WidgetConfig;
///
/// let widget = Widget::builder(WidgetConfig::default()).build();
/// assert!(!widget.is_open());
/// ```
pub struct WidgetBuilder {
    config: WidgetConfig,
    resolver: Option<BoxAnswerResolver>,
    events: Option<EventBus>,
}

impl WidgetBuilder {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            resolver: None,
            events: None,
        }
    }

    /// Answer turns with `resolver` instead of the local knowledge base.
    pub fn resolver<R: AnswerResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(BoxAnswerResolver::new(resolver));
        self
    }

    pub fn boxed_resolver(mut self, resolver: BoxAnswerResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Publish events on an existing bus (e.g. one shared by several widgets).
    ///
    /// Subscribers attached before `build` also see the welcome message.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Widget {
        Widget::from_parts(
            self.config,
            self.resolver,
            self.events.unwrap_or_default(),
        )
    }
}
