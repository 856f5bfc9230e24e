//! Listener attachment surface.
//!
//! The host owns the element tree key events travel through. The key layer
//! only asks it to attach or detach one listener per event type, either on
//! the view root or delegated to a descendant selector.

use crate::event::KeyEventType;

/// Where the host attaches key listeners for a view.
pub trait ListenerSurface {
    /// Attach a listener. `selector` of `None` is the view root.
    fn on(&mut self, event_type: KeyEventType, selector: Option<&str>);

    /// Detach listeners. `selector` of `None` detaches the root's listener.
    fn off(&mut self, event_type: KeyEventType, selector: Option<&str>);
}

/// An attached listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub event_type: KeyEventType,
    pub selector: Option<String>,
}

/// A surface that records its listeners in memory.
///
/// Suits hosts without a native element tree, where the view routes events
/// itself through `KeyBindings::handle_key_event`.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    attached: Vec<Attachment>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently attached listeners, in attachment order.
    pub fn attached(&self) -> &[Attachment] {
        &self.attached
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.attached.len()
    }

    /// Check if a listener is attached for the event type and selector.
    pub fn is_attached(&self, event_type: KeyEventType, selector: Option<&str>) -> bool {
        self.attached
            .iter()
            .any(|a| a.event_type == event_type && a.selector.as_deref() == selector)
    }
}

impl ListenerSurface for MemorySurface {
    fn on(&mut self, event_type: KeyEventType, selector: Option<&str>) {
        self.attached.push(Attachment {
            event_type,
            selector: selector.map(str::to_string),
        });
    }

    fn off(&mut self, event_type: KeyEventType, selector: Option<&str>) {
        self.attached
            .retain(|a| !(a.event_type == event_type && a.selector.as_deref() == selector));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface() {
        let mut surface = MemorySurface::new();
        surface.on(KeyEventType::KeyUp, None);
        surface.on(KeyEventType::KeyUp, Some("form.search"));
        surface.on(KeyEventType::KeyDown, Some("form.search"));

        assert_eq!(surface.listener_count(), 3);
        assert!(surface.is_attached(KeyEventType::KeyUp, Some("form.search")));

        surface.off(KeyEventType::KeyUp, Some("form.search"));
        assert!(!surface.is_attached(KeyEventType::KeyUp, Some("form.search")));
        assert!(surface.is_attached(KeyEventType::KeyUp, None));

        surface.off(KeyEventType::KeyUp, None);
        surface.off(KeyEventType::KeyDown, Some("form.search"));
        assert_eq!(surface.listener_count(), 0);
    }
}
