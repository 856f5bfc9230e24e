//! View lifecycle integration.

use crate::bindings::KeyBindings;
use crate::error::KeysResult;
use crate::surface::ListenerSurface;

/// A view that owns key bindings.
///
/// Hosts implement `key_bindings` and their own delegation hooks; the
/// provided `delegate_events` / `undelegate_events` order the key layer
/// around them.
pub trait KeyedView {
    /// Surface the view's listeners attach to.
    type Surface: ListenerSurface;

    /// The view's key bindings.
    fn key_bindings(&mut self) -> &mut KeyBindings<Self::Surface>;

    /// The host's own event delegation.
    fn delegate_view_events(&mut self) {}

    /// The host's own event undelegation.
    fn undelegate_view_events(&mut self) {}

    /// Delegate view events, then keys.
    fn delegate_events(&mut self) -> KeysResult<()> {
        self.delegate_view_events();
        self.key_bindings().delegate_keys(None)
    }

    /// Undelegate keys, then view events.
    fn undelegate_events(&mut self) {
        self.key_bindings().undelegate_keys();
        self.undelegate_view_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MethodTable;
    use crate::event::KeyEventType;
    use crate::keymap::KeyMap;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct LoggingSurface(Log);

    impl ListenerSurface for LoggingSurface {
        fn on(&mut self, event_type: KeyEventType, selector: Option<&str>) {
            self.0
                .borrow_mut()
                .push(format!("on {event_type} {}", selector.unwrap_or("root")));
        }

        fn off(&mut self, event_type: KeyEventType, selector: Option<&str>) {
            self.0
                .borrow_mut()
                .push(format!("off {event_type} {}", selector.unwrap_or("root")));
        }
    }

    struct TestView {
        log: Log,
        keys: KeyBindings<LoggingSurface>,
    }

    impl TestView {
        fn new() -> Self {
            let log = Log::default();
            let methods = MethodTable::new().with("close", |_, _| {});
            let keys = KeyBindings::new(LoggingSurface(log.clone()), methods)
                .with_keys(KeyMap::new().with("esc", "close"));
            Self { log, keys }
        }
    }

    impl KeyedView for TestView {
        type Surface = LoggingSurface;

        fn key_bindings(&mut self) -> &mut KeyBindings<LoggingSurface> {
            &mut self.keys
        }

        fn delegate_view_events(&mut self) {
            self.log.borrow_mut().push("view delegate".into());
        }

        fn undelegate_view_events(&mut self) {
            self.log.borrow_mut().push("view undelegate".into());
        }
    }

    #[test]
    fn test_lifecycle_order() {
        let mut view = TestView::new();
        view.delegate_events().unwrap();
        view.undelegate_events();

        assert_eq!(
            *view.log.borrow(),
            vec![
                "view delegate",
                "on keyup root",
                "on keydown root",
                "off keyup root",
                "off keydown root",
                "view undelegate",
            ]
        );
    }

    #[test]
    fn test_redelegation_detaches_first() {
        let mut view = TestView::new();
        view.delegate_events().unwrap();
        view.log.borrow_mut().clear();

        view.delegate_events().unwrap();
        assert_eq!(
            *view.log.borrow(),
            vec![
                "view delegate",
                "off keyup root",
                "off keydown root",
                "on keyup root",
                "on keydown root",
            ]
        );
        assert_eq!(view.key_bindings().registry().len(), 1);
    }
}
