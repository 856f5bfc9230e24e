//! Per-view binding registry.

use crate::action::Handler;
use crate::binding::ListenerRecord;
use std::collections::HashMap;

/// Listener records keyed by key code.
///
/// Records for one key code keep their registration order, which is the
/// order handlers run in.
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: HashMap<u32, Vec<ListenerRecord>>,
}

impl BindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the list for its key code.
    pub fn register(&mut self, record: ListenerRecord) {
        self.bindings.entry(record.key_code).or_default().push(record);
    }

    /// Remove every record.
    pub fn unregister_all(&mut self) {
        self.bindings.clear();
    }

    /// Remove records by key code and handler.
    ///
    /// - no key code: everything is cleared
    /// - key code only: that key code's records are cleared
    /// - key code and handler: only records bound to that exact handler go
    pub fn unregister_by_method(&mut self, key_code: Option<u32>, method: Option<&Handler>) {
        let Some(key_code) = key_code else {
            self.unregister_all();
            return;
        };

        match method {
            None => {
                self.bindings.remove(&key_code);
            }
            Some(method) => {
                if let Some(records) = self.bindings.get_mut(&key_code) {
                    records.retain(|r| !r.is_bound_to(method));
                    if records.is_empty() {
                        self.bindings.remove(&key_code);
                    }
                }
            }
        }
    }

    /// Records registered for a key code, in registration order.
    pub fn records(&self, key_code: u32) -> &[ListenerRecord] {
        self.bindings
            .get(&key_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate all records, grouped by key code.
    ///
    /// Records within a key code come in registration order; the order of
    /// the key codes themselves is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &ListenerRecord> {
        self.bindings.values().flatten()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.values().all(Vec::is_empty)
    }
}
