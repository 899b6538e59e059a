//! Change callbacks shared by forms and inputs

use crate::state::value::option_values_equal;
use serde_json::Value;
use std::fmt;

/// Callback invoked with the full value of the component that changed
pub type ChangeCallback = Box<dyn FnMut(&Value)>;

/// Holds `on_changing` / `on_changed` and suppresses repeated reports of
/// the same value.
#[derive(Default)]
pub struct ChangeNotifier {
    on_changing: Option<ChangeCallback>,
    on_changed: Option<ChangeCallback>,
    last: Option<Value>,
}

impl ChangeNotifier {
    pub fn set_on_changing(&mut self, callback: ChangeCallback) {
        self.on_changing = Some(callback);
    }

    pub fn set_on_changed(&mut self, callback: ChangeCallback) {
        self.on_changed = Some(callback);
    }

    /// Fire `on_changing` then `on_changed` with `value`.
    ///
    /// Returns false without calling anything when `value` equals the last
    /// reported value.
    pub fn notify(&mut self, value: &Value) -> bool {
        if option_values_equal(Some(value), self.last.as_ref()) {
            return false;
        }
        self.last = Some(value.clone());
        if let Some(callback) = self.on_changing.as_mut() {
            callback(value);
        }
        if let Some(callback) = self.on_changed.as_mut() {
            callback(value);
        }
        true
    }

    /// Record `value` as already reported without calling anything
    pub fn sync(&mut self, value: &Value) {
        self.last = Some(value.clone());
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("on_changing", &self.on_changing.is_some())
            .field("on_changed", &self.on_changed.is_some())
            .field("last", &self.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> ChangeCallback {
        let log = Rc::clone(log);
        Box::new(move |value| log.borrow_mut().push(format!("{tag}:{value}")))
    }

    #[test]
    fn test_notify_calls_changing_before_changed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::default();
        notifier.set_on_changed(recording(&log, "changed"));
        notifier.set_on_changing(recording(&log, "changing"));

        assert!(notifier.notify(&json!("a")));
        assert_eq!(*log.borrow(), vec!["changing:\"a\"", "changed:\"a\""]);
    }

    #[test]
    fn test_notify_suppresses_repeat_value() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::default();
        notifier.set_on_changed(recording(&log, "changed"));

        assert!(notifier.notify(&json!(1)));
        assert!(!notifier.notify(&json!(1.0)));
        assert!(notifier.notify(&json!(2)));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_first_null_report_is_delivered() {
        let mut notifier = ChangeNotifier::default();
        assert!(notifier.notify(&Value::Null));
        assert!(!notifier.notify(&Value::Null));
    }

    #[test]
    fn test_sync_marks_value_as_reported() {
        let mut notifier = ChangeNotifier::default();
        notifier.sync(&json!("x"));
        assert!(!notifier.notify(&json!("x")));
        assert!(notifier.notify(&json!("y")));
    }

    #[test]
    fn test_notify_without_callbacks() {
        let mut notifier = ChangeNotifier::default();
        assert!(notifier.notify(&json!({"a": 1})));
    }
}
