//! DOM Events
//!
//! Event objects, listener registration and capture/target/bubble dispatch.

use crate::NodeId;
use crate::document::Document;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Event phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// A touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub identifier: i64,
    pub page_x: f64,
    pub page_y: f64,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    pub page_x: f64,
    pub page_y: f64,
    /// Touches that changed in this event (touch events only)
    pub changed_touches: Vec<Touch>,
    pub timestamp: f64,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_stopped: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Non-bubbling, non-cancelable event
    pub fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: None,
            phase: EventPhase::None,
            bubbles: false,
            cancelable: false,
            page_x: 0.0,
            page_y: 0.0,
            changed_touches: Vec::new(),
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
            immediate_stopped: false,
            in_passive_listener: false,
        }
    }

    /// Bubbling, cancelable event (the shape of UI events)
    pub fn bubbling(event_type: &str, target: NodeId) -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            ..Self::new(event_type, target)
        }
    }

    /// Touch event; page coordinates come from the first changed touch
    pub fn touch(event_type: &str, target: NodeId, changed_touches: Vec<Touch>) -> Self {
        let (page_x, page_y) = changed_touches
            .first()
            .map_or((0.0, 0.0), |t| (t.page_x, t.page_y));
        Self {
            page_x,
            page_y,
            changed_touches,
            ..Self::bubbling(event_type, target)
        }
    }

    /// Set page coordinates
    pub fn with_page(mut self, page_x: f64, page_y: f64) -> Self {
        self.page_x = page_x;
        self.page_y = page_y;
        self
    }

    /// Prevent default action; ignored for non-cancelable events and
    /// inside passive listeners
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners of the current node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Listener callback signature
pub type EventHandler = dyn Fn(&mut Document, &mut Event);

/// Shared listener; two listeners are equal when they share the same handler
#[derive(Clone)]
pub struct EventListener(Rc<EventHandler>);

impl EventListener {
    pub fn new(handler: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, document: &mut Document, event: &mut Event) {
        (self.0)(document, event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// addEventListener options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }
}

impl From<bool> for ListenerOptions {
    fn from(capture: bool) -> Self {
        Self { capture, ..Self::default() }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Registration {
    event_type: String,
    listener: EventListener,
    options: ListenerOptions,
    /// Set on removal so in-flight dispatches skip the listener
    removed: Rc<Cell<bool>>,
}

/// Listeners per event target
#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    by_target: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerStore {
    /// Register a listener; returns false for a duplicate
    pub(crate) fn add(&mut self, target: NodeId, event_type: &str, listener: EventListener, options: ListenerOptions) -> bool {
        let entries = self.by_target.entry(target).or_default();
        let duplicate = entries.iter().any(|r| {
            r.event_type == event_type && r.listener == listener && r.options.capture == options.capture
        });
        if duplicate {
            return false;
        }
        entries.push(Registration {
            event_type: event_type.to_string(),
            listener,
            options,
            removed: Rc::new(Cell::new(false)),
        });
        true
    }

    /// Unregister a listener; returns whether one was found
    pub(crate) fn remove(&mut self, target: NodeId, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        let Some(entries) = self.by_target.get_mut(&target) else {
            return false;
        };
        let Some(index) = entries.iter().position(|r| {
            r.event_type == event_type && r.listener == *listener && r.options.capture == capture
        }) else {
            return false;
        };

        entries.remove(index).removed.set(true);
        if entries.is_empty() {
            self.by_target.remove(&target);
        }
        true
    }

    pub(crate) fn count(&self, target: NodeId, event_type: &str) -> usize {
        self.by_target
            .get(&target)
            .map_or(0, |entries| entries.iter().filter(|r| r.event_type == event_type).count())
    }

    fn snapshot(&self, target: NodeId, event_type: &str) -> Vec<Registration> {
        self.by_target
            .get(&target)
            .map(|entries| entries.iter().filter(|r| r.event_type == event_type).cloned().collect())
            .unwrap_or_default()
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Dispatch to `event.target`; returns false when the default was prevented
    fn dispatch_event(&mut self, event: &mut Event) -> bool;
}

impl Document {
    /// Run the listeners of `node`; `capture` filters by listener kind
    fn invoke_listeners(&mut self, node: NodeId, event: &mut Event, capture: Option<bool>) {
        for registration in self.listeners.snapshot(node, &event.event_type) {
            if event.immediate_stopped {
                break;
            }
            if registration.removed.get() {
                continue;
            }
            if capture.is_some_and(|c| c != registration.options.capture) {
                continue;
            }
            if registration.options.once {
                self.listeners.remove(
                    node,
                    &registration.event_type,
                    &registration.listener,
                    registration.options.capture,
                );
            }

            event.current_target = Some(node);
            event.in_passive_listener = registration.options.passive;
            registration.listener.call(self, event);
            event.in_passive_listener = false;
        }
    }
}

impl EventDispatcher for Document {
    fn dispatch_event(&mut self, event: &mut Event) -> bool {
        let target = event.target;
        let mut path = Vec::new();
        let mut cursor = self.tree().parent(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.tree().parent(node);
        }

        event.phase = EventPhase::Capturing;
        for &node in path.iter().rev() {
            if event.propagation_stopped {
                break;
            }
            self.invoke_listeners(node, event, Some(true));
        }

        if !event.propagation_stopped {
            event.phase = EventPhase::AtTarget;
            self.invoke_listeners(target, event, None);
        }

        if event.bubbles {
            event.phase = EventPhase::Bubbling;
            for &node in &path {
                if event.propagation_stopped {
                    break;
                }
                self.invoke_listeners(node, event, Some(false));
            }
        }

        event.phase = EventPhase::None;
        event.current_target = None;
        !event.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::NodeOperations;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &str) -> EventListener {
        let log = Rc::clone(log);
        let label = label.to_string();
        EventListener::new(move |_, event| {
            log.borrow_mut().push(format!("{label}:{:?}", event.phase));
        })
    }

    fn nested() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        let body = doc.body();
        doc.tree_mut().append_child(body, outer).unwrap();
        doc.tree_mut().append_child(outer, inner).unwrap();
        (doc, outer, inner)
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));

        doc.add_event_listener(outer, "click", recorder(&log, "outer-bubble"), false);
        doc.add_event_listener(outer, "click", recorder(&log, "outer-capture"), true);
        doc.add_event_listener(inner, "click", recorder(&log, "inner"), false);

        assert!(doc.dispatch_event(&mut Event::bubbling("click", inner)));
        assert_eq!(
            *log.borrow(),
            vec!["outer-capture:Capturing", "inner:AtTarget", "outer-bubble:Bubbling"]
        );
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let (mut doc, outer, _) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = recorder(&log, "a");

        assert!(doc.add_event_listener(outer, "click", listener.clone(), false));
        assert!(!doc.add_event_listener(outer, "click", listener.clone(), false));
        assert!(doc.add_event_listener(outer, "click", listener.clone(), true));
        assert_eq!(doc.listener_count(outer, "click"), 2);

        assert!(doc.remove_event_listener(outer, "click", &listener, true));
        assert_eq!(doc.listener_count(outer, "click"), 1);
    }

    #[test]
    fn test_stop_propagation_and_prevent_default() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));

        doc.add_event_listener(
            inner,
            "click",
            EventListener::new(|_, event| {
                event.prevent_default();
                event.stop_propagation();
            }),
            false,
        );
        doc.add_event_listener(outer, "click", recorder(&log, "outer"), false);

        assert!(!doc.dispatch_event(&mut Event::bubbling("click", inner)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_once_and_passive() {
        let (mut doc, outer, _) = nested();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);

        doc.add_event_listener(
            outer,
            "touchstart",
            EventListener::new(move |_, event| {
                counter.set(counter.get() + 1);
                event.prevent_default();
            }),
            ListenerOptions { once: true, passive: true, ..Default::default() },
        );

        assert!(doc.dispatch_event(&mut Event::bubbling("touchstart", outer)));
        assert!(doc.dispatch_event(&mut Event::bubbling("touchstart", outer)));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_removed_during_dispatch_is_skipped() {
        let (mut doc, outer, _) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        let second = recorder(&log, "second");
        let to_remove = second.clone();

        doc.add_event_listener(
            outer,
            "click",
            EventListener::new(move |doc, _| {
                doc.remove_event_listener(outer, "click", &to_remove, false);
            }),
            false,
        );
        doc.add_event_listener(outer, "click", second, false);

        doc.dispatch_event(&mut Event::new("click", outer));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_touch_event_page_coordinates() {
        let event = Event::touch(
            "touchstart",
            NodeId::ROOT,
            vec![Touch { identifier: 3, page_x: 10.0, page_y: 20.0 }],
        );

        assert_eq!((event.page_x, event.page_y), (10.0, 20.0));
        assert!(event.bubbles);
    }
}
