//! Touch-tap gesture
//!
//! A tap is a `touchstart` followed by a `touchend` of the same touch that
//! travelled less than the distance threshold.

use domkit_dom::{Document, Event, EventListener, NodeId};
use std::cell::RefCell;
use std::rc::Rc;

/// Default travel threshold in CSS pixels.
///
/// Omitting `distance` means this 9px threshold. Only an explicit `Some(0.0)`
/// tightens it to 1px.
pub const DEFAULT_TAP_DISTANCE: f64 = 9.0;

pub struct TouchTapOptions {
    /// Travel at or beyond this many pixels cancels the tap. `Some(0.0)`
    /// behaves as 1; `None` accepts any travel.
    pub distance: Option<f64>,
    /// Called with the `touchend` event of a tap
    pub handler: Option<EventListener>,
}

impl Default for TouchTapOptions {
    fn default() -> Self {
        Self {
            distance: Some(DEFAULT_TAP_DISTANCE),
            handler: None,
        }
    }
}

#[derive(Debug, Default)]
struct TapState {
    tracking: bool,
    touch_id: Option<i64>,
    down: (f64, f64),
}

impl TapState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone)]
struct TapListeners {
    start: EventListener,
    end: EventListener,
    cancel: EventListener,
}

struct Shared {
    element: NodeId,
    options: TouchTapOptions,
    state: RefCell<TapState>,
    /// Cleared by `unbind`, which drops the listeners' references back here
    listeners: RefCell<Option<TapListeners>>,
}

impl Shared {
    fn listeners(&self) -> Option<TapListeners> {
        self.listeners.borrow().clone()
    }

    fn on_start(&self, doc: &mut Document, event: &mut Event) {
        {
            let mut state = self.state.borrow_mut();
            if state.tracking {
                return;
            }
            let touch = event.changed_touches.first();
            state.tracking = true;
            state.touch_id = touch.map(|t| t.identifier);
            state.down = touch.map_or((event.page_x, event.page_y), |t| (t.page_x, t.page_y));
        }

        if let Some(listeners) = self.listeners() {
            doc.add_event_listener(self.element, "touchend", listeners.end, false);
            doc.add_event_listener(self.element, "touchcancel", listeners.cancel, false);
        }
    }

    fn on_end(&self, doc: &mut Document, event: &mut Event) {
        let (touch_id, down) = {
            let mut state = self.state.borrow_mut();
            if !state.tracking {
                return;
            }
            let taken = (state.touch_id, state.down);
            state.reset();
            taken
        };

        let touch = event
            .changed_touches
            .iter()
            .find(|t| touch_id.is_some_and(|id| id == t.identifier))
            .or_else(|| event.changed_touches.first());
        let (x, y) = touch.map_or((event.page_x, event.page_y), |t| (t.page_x, t.page_y));

        if let Some(distance) = self.options.distance {
            let threshold = if distance == 0.0 || distance.is_nan() { 1.0 } else { distance };
            let travelled = (x - down.0).hypot(y - down.1);
            if travelled >= threshold {
                tracing::trace!("Touch travelled {:.1}px, not a tap", travelled);
                return;
            }
        }

        if let Some(handler) = &self.options.handler {
            handler.call(doc, event);
        }
    }

    fn on_cancel(&self, doc: &mut Document) {
        self.state.borrow_mut().reset();
        if let Some(listeners) = self.listeners() {
            doc.remove_event_listener(self.element, "touchend", &listeners.end, false);
            doc.remove_event_listener(self.element, "touchcancel", &listeners.cancel, false);
        }
    }
}

/// Handle returned by [`bind_touch_tap`].
///
/// The gesture stays bound when the handle is dropped; keep it only to
/// [`unbind`](Self::unbind) later.
pub struct TouchTapBinding {
    shared: Rc<Shared>,
}

impl TouchTapBinding {
    /// Detach every listener the gesture installed
    pub fn unbind(&self, doc: &mut Document) {
        let element = self.shared.element;
        if let Some(listeners) = self.shared.listeners.borrow_mut().take() {
            doc.remove_event_listener(element, "touchstart", &listeners.start, false);
            doc.remove_event_listener(element, "touchend", &listeners.end, false);
            doc.remove_event_listener(element, "touchcancel", &listeners.cancel, false);
        }
        self.shared.state.borrow_mut().reset();
    }
}

fn listener(shared: &Rc<Shared>, f: impl Fn(&Shared, &mut Document, &mut Event) + 'static) -> EventListener {
    let shared = Rc::clone(shared);
    EventListener::new(move |doc, event| f(&shared, doc, event))
}

/// Call `options.handler` whenever `element` is tapped
pub fn bind_touch_tap(doc: &mut Document, element: NodeId, options: TouchTapOptions) -> TouchTapBinding {
    let shared = Rc::new(Shared {
        element,
        options,
        state: RefCell::new(TapState::default()),
        listeners: RefCell::new(None),
    });

    let listeners = TapListeners {
        start: listener(&shared, Shared::on_start),
        end: listener(&shared, Shared::on_end),
        cancel: listener(&shared, |shared, doc, _| shared.on_cancel(doc)),
    };
    doc.add_event_listener(element, "touchstart", listeners.start.clone(), false);
    *shared.listeners.borrow_mut() = Some(listeners);

    TouchTapBinding { shared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::{EventDispatcher, NodeOperations, Touch};
    use std::cell::Cell;

    struct Fixture {
        doc: Document,
        el: NodeId,
        taps: Rc<Cell<u32>>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut doc = Document::new();
            let el = doc.create_element("button");
            let body = doc.body();
            doc.tree_mut().append_child(body, el).unwrap();
            Self { doc, el, taps: Rc::new(Cell::new(0)) }
        }

        fn bind(&mut self, distance: Option<f64>) -> TouchTapBinding {
            let taps = Rc::clone(&self.taps);
            let handler = EventListener::new(move |_, _| taps.set(taps.get() + 1));
            bind_touch_tap(&mut self.doc, self.el, TouchTapOptions { distance, handler: Some(handler) })
        }

        fn touch(&mut self, kind: &str, id: i64, x: f64, y: f64) {
            let touch = Touch { identifier: id, page_x: x, page_y: y };
            self.doc.dispatch_event(&mut Event::touch(kind, self.el, vec![touch]));
        }
    }

    #[test]
    fn test_tap_within_threshold() {
        let mut f = Fixture::new();
        let _binding = f.bind(Some(DEFAULT_TAP_DISTANCE));

        f.touch("touchstart", 1, 10.0, 10.0);
        f.touch("touchend", 1, 13.0, 14.0);
        assert_eq!(f.taps.get(), 1);

        // 6-8-10 triangle: exactly 10px of travel
        f.touch("touchstart", 2, 0.0, 0.0);
        f.touch("touchend", 2, 6.0, 8.0);
        assert_eq!(f.taps.get(), 1);
    }

    #[test]
    fn test_tap_after_handle_is_dropped() {
        let mut f = Fixture::new();
        drop(f.bind(Some(DEFAULT_TAP_DISTANCE)));

        f.touch("touchstart", 1, 5.0, 5.0);
        f.touch("touchend", 1, 5.0, 5.0);
        assert_eq!(f.taps.get(), 1);
        assert_eq!(f.doc.listener_count(f.el, "touchstart"), 1);
    }

    #[test]
    fn test_default_options_allow_small_travel() {
        let mut f = Fixture::new();
        let taps = Rc::clone(&f.taps);
        let handler = EventListener::new(move |_, _| taps.set(taps.get() + 1));
        bind_touch_tap(&mut f.doc, f.el, TouchTapOptions { handler: Some(handler), ..Default::default() });

        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 5.0, 0.0);
        assert_eq!(f.taps.get(), 1);

        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 9.0, 0.0);
        assert_eq!(f.taps.get(), 1);
    }

    #[test]
    fn test_zero_distance_means_one_pixel() {
        let mut f = Fixture::new();
        let _binding = f.bind(Some(0.0));

        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 0.5, 0.0);
        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 1.0, 0.0);
        assert_eq!(f.taps.get(), 1);
    }

    #[test]
    fn test_no_distance_check() {
        let mut f = Fixture::new();
        let _binding = f.bind(None);

        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 500.0, 500.0);
        assert_eq!(f.taps.get(), 1);
    }

    #[test]
    fn test_second_touch_is_ignored_while_tracking() {
        let mut f = Fixture::new();
        let _binding = f.bind(Some(DEFAULT_TAP_DISTANCE));

        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchstart", 2, 100.0, 100.0);

        let touches = vec![
            Touch { identifier: 2, page_x: 100.0, page_y: 100.0 },
            Touch { identifier: 1, page_x: 2.0, page_y: 2.0 },
        ];
        f.doc.dispatch_event(&mut Event::touch("touchend", f.el, touches));
        assert_eq!(f.taps.get(), 1);
    }

    #[test]
    fn test_cancel_resets_and_detaches() {
        let mut f = Fixture::new();
        let _binding = f.bind(Some(DEFAULT_TAP_DISTANCE));

        f.touch("touchstart", 1, 0.0, 0.0);
        assert_eq!(f.doc.listener_count(f.el, "touchend"), 1);

        f.touch("touchcancel", 1, 0.0, 0.0);
        assert_eq!(f.doc.listener_count(f.el, "touchend"), 0);
        assert_eq!(f.doc.listener_count(f.el, "touchcancel"), 0);

        f.touch("touchend", 1, 0.0, 0.0);
        assert_eq!(f.taps.get(), 0);
    }

    #[test]
    fn test_unbind() {
        let mut f = Fixture::new();
        let binding = f.bind(Some(DEFAULT_TAP_DISTANCE));

        f.touch("touchstart", 1, 0.0, 0.0);
        binding.unbind(&mut f.doc);

        for kind in ["touchstart", "touchend", "touchcancel"] {
            assert_eq!(f.doc.listener_count(f.el, kind), 0, "{kind}");
        }
        f.touch("touchstart", 1, 0.0, 0.0);
        f.touch("touchend", 1, 0.0, 0.0);
        assert_eq!(f.taps.get(), 0);
    }
}
