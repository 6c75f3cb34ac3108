//! Namespaced listener registry

use domkit_dom::{Document, EventListener, ListenerOptions, NodeId};

/// Split `"click.menu"` into `("click", Some("menu"))`; empty parts are absent
fn split_event_name(event_name: &str) -> (Option<&str>, Option<&str>) {
    let mut parts = event_name.split('.');
    let name = parts.next().filter(|s| !s.is_empty());
    let namespace = parts.next().filter(|s| !s.is_empty());
    (name, namespace)
}

#[derive(Debug, Clone)]
struct Registration {
    target: NodeId,
    name: String,
    namespace: Option<String>,
    listener: EventListener,
    capture: bool,
}

/// Criteria for [`EventsSink::remove`]. Unset fields match anything; an
/// empty filter matches every registration.
#[derive(Debug, Clone, Default)]
pub struct SinkFilter {
    target: Option<NodeId>,
    name: Option<String>,
    namespace: Option<String>,
    listener: Option<EventListener>,
    capture: Option<bool>,
}

impl SinkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// `"name"`, `"name.namespace"` or `".namespace"`
    pub fn event(mut self, event_name: &str) -> Self {
        let (name, namespace) = split_event_name(event_name);
        self.name = name.map(str::to_string);
        self.namespace = namespace.map(str::to_string);
        self
    }

    pub fn listener(mut self, listener: &EventListener) -> Self {
        self.listener = Some(listener.clone());
        self
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    fn matches(&self, item: &Registration) -> bool {
        self.target.is_none_or(|t| t == item.target)
            && self.name.as_ref().is_none_or(|n| *n == item.name)
            && self.namespace.as_ref().is_none_or(|ns| item.namespace.as_ref() == Some(ns))
            && self.listener.as_ref().is_none_or(|l| *l == item.listener)
            && self.capture.is_none_or(|c| c == item.capture)
    }
}

/// Tracks listeners it attaches so they can be detached in bulk
#[derive(Debug, Default)]
pub struct EventsSink {
    events: Vec<Registration>,
}

impl EventsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` for `event_name` (`"click"` or `"click.menu"`)
    pub fn add(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        event_name: &str,
        listener: EventListener,
        options: impl Into<ListenerOptions>,
    ) -> &mut Self {
        let (name, namespace) = split_event_name(event_name);
        let name = name.unwrap_or_default();
        let options = options.into();

        doc.add_event_listener(target, name, listener.clone(), options);
        self.events.push(Registration {
            target,
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            listener,
            capture: options.capture,
        });
        self
    }

    /// Detach every tracked listener matching `filter`
    pub fn remove(&mut self, doc: &mut Document, filter: &SinkFilter) -> &mut Self {
        let (removed, kept): (Vec<_>, Vec<_>) = self.events.drain(..).partition(|item| filter.matches(item));
        self.events = kept;

        for item in &removed {
            doc.remove_event_listener(item.target, &item.name, &item.listener, item.capture);
        }
        tracing::trace!("Removed {} listeners, {} remain", removed.len(), self.events.len());
        self
    }

    /// Detach everything
    pub fn remove_all(&mut self, doc: &mut Document) -> &mut Self {
        self.remove(doc, &SinkFilter::default())
    }

    /// Number of tracked registrations
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
