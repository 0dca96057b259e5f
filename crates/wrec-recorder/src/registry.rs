//! Handler Registry
//!
//! Process-wide table of named event handlers and mutation-observer
//! templates. Built once at startup, then shared read-only by every
//! per-document lifecycle; nothing mutates it while a recording session
//! is live.
//!
//! Whether a handler also attaches inside shadow roots is an explicit
//! capability flag on the entry, not a naming convention.

use std::fmt;
use std::rc::Rc;

use wrec_dom::{Document, EventKind, MutationRecord, ObserverConfig, PageEvent};

use crate::SessionCx;

/// Callback signature for registered handlers
pub type HandlerFn = Rc<dyn Fn(&Document, &SessionCx, &PageEvent)>;

/// Callback signature for observer templates
pub type ObserverFn = Rc<dyn Fn(&SessionCx, &[MutationRecord])>;

/// One registered handler
#[derive(Clone)]
pub struct HandlerSpec {
    pub name: &'static str,
    pub event: EventKind,
    pub capture: bool,
    /// Attached inside shadow roots as well as at the document
    pub shadow: bool,
    pub callback: HandlerFn,
}

impl fmt::Debug for HandlerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSpec")
            .field("name", &self.name)
            .field("event", &self.event)
            .field("capture", &self.capture)
            .field("shadow", &self.shadow)
            .finish()
    }
}

/// One registered mutation-observer template
#[derive(Clone)]
pub struct ObserverSpec {
    pub name: &'static str,
    pub config: ObserverConfig,
    pub callback: ObserverFn,
}

impl fmt::Debug for ObserverSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSpec")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}

/// Immutable-after-build handler table
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: Vec<HandlerSpec>,
    observers: Vec<ObserverSpec>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registered handlers, in registration order
    pub fn handlers(&self) -> &[HandlerSpec] {
        &self.handlers
    }

    /// Registered observer templates, in registration order
    pub fn observers(&self) -> &[ObserverSpec] {
        &self.observers
    }

    /// Look a handler up by name
    pub fn handler(&self, name: &str) -> Option<&HandlerSpec> {
        self.handlers.iter().find(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder for [`HandlerRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    handlers: Vec<HandlerSpec>,
    observers: Vec<ObserverSpec>,
}

impl RegistryBuilder {
    /// Register a handler. Idempotent by name: re-registering replaces
    /// the prior entry in place rather than duplicating it.
    pub fn register(
        mut self,
        name: &'static str,
        event: EventKind,
        capture: bool,
        shadow: bool,
        callback: HandlerFn,
    ) -> Self {
        let spec = HandlerSpec {
            name,
            event,
            capture,
            shadow,
            callback,
        };
        match self.handlers.iter_mut().find(|h| h.name == name) {
            Some(existing) => *existing = spec,
            None => self.handlers.push(spec),
        }
        self
    }

    /// Register an observer template. Idempotent by name.
    pub fn register_observer(
        mut self,
        name: &'static str,
        config: ObserverConfig,
        callback: ObserverFn,
    ) -> Self {
        let spec = ObserverSpec {
            name,
            config,
            callback,
        };
        match self.observers.iter_mut().find(|o| o.name == name) {
            Some(existing) => *existing = spec,
            None => self.observers.push(spec),
        }
        self
    }

    pub fn build(self) -> Rc<HandlerRegistry> {
        Rc::new(HandlerRegistry {
            handlers: self.handlers,
            observers: self.observers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> HandlerFn {
        Rc::new(|_, _, _| {})
    }

    #[test]
    fn test_register_is_idempotent_by_name() {
        let registry = HandlerRegistry::builder()
            .register("click", EventKind::Click, true, false, noop())
            .register("click", EventKind::Click, true, true, noop())
            .build();

        assert_eq!(registry.len(), 1);
        assert!(registry.handler("click").unwrap().shadow);
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = HandlerRegistry::builder()
            .register("click", EventKind::Click, true, false, noop())
            .register("change", EventKind::Change, false, true, noop())
            .build();

        let names: Vec<_> = registry.handlers().iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["click", "change"]);
    }

    #[test]
    fn test_observer_registration_is_idempotent() {
        let registry = HandlerRegistry::builder()
            .register_observer("watch", ObserverConfig::default(), Rc::new(|_, _| {}))
            .register_observer("watch", ObserverConfig::default(), Rc::new(|_, _| {}))
            .build();

        assert_eq!(registry.observers().len(), 1);
    }
}
