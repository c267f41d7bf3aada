//! # Producers
//!
//! A producer is a unit that contributes content to a render. Views refer
//! to producers by handle in two lists:
//!
//! - **events** run first, highest `priority` first. An event may decline
//!   to run for a request through [`Producer::can_trigger`].
//! - **data sources** run after the events, ordered so that every data
//!   source comes after the data sources named in its `dependencies`.
//!
//! Each invocation may write values to the shared output register and may
//! return one [`Fragment`] for the composite document. A producer that
//! fails returns a [`ProducerError`]; the render continues and an inline
//! error fragment takes the place of its output.
//!
//! Handles are resolved to producers through a [`ProducerCatalog`].
//! [`ProducerRegistry`] is the in-memory catalog, and [`StaticProducer`]
//! is a producer declared in the settings file.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::{Settings, StaticProducerSpec};
use crate::error::{Error, Result};
use crate::params::ParameterRegister;
use crate::template;

/// Request data handed to events, keyed by field name
pub type RequestData = BTreeMap<String, String>;

/// A detached piece of markup produced outside the composite document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Fragment>,
    },
    Text(String),
}

impl Fragment {
    /// An empty element
    pub fn element(name: impl Into<String>) -> Self {
        Fragment::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    /// `<name>text</name>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Fragment::element(name).with_text(text)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Fragment::Element { attributes, .. } = &mut self {
            attributes.push((key.into(), value.into()));
        }
        self
    }

    pub fn with_child(mut self, child: Fragment) -> Self {
        if let Fragment::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Fragment::Text(text.into()))
    }

    /// Element name, `None` for text
    pub fn name(&self) -> Option<&str> {
        match self {
            Fragment::Element { name, .. } => Some(name),
            Fragment::Text(_) => None,
        }
    }
}

/// Failure of a single producer invocation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProducerError {
    /// The resource the producer reads from does not exist
    #[error("{0}")]
    NotFound(String),
    /// Any other failure
    #[error("{0}")]
    Failed(String),
}

impl ProducerError {
    fn type_name(&self) -> &'static str {
        match self {
            ProducerError::NotFound(_) => "not-found",
            ProducerError::Failed(_) => "failed",
        }
    }

    /// The inline fragment rendered in place of the producer's output:
    /// `<error producer="handle" type="not-found">message</error>`
    pub fn to_fragment(&self, handle: &str) -> Fragment {
        Fragment::element("error")
            .with_attribute("producer", handle)
            .with_attribute("type", self.type_name())
            .with_text(self.to_string())
    }
}

/// A content producer: an event or a data source
pub trait Producer {
    fn handle(&self) -> &str;

    /// Event ordering; higher runs earlier
    fn priority(&self) -> i32 {
        0
    }

    /// Handles of the data sources this one reads from
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether an event runs for this request
    fn can_trigger(&self, _request: &RequestData) -> bool {
        true
    }

    /// Run the producer, writing any output parameters to `output`
    fn produce(
        &self,
        output: &mut ParameterRegister,
        request: &RequestData,
    ) -> std::result::Result<Option<Fragment>, ProducerError>;
}

/// Resolves producer handles. Unknown handles fail with `NotFound`.
pub trait ProducerCatalog {
    fn event(&self, handle: &str) -> Result<Arc<dyn Producer>>;
    fn data_source(&self, handle: &str) -> Result<Arc<dyn Producer>>;
}

/// In-memory producer catalog
#[derive(Default, Clone)]
pub struct ProducerRegistry {
    events: BTreeMap<String, Arc<dyn Producer>>,
    data_sources: BTreeMap<String, Arc<dyn Producer>>,
}

impl ProducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the producers declared in `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();
        for spec in &settings.events {
            registry.register_event(StaticProducer::new(spec.clone()));
        }
        for spec in &settings.data_sources {
            registry.register_data_source(StaticProducer::new(spec.clone()));
        }
        registry
    }

    /// Register an event, replacing any event with the same handle
    pub fn register_event(&mut self, producer: impl Producer + 'static) {
        let producer: Arc<dyn Producer> = Arc::new(producer);
        self.events.insert(producer.handle().to_string(), producer);
    }

    /// Register a data source, replacing any data source with the same
    /// handle
    pub fn register_data_source(&mut self, producer: impl Producer + 'static) {
        let producer: Arc<dyn Producer> = Arc::new(producer);
        self.data_sources
            .insert(producer.handle().to_string(), producer);
    }

    pub fn event_handles(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub fn data_source_handles(&self) -> impl Iterator<Item = &str> {
        self.data_sources.keys().map(String::as_str)
    }
}

impl fmt::Debug for ProducerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerRegistry")
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProducerCatalog for ProducerRegistry {
    fn event(&self, handle: &str) -> Result<Arc<dyn Producer>> {
        self.events
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::not_found("Event", handle))
    }

    fn data_source(&self, handle: &str) -> Result<Arc<dyn Producer>> {
        self.data_sources
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::not_found("Data source", handle))
    }
}

/// A producer declared in the settings file.
///
/// Emits `<handle>` with one `<item>` child per configured item and writes
/// its configured parameters to the output register. `{$name}` tokens in
/// parameter values expand to values already in the register, so a data
/// source can build on the output of its dependencies.
#[derive(Debug, Clone)]
pub struct StaticProducer {
    spec: StaticProducerSpec,
}

impl StaticProducer {
    pub fn new(spec: StaticProducerSpec) -> Self {
        Self { spec }
    }
}

impl Producer for StaticProducer {
    fn handle(&self) -> &str {
        &self.spec.handle
    }

    fn priority(&self) -> i32 {
        self.spec.priority
    }

    fn dependencies(&self) -> Vec<String> {
        self.spec.dependencies.clone()
    }

    fn can_trigger(&self, request: &RequestData) -> bool {
        match &self.spec.trigger_on {
            Some(key) => request.contains_key(key),
            None => true,
        }
    }

    fn produce(
        &self,
        output: &mut ParameterRegister,
        _request: &RequestData,
    ) -> std::result::Result<Option<Fragment>, ProducerError> {
        for (key, value) in &self.spec.parameters {
            let expanded = template::expand_parameters(value, &output.to_flat_map())
                .map_err(|e| ProducerError::Failed(e.to_string()))?;
            output.set(key.clone(), expanded);
        }
        debug!(
            "static producer {} wrote {} parameter(s)",
            self.spec.handle,
            self.spec.parameters.len()
        );

        let fragment = self
            .spec
            .items
            .iter()
            .fold(Fragment::element(self.spec.handle.clone()), |fragment, item| {
                fragment.with_child(Fragment::text_element("item", item.clone()))
            });
        Ok(Some(fragment))
    }
}
