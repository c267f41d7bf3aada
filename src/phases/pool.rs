//! Producer Pool
//!
//! Loads the producers a view refers to and runs them in render order,
//! collecting their fragments.
//!
//! ## Events
//!
//! Events are loaded in declaration order and stably sorted by priority,
//! highest first. An event whose `can_trigger` returns false for the
//! request is skipped entirely: it produces no fragment and never sees the
//! output register.
//!
//! ## Data Sources
//!
//! Data sources are loaded once per handle, ordered by their declared
//! dependencies (see [`super::ordering`]) and run in that order, each one
//! seeing the output register as left by the ones before it.
//!
//! A producer that returns an error does not stop the pool: an inline
//! error fragment is collected in its place and the next producer runs.
//! Failing to *load* a producer is fatal.

use std::cmp::Reverse;
use std::sync::Arc;

use log::{debug, warn};

use super::ordering;
use crate::error::Result;
use crate::params::ParameterRegister;
use crate::producer::{Fragment, Producer, ProducerCatalog, RequestData};

/// Run the events named by `handles`, returning their fragments in
/// invocation order
pub fn gather_events(
    catalog: &dyn ProducerCatalog,
    handles: &[String],
    output: &mut ParameterRegister,
    request: &RequestData,
) -> Result<Vec<Fragment>> {
    let mut events = handles
        .iter()
        .map(|handle| catalog.event(handle))
        .collect::<Result<Vec<_>>>()?;
    events.sort_by_key(|event| Reverse(event.priority()));

    let mut fragments = Vec::new();
    for event in events {
        if !event.can_trigger(request) {
            debug!("event {} declined to trigger", event.handle());
            continue;
        }
        invoke(event.as_ref(), output, request, &mut fragments);
    }
    Ok(fragments)
}

/// Run the data sources named by `handles` in dependency order, returning
/// their fragments in invocation order
pub fn gather_data_sources(
    catalog: &dyn ProducerCatalog,
    handles: &[String],
    output: &mut ParameterRegister,
    request: &RequestData,
) -> Result<Vec<Fragment>> {
    let mut pool: Vec<(String, Arc<dyn Producer>)> = Vec::new();
    for handle in handles {
        if pool.iter().any(|(loaded, _)| loaded == handle) {
            continue;
        }
        pool.push((handle.clone(), catalog.data_source(handle)?));
    }

    let dependencies: ordering::DependencyList = pool
        .iter()
        .map(|(handle, producer)| (handle.clone(), producer.dependencies()))
        .collect();
    let order = ordering::order(&dependencies);
    debug!("data source order: {:?}", order);

    let mut fragments = Vec::new();
    for handle in &order {
        if let Some((_, producer)) = pool.iter().find(|(loaded, _)| loaded == handle) {
            invoke(producer.as_ref(), output, request, &mut fragments);
        }
    }
    Ok(fragments)
}

fn invoke(
    producer: &dyn Producer,
    output: &mut ParameterRegister,
    request: &RequestData,
    fragments: &mut Vec<Fragment>,
) {
    debug!("running producer {}", producer.handle());
    match producer.produce(output, request) {
        Ok(Some(fragment)) => fragments.push(fragment),
        Ok(None) => {}
        Err(e) => {
            warn!("producer {} failed: {}", producer.handle(), e);
            fragments.push(e.to_fragment(producer.handle()));
        }
    }
}
