//! # viewtree
//!
//! This library composes and renders *views*: named nodes in a
//! directory-backed tree, each carrying metadata, the handles of the
//! producers that feed it, and a template. It is used by the `viewtree`
//! command-line tool but can be embedded in any application that needs to
//! resolve a URL to a view and render it.
//!
//! ## Quick Example
//!
//! ```
//! use viewtree::config::StaticProducerSpec;
//! use viewtree::params::ParameterRegister;
//! use viewtree::phases::Renderer;
//! use viewtree::producer::{ProducerRegistry, StaticProducer};
//! use viewtree::store::MemoryStore;
//! use viewtree::template::TokenEngine;
//! use viewtree::view::{Messages, View, Views};
//!
//! // Save a view into an in-memory tree
//! let mut views = Views::new(MemoryStore::new());
//! let mut home = View::new("home");
//! home.title = "Home".to_string();
//! home.data_sources = vec!["greeting".to_string()];
//! home.template = Some("<h1>{/data/greeting/item}</h1>".to_string());
//! views.save(&mut home, &mut Messages::new(), false).unwrap();
//!
//! // Declare the data source it reads from
//! let mut registry = ProducerRegistry::new();
//! registry.register_data_source(StaticProducer::new(StaticProducerSpec {
//!     handle: "greeting".to_string(),
//!     items: vec!["Hello".to_string()],
//!     ..Default::default()
//! }));
//!
//! // Resolve a URL and render it
//! let mut view = views.load_from_url("/home/").unwrap();
//! let mut engine = TokenEngine::new().unwrap();
//! let mut params = ParameterRegister::new();
//! let rendered = Renderer::new(&registry, &mut engine)
//!     .render(&mut view, &mut params, None)
//!     .unwrap();
//! assert_eq!(rendered.body, b"<h1>Hello</h1>");
//! ```
//!
//! ## Core Concepts
//!
//! - **Views (`view`)**: the node model. A `Views` repository loads views
//!   by path or URL, walks parents and children, and validates, saves,
//!   moves and deletes definitions.
//! - **Stores (`store`)**: raw persistence of view definitions, on disk or
//!   in memory.
//! - **Producers (`producer`)**: events and data sources that write output
//!   parameters and contribute fragments to a render.
//! - **Phases (`phases`)**: the render pipeline, from producer ordering to
//!   the template transform.
//! - **Hooks (`hooks`)**: named extension points that receive mutable
//!   access to the pipeline state.
//! - **Templates (`template`)**: the engine contract and the bundled token
//!   engine.
//!
//! ## Render Flow
//!
//! 1.  **Events**: run by priority, skipping those that decline to trigger.
//! 2.  **Data Sources**: run in dependency order.
//! 3.  **Parameters**: producer output merges into the caller's register.
//! 4.  **Document**: fragments and parameters form the composite document.
//! 5.  **Transform**: the template engine runs inside the workspace
//!     directory.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod hooks;
pub mod output;
pub mod params;
pub mod path;
pub mod phases;
pub mod producer;
pub mod store;
pub mod suggestions;
pub mod template;
pub mod view;
pub mod workdir;

#[cfg(test)]
mod ordering_proptest;
#[cfg(test)]
mod path_proptest;
