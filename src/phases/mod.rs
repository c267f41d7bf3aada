//! The render pipeline.
//!
//! ## Overview
//!
//! Rendering a view runs these steps in order:
//! 1. Events - the `FrontendEventsAppend` hook may add handles, then events
//!    run by priority ([`pool`])
//! 2. Data Sources - the `FrontendDataSourcesAppend` hook may add handles,
//!    then data sources run in dependency order ([`ordering`], [`pool`])
//! 3. Parameters - producer output is merged into the caller's register and
//!    the `FrontendParamsPostResolve` hook runs ([`composite`])
//! 4. Document - fragments and parameters are folded into the composite
//!    document ([`composite`])
//! 5. Transform - the `FrontendTemplatePreRender` hook runs, then the
//!    template engine transforms the document inside the workspace
//!    ([`orchestrator`])
//!
//! The whole render is single-threaded. Later producers may read what
//! earlier ones wrote to the output register, so the order is part of the
//! contract.

pub mod composite;
pub mod orchestrator;
pub mod ordering;
pub mod pool;

pub use orchestrator::{HeaderSink, RenderState, Rendered, Renderer};
