//! Render orchestrator
//!
//! Drives a single render of a view through its states:
//!
//! ```text
//! Init -> GatherEvents -> GatherDataSources -> ResolveParameters
//!      -> PreTransformHook -> Transform -> Done
//! ```
//!
//! Any failure moves the renderer to `Error`. Per-producer failures are not
//! failures of the render; see [`super::pool`].

use std::fmt;
use std::path::PathBuf;

use log::debug;

use super::{composite, pool};
use crate::defaults::{DOCUMENT_ROOT, HOOK_SCOPE};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::hooks::{HookPayload, HookRegistry, NoHooks};
use crate::params::ParameterRegister;
use crate::producer::{ProducerCatalog, RequestData};
use crate::template::{OutputFormat, TemplateEngine, TransformOptions};
use crate::view::View;
use crate::workdir::WorkdirGuard;

static NO_HOOKS: NoHooks = NoHooks;

/// Where the renderer is in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Init,
    GatherEvents,
    GatherDataSources,
    ResolveParameters,
    PreTransformHook,
    Transform,
    Done,
    Error,
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Receives response headers
pub trait HeaderSink {
    fn append(&mut self, name: &str, value: &str);
}

impl HeaderSink for Vec<(String, String)> {
    fn append(&mut self, name: &str, value: &str) {
        self.push((name.to_string(), value.to_string()));
    }
}

/// Output of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The view's content type. Without a header sink this is the only
    /// place it is reported; callers writing the body directly send it.
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Renders views with one producer catalog, template engine and hook
/// registry
pub struct Renderer<'a> {
    catalog: &'a dyn ProducerCatalog,
    engine: &'a mut dyn TemplateEngine,
    hooks: &'a dyn HookRegistry,
    workspace: Option<PathBuf>,
    request: RequestData,
    options: TransformOptions,
    state: RenderState,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a dyn ProducerCatalog, engine: &'a mut dyn TemplateEngine) -> Self {
        Self {
            catalog,
            engine,
            hooks: &NO_HOOKS,
            workspace: None,
            request: RequestData::new(),
            options: TransformOptions::new(),
            state: RenderState::Init,
        }
    }

    pub fn with_hooks(mut self, hooks: &'a dyn HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Run transforms with `dir` as the working directory
    pub fn with_workspace(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace = Some(dir.into());
        self
    }

    /// Request data handed to events
    pub fn with_request(mut self, request: RequestData) -> Self {
        self.request = request;
        self
    }

    /// Options handed to the template engine on every transform
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Render `view` into a fresh `<data>` document
    pub fn render(
        &mut self,
        view: &mut View,
        params: &mut ParameterRegister,
        headers: Option<&mut dyn HeaderSink>,
    ) -> Result<Rendered> {
        let mut document = Document::new(DOCUMENT_ROOT)?;
        self.render_into(view, params, &mut document, headers)
    }

    /// Render `view`, appending its content to an existing document.
    ///
    /// `params` receives the producers' output parameters. A template
    /// replaced by a `FrontendTemplatePreRender` listener is written back to
    /// `view`.
    pub fn render_into(
        &mut self,
        view: &mut View,
        params: &mut ParameterRegister,
        document: &mut Document,
        headers: Option<&mut dyn HeaderSink>,
    ) -> Result<Rendered> {
        let result = self
            .compose_into(view, params, document, headers)
            .and_then(|()| self.transform(view, params, document));
        self.fail_on_error(result)
    }

    /// Assemble the composite document for `view` without transforming it
    pub fn compose(&mut self, view: &View, params: &mut ParameterRegister) -> Result<Document> {
        let mut document = Document::new(DOCUMENT_ROOT)?;
        let result = self.compose_into(view, params, &mut document, None);
        self.fail_on_error(result)?;
        self.transition(RenderState::Done);
        Ok(document)
    }

    fn compose_into(
        &mut self,
        view: &View,
        params: &mut ParameterRegister,
        document: &mut Document,
        headers: Option<&mut dyn HeaderSink>,
    ) -> Result<()> {
        self.transition(RenderState::Init);
        match headers {
            Some(sink) => sink.append("Content-Type", &view.content_type),
            None => debug!(
                "no header sink, content type {} returned with the output",
                view.content_type
            ),
        }
        let root = document.root();
        let events_zone = composite::events_zone(document)?;
        let mut output = ParameterRegister::new();

        self.transition(RenderState::GatherEvents);
        let mut events = view.events.clone();
        self.hooks
            .notify(HOOK_SCOPE, &mut HookPayload::EventsAppend { events: &mut events });
        let fragments = pool::gather_events(self.catalog, &events, &mut output, &self.request)?;
        composite::append_fragments(document, events_zone, &fragments)?;

        self.transition(RenderState::GatherDataSources);
        let mut data_sources = view.data_sources.clone();
        self.hooks.notify(
            HOOK_SCOPE,
            &mut HookPayload::DataSourcesAppend {
                data_sources: &mut data_sources,
            },
        );
        let fragments =
            pool::gather_data_sources(self.catalog, &data_sources, &mut output, &self.request)?;
        composite::append_fragments(document, root, &fragments)?;

        self.transition(RenderState::ResolveParameters);
        composite::merge_output(params, &output);
        self.hooks.notify(
            HOOK_SCOPE,
            &mut HookPayload::ParamsPostResolve {
                params: &mut *params,
            },
        );
        composite::append_parameters(document, params)?;
        Ok(())
    }

    fn transform(
        &mut self,
        view: &mut View,
        params: &ParameterRegister,
        document: &mut Document,
    ) -> Result<Rendered> {
        self.transition(RenderState::PreTransformHook);
        let mut template = view.template.clone().unwrap_or_default();
        self.hooks.notify(
            HOOK_SCOPE,
            &mut HookPayload::TemplatePreRender {
                document: &mut *document,
                template: &mut template,
            },
        );
        if view.template.as_deref() != Some(template.as_str()) && !template.is_empty() {
            view.template = Some(template.clone());
        }
        if template.trim().is_empty() {
            return Err(Error::not_found("Template", view.template_pathname()));
        }

        self.transition(RenderState::Transform);
        let format = OutputFormat::from_content_type(&view.content_type);
        let flat = params.to_flat_map();
        let body = {
            let _guard = match &self.workspace {
                Some(dir) => Some(WorkdirGuard::enter(dir)?),
                None => None,
            };
            self.engine
                .transform(document, &template, format, &flat, &self.options)
        };
        if self.engine.has_errors() {
            return Err(Error::TransformFailed {
                message: self.engine.errors().join("; "),
            });
        }

        self.transition(RenderState::Done);
        Ok(Rendered {
            content_type: view.content_type.clone(),
            body,
        })
    }

    fn transition(&mut self, next: RenderState) {
        debug!("render state {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail_on_error<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            debug!("render failed in state {}: {}", self.state, e);
            self.state = RenderState::Error;
        }
        result
    }
}
