//! Render hook points
//!
//! The renderer notifies a [`HookRegistry`] at four points, handing each
//! listener mutable access to the pipeline state of that moment:
//!
//! | Hook                         | Payload                                |
//! |------------------------------|----------------------------------------|
//! | `FrontendEventsAppend`       | event handles, before they are loaded  |
//! | `FrontendDataSourcesAppend`  | data source handles, before loading    |
//! | `FrontendParamsPostResolve`  | the merged parameter register          |
//! | `FrontendTemplatePreRender`  | the composite document and template    |
//!
//! Every notification carries the scope `/frontend/`. Listeners run
//! synchronously and must not keep the references they are given.

use log::trace;

use crate::document::Document;
use crate::params::ParameterRegister;

/// State handed to listeners at a hook point
pub enum HookPayload<'a> {
    EventsAppend {
        events: &'a mut Vec<String>,
    },
    DataSourcesAppend {
        data_sources: &'a mut Vec<String>,
    },
    ParamsPostResolve {
        params: &'a mut ParameterRegister,
    },
    TemplatePreRender {
        document: &'a mut Document,
        template: &'a mut String,
    },
}

impl HookPayload<'_> {
    /// Name of the hook point this payload belongs to
    pub fn hook(&self) -> &'static str {
        match self {
            HookPayload::EventsAppend { .. } => "FrontendEventsAppend",
            HookPayload::DataSourcesAppend { .. } => "FrontendDataSourcesAppend",
            HookPayload::ParamsPostResolve { .. } => "FrontendParamsPostResolve",
            HookPayload::TemplatePreRender { .. } => "FrontendTemplatePreRender",
        }
    }
}

/// Receives hook notifications from the renderer
pub trait HookRegistry {
    fn notify(&self, scope: &str, payload: &mut HookPayload<'_>);
}

/// A registry with no listeners
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl HookRegistry for NoHooks {
    fn notify(&self, _scope: &str, _payload: &mut HookPayload<'_>) {}
}

type Listener = Box<dyn Fn(&mut HookPayload<'_>)>;

struct Subscription {
    hook: String,
    scope: String,
    listener: Listener,
}

/// Listener registry keyed by hook name and scope
#[derive(Default)]
pub struct Delegates {
    subscriptions: Vec<Subscription>,
}

impl Delegates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `listener` whenever `hook` is notified with `scope`. Listeners
    /// run in subscription order.
    pub fn subscribe<F>(&mut self, hook: &str, scope: &str, listener: F)
    where
        F: Fn(&mut HookPayload<'_>) + 'static,
    {
        self.subscriptions.push(Subscription {
            hook: hook.to_string(),
            scope: scope.to_string(),
            listener: Box::new(listener),
        });
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for Delegates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks: Vec<&str> = self.subscriptions.iter().map(|s| s.hook.as_str()).collect();
        f.debug_struct("Delegates").field("hooks", &hooks).finish()
    }
}

impl HookRegistry for Delegates {
    fn notify(&self, scope: &str, payload: &mut HookPayload<'_>) {
        let hook = payload.hook();
        for subscription in &self.subscriptions {
            if subscription.hook == hook && subscription.scope == scope {
                trace!("notifying listener of {} ({})", hook, scope);
                (subscription.listener)(payload);
            }
        }
    }
}
