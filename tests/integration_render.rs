//! Integration tests for the view tree and the render pipeline.
//!
//! These drive the library the way an embedding application would: views
//! are saved through [`Views`], producers are registered in code or read
//! from settings, and renders go through [`Renderer`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use serial_test::serial;
use tempfile::TempDir;

use viewtree::config::{self, StaticProducerSpec};
use viewtree::document::Document;
use viewtree::error::{Error, ErrorKind};
use viewtree::hooks::{Delegates, HookPayload};
use viewtree::params::ParameterRegister;
use viewtree::phases::{RenderState, Renderer};
use viewtree::producer::{
    Fragment, Producer, ProducerError, ProducerRegistry, RequestData, StaticProducer,
};
use viewtree::store::{DefinitionStore, DiskStore, MemoryStore};
use viewtree::template::{OutputFormat, TemplateEngine, TokenEngine, TransformOptions};
use viewtree::view::{Attribute, Messages, View, Views};

fn producer(handle: &str, dependencies: &[&str], params: &[(&str, &str)]) -> StaticProducer {
    StaticProducer::new(StaticProducerSpec {
        handle: handle.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        parameters: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..Default::default()
    })
}

fn saved_view<S: DefinitionStore>(
    views: &mut Views<S>,
    view_path: &str,
    fields: Vec<(&str, Attribute)>,
    template: &str,
) -> View {
    let mut view = View::from_fields(view_path, fields);
    view.template = Some(template.to_string());
    views
        .save(&mut view, &mut Messages::new(), false)
        .expect("view should save");
    view
}

/// Data source that fails every time it runs
struct Broken;

impl Producer for Broken {
    fn handle(&self) -> &str {
        "broken"
    }

    fn produce(
        &self,
        _output: &mut ParameterRegister,
        _request: &RequestData,
    ) -> Result<Option<Fragment>, ProducerError> {
        Err(ProducerError::Failed("backend unavailable".to_string()))
    }
}

#[test]
fn test_dependent_data_source_runs_after_its_dependency() {
    let mut views = Views::new(MemoryStore::new());
    let mut view = saved_view(
        &mut views,
        "blog",
        vec![
            ("title", Attribute::from("Blog")),
            ("data-sources", Attribute::from(vec!["b", "a"])),
        ],
        "<p>{$from-b}</p>",
    );

    let mut registry = ProducerRegistry::new();
    registry.register_data_source(producer("a", &[], &[("from-a", "alpha")]));
    registry.register_data_source(producer("b", &["a"], &[("from-b", "{$from-a} then beta")]));

    let mut engine = TokenEngine::new().unwrap();
    let mut renderer = Renderer::new(&registry, &mut engine);
    let document = renderer
        .compose(&view, &mut ParameterRegister::new())
        .unwrap();
    assert_eq!(
        document.child_names(document.root()),
        vec!["events", "a", "b", "parameters"]
    );

    let mut params = ParameterRegister::new();
    params.set("from-b", "caller");
    let rendered = renderer.render(&mut view, &mut params, None).unwrap();
    assert_eq!(rendered.body, b"<p>alpha then beta</p>".to_vec());
    assert_eq!(params.get("from-b").unwrap().to_string(), "alpha then beta");
    assert_eq!(renderer.state(), RenderState::Done);
}

#[test]
fn test_event_that_cannot_trigger_contributes_nothing() {
    let settings = config::parse(
        r#"
events:
  - handle: subscribe
    trigger-on: email
    parameters:
      subscribed: "yes"
    items: [ok]
"#,
    )
    .unwrap();
    let registry = ProducerRegistry::from_settings(&settings);
    let mut view = View::from_fields(
        "newsletter",
        vec![
            ("title", Attribute::from("Newsletter")),
            ("events", Attribute::from(vec!["subscribe"])),
        ],
    );
    view.template = Some("<p/>".to_string());

    let mut engine = TokenEngine::new().unwrap();
    let mut params = ParameterRegister::new();
    let document = Renderer::new(&registry, &mut engine)
        .compose(&view, &mut params)
        .unwrap();
    assert!(document.find("/data/events/subscribe").is_none());
    assert!(!params.contains("subscribed"));

    let mut request = RequestData::new();
    request.insert("email".to_string(), "reader@example.com".to_string());
    let mut params = ParameterRegister::new();
    let document = Renderer::new(&registry, &mut engine)
        .with_request(request)
        .compose(&view, &mut params)
        .unwrap();
    assert_eq!(document.select("/data/events/subscribe/item").unwrap(), "ok");
    assert_eq!(params.get("subscribed").unwrap().to_string(), "yes");
}

#[test]
fn test_failing_producer_becomes_error_fragment() {
    let mut registry = ProducerRegistry::new();
    registry.register_data_source(Broken);
    registry.register_data_source(producer("after", &[], &[("after", "ran")]));
    let view = View::from_fields(
        "status",
        vec![
            ("title", Attribute::from("Status")),
            ("data-sources", Attribute::from(vec!["broken", "after"])),
        ],
    );

    let mut engine = TokenEngine::new().unwrap();
    let mut params = ParameterRegister::new();
    let document = Renderer::new(&registry, &mut engine)
        .compose(&view, &mut params)
        .unwrap();
    let error = document.find("/data/error").unwrap();
    assert_eq!(document.attribute(error, "producer"), Some("broken"));
    assert_eq!(document.attribute(error, "type"), Some("failed"));
    assert_eq!(params.get("after").unwrap().to_string(), "ran");
}

#[test]
fn test_unknown_producer_fails_the_render() {
    let registry = ProducerRegistry::new();
    let mut view = View::from_fields(
        "home",
        vec![
            ("title", Attribute::from("Home")),
            ("data-sources", Attribute::from(vec!["missing"])),
        ],
    );
    view.template = Some("<p/>".to_string());

    let mut engine = TokenEngine::new().unwrap();
    let mut renderer = Renderer::new(&registry, &mut engine);
    let err = renderer
        .render(&mut view, &mut ParameterRegister::new(), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(renderer.state(), RenderState::Error);
}

#[test]
fn test_singleton_type_collision() {
    let mut views = Views::new(MemoryStore::new());
    let mut home = saved_view(
        &mut views,
        "home",
        vec![
            ("title", Attribute::from("Home")),
            ("types", Attribute::from(vec!["index"])),
        ],
        "<p/>",
    );

    // Saving the holder again is not a collision with itself.
    assert!(views.save(&mut home, &mut Messages::new(), false).unwrap());

    let mut other = View::from_fields(
        "welcome",
        vec![
            ("title", Attribute::from("Welcome")),
            ("types", Attribute::from(vec!["index"])),
        ],
    );
    other.template = Some("<p/>".to_string());
    let mut messages = Messages::new();
    let err = views.save(&mut other, &mut messages, false).unwrap_err();
    assert!(matches!(err, Error::ValidationFailed { .. }));
    assert_eq!(
        messages.for_field("types").collect::<Vec<_>>(),
        vec!["A view of type \"index\" already exists."]
    );
    assert!(!views.store().exists("welcome"));
}

#[test]
fn test_url_parameter_arity() {
    let mut views = Views::new(MemoryStore::new());
    saved_view(
        &mut views,
        "about",
        vec![("title", Attribute::from("About"))],
        "<p/>",
    );
    saved_view(
        &mut views,
        "articles",
        vec![
            ("title", Attribute::from("Articles")),
            ("url-parameters", Attribute::from(vec!["year"])),
        ],
        "<p/>",
    );

    let err = views.load_from_url("/about/team/").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterArityMismatch);
    assert!(matches!(err, Error::DoesNotAcceptParameters { .. }));

    let err = views.load_from_url("/articles/2024/05/").unwrap_err();
    assert!(matches!(
        err,
        Error::TooManyParameters {
            supplied: 2,
            accepted: 1,
            ..
        }
    ));

    let view = views.load_from_url("/articles/2024/").unwrap();
    assert_eq!(view.parameters().get("year").unwrap().to_string(), "2024");
}

#[test]
fn test_ancestry() {
    let mut views = Views::new(MemoryStore::new());
    let blog = saved_view(
        &mut views,
        "blog",
        vec![("title", Attribute::from("Blog"))],
        "<p/>",
    );
    saved_view(
        &mut views,
        "blog/articles",
        vec![("title", Attribute::from("Articles"))],
        "<p/>",
    );
    let tags = saved_view(
        &mut views,
        "blog/articles/tags",
        vec![("title", Attribute::from("Tags"))],
        "<p/>",
    );

    assert!(views.is_child_of(&tags, &blog).unwrap());
    assert!(!views.is_child_of(&blog, &tags).unwrap());
    assert_eq!(views.count_parents(&tags).unwrap(), 2);
    assert_eq!(views.page_title(&tags).unwrap(), "Blog: Articles: Tags");
}

#[test]
fn test_disk_store_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut views = Views::new(DiskStore::new(temp.path()));
    saved_view(
        &mut views,
        "blog",
        vec![("title", Attribute::from("Blog"))],
        "<p/>",
    );
    let saved = saved_view(
        &mut views,
        "blog/articles",
        vec![
            ("title", Attribute::from("Articles")),
            ("url-parameters", Attribute::from(vec!["year", "month"])),
            ("types", Attribute::from(vec!["archive"])),
        ],
        "<ul/>",
    );
    assert!(temp
        .path()
        .join("blog/articles/articles.config.xml")
        .exists());
    assert!(temp.path().join("blog/articles/articles.xsl").exists());

    let reopened = Views::new(DiskStore::new(temp.path()));
    let loaded = reopened.load_from_path("blog/articles", None).unwrap();
    assert_eq!(loaded.guid(), saved.guid());
    assert_eq!(loaded.title, "Articles");
    assert_eq!(loaded.url_parameters, vec!["year", "month"]);
    assert_eq!(loaded.template.as_deref(), Some("<ul/>"));
    assert_eq!(reopened.used_types().unwrap(), vec!["archive"]);
}

#[test]
fn test_hooks_see_every_stage() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut delegates = Delegates::new();
    for hook in [
        "FrontendEventsAppend",
        "FrontendDataSourcesAppend",
        "FrontendParamsPostResolve",
        "FrontendTemplatePreRender",
    ] {
        let seen = Rc::clone(&seen);
        delegates.subscribe(hook, "/frontend/", move |payload: &mut HookPayload<'_>| {
            seen.borrow_mut().push(payload.hook().to_string());
        });
    }

    let registry = ProducerRegistry::new();
    let mut engine = TokenEngine::new().unwrap();
    let mut view = View::from_fields("home", vec![("title", Attribute::from("Home"))]);
    view.template = Some("<p/>".to_string());
    Renderer::new(&registry, &mut engine)
        .with_hooks(&delegates)
        .render(&mut view, &mut ParameterRegister::new(), None)
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            "FrontendEventsAppend",
            "FrontendDataSourcesAppend",
            "FrontendParamsPostResolve",
            "FrontendTemplatePreRender",
        ]
    );
}

/// Engine that records the working directory and options it ran with
#[derive(Default)]
struct CwdEngine {
    seen: Option<PathBuf>,
    options: TransformOptions,
}

impl TemplateEngine for CwdEngine {
    fn transform(
        &mut self,
        _document: &Document,
        template: &str,
        _format: OutputFormat,
        _params: &BTreeMap<String, String>,
        options: &TransformOptions,
    ) -> Vec<u8> {
        self.seen = std::env::current_dir().ok();
        self.options = options.clone();
        template.as_bytes().to_vec()
    }

    fn has_errors(&self) -> bool {
        false
    }
}

#[test]
#[serial]
fn test_transform_runs_in_workspace() {
    let workspace = TempDir::new().unwrap();
    let before = std::env::current_dir().unwrap();

    let registry = ProducerRegistry::new();
    let mut engine = CwdEngine::default();
    let mut view = View::from_fields("home", vec![("title", Attribute::from("Home"))]);
    view.template = Some("<p/>".to_string());
    Renderer::new(&registry, &mut engine)
        .with_workspace(workspace.path())
        .render(&mut view, &mut ParameterRegister::new(), None)
        .unwrap();

    assert_eq!(
        engine.seen.unwrap().canonicalize().unwrap(),
        workspace.path().canonicalize().unwrap()
    );
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_options_reach_the_engine() {
    let registry = ProducerRegistry::new();
    let mut engine = CwdEngine::default();
    let mut view = View::from_fields("home", vec![("title", Attribute::from("Home"))]);
    view.template = Some("<p/>".to_string());

    let mut options = TransformOptions::new();
    options.insert("indent".to_string(), "yes".to_string());
    let rendered = Renderer::new(&registry, &mut engine)
        .with_options(options.clone())
        .render(&mut view, &mut ParameterRegister::new(), None)
        .unwrap();

    assert_eq!(engine.options, options);
    assert_eq!(rendered.content_type, "text/html;charset=utf-8");
}
