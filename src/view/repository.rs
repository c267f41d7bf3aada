//! View repository: loading, navigation and persistence
//!
//! [`Views`] wraps a [`DefinitionStore`] and turns its raw files into
//! [`View`] values. Views refer to their parent and children by path only;
//! every navigation step is resolved through the store on demand. Attach a
//! [`ViewCache`] to avoid re-parsing definitions during repeated walks.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::definition;
use super::{Messages, View};
use crate::cache::ViewCache;
use crate::defaults::SINGLETON_TYPES;
use crate::error::{Error, Result};
use crate::path;
use crate::store::DefinitionStore;

/// A view tree backed by a definition store
#[derive(Debug)]
pub struct Views<S> {
    store: S,
    cache: Option<ViewCache>,
}

impl<S: DefinitionStore> Views<S> {
    pub fn new(store: S) -> Self {
        Self { store, cache: None }
    }

    /// Resolve lookups through `cache`
    pub fn with_cache(mut self, cache: ViewCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the view at `view_path`, binding `params` positionally to its
    /// declared URL parameters when given.
    pub fn load_from_path(&self, view_path: &str, params: Option<&[String]>) -> Result<View> {
        let view_path = path::checked(view_path)?;
        let mut view = self.load(&view_path)?;
        if let Some(values) = params {
            view.bind_parameters(values)?;
        }
        Ok(view)
    }

    /// Resolve a URL path to a view. Leading segments are consumed as
    /// directories for as long as they exist; the rest become positional
    /// parameters.
    pub fn load_from_url(&self, url: &str) -> Result<View> {
        let url_path = path::checked(url)?;
        let segments = path::segments(&url_path);
        let mut view_path = String::new();
        let mut consumed = 0;
        for segment in &segments {
            let candidate = path::join(&view_path, segment);
            if !self.store.is_dir(&candidate) {
                break;
            }
            view_path = candidate;
            consumed += 1;
        }

        let params: Vec<String> = segments[consumed..].iter().map(|s| s.to_string()).collect();
        debug!(
            "url {} resolved to view '{}' with {} parameter(s)",
            url,
            view_path,
            params.len()
        );
        if params.is_empty() {
            self.load_from_path(&view_path, None)
        } else {
            self.load_from_path(&view_path, Some(&params))
        }
    }

    /// The parent of `view`, `None` for a root view
    pub fn parent(&self, view: &View) -> Result<Option<View>> {
        if view.is_root() {
            return Ok(None);
        }
        match view.parent_path() {
            Some(parent_path) => self.load(&parent_path).map(Some),
            None => Ok(None),
        }
    }

    /// The immediate children of `view`
    pub fn children(&self, view: &View) -> Result<Children<'_, S>> {
        self.children_of(view.path())
    }

    /// The views at the top of the tree
    pub fn roots(&self) -> Result<Children<'_, S>> {
        self.children_of("")
    }

    fn children_of(&self, view_path: &str) -> Result<Children<'_, S>> {
        let paths = self
            .store
            .child_handles(view_path)?
            .into_iter()
            .map(|handle| path::join(view_path, &handle))
            .collect();
        Ok(Children {
            views: self,
            paths,
            position: 0,
        })
    }

    /// Whether `other` is a strict ancestor of `view`, compared by guid
    pub fn is_child_of(&self, view: &View, other: &View) -> Result<bool> {
        let mut current = self.parent(view)?;
        while let Some(ancestor) = current {
            if ancestor.guid().is_some() && ancestor.guid() == other.guid() {
                return Ok(true);
            }
            current = self.parent(&ancestor)?;
        }
        Ok(false)
    }

    /// Number of ancestors above `view`
    pub fn count_parents(&self, view: &View) -> Result<usize> {
        let mut count = 0;
        let mut current = self.parent(view)?;
        while let Some(ancestor) = current {
            count += 1;
            current = self.parent(&ancestor)?;
        }
        Ok(count)
    }

    /// Title prefixed with every ancestor's title: `Blog: Articles`
    pub fn page_title(&self, view: &View) -> Result<String> {
        let mut title = view.title.clone();
        let mut current = self.parent(view)?;
        while let Some(ancestor) = current {
            title = format!("{}: {}", ancestor.title, title);
            current = self.parent(&ancestor)?;
        }
        Ok(title)
    }

    /// Every view in the tree, each parent before its children.
    ///
    /// Definitions that fail to parse are skipped with a warning.
    pub fn all(&self) -> Result<Vec<View>> {
        let mut found = Vec::new();
        self.collect_all("", &mut found)?;
        Ok(found)
    }

    fn collect_all(&self, view_path: &str, found: &mut Vec<View>) -> Result<()> {
        for handle in self.store.child_handles(view_path)? {
            let child_path = path::join(view_path, &handle);
            match self.load(&child_path) {
                Ok(view) => found.push(view),
                Err(e) => warn!("skipping view {}: {}", child_path, e),
            }
            self.collect_all(&child_path, found)?;
        }
        Ok(())
    }

    /// Views tagged with `tag`, keyed by guid
    pub fn find_from_type(&self, tag: &str) -> Result<BTreeMap<String, View>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|view| view.has_type(tag))
            .filter_map(|view| view.guid().map(str::to_string).map(|guid| (guid, view)))
            .collect())
    }

    /// Distinct type tags in use, in first-seen order
    pub fn used_types(&self) -> Result<Vec<String>> {
        let mut types: Vec<String> = Vec::new();
        for view in self.all()? {
            for tag in view.types {
                if !types.contains(&tag) {
                    types.push(tag);
                }
            }
        }
        Ok(types)
    }

    /// Validate and persist `view`.
    ///
    /// Every problem found is appended to `messages` and the call fails with
    /// `ValidationFailed` before anything is written. With `simulate` set,
    /// a valid view is not written.
    pub fn save(&mut self, view: &mut View, messages: &mut Messages, simulate: bool) -> Result<bool> {
        let problems = self.validate(view)?;
        if !problems.is_empty() {
            messages.extend(&problems);
            return Err(Error::ValidationFailed { messages: problems });
        }

        if !simulate {
            view.ensure_guid();
            let config = definition::to_xml(view)?;
            let template = view.template.clone().unwrap_or_default();
            self.store.store(view.path(), &config, &template)?;
            self.invalidate();
            debug!("saved view {}", view.path());
        }
        Ok(true)
    }

    fn validate(&self, view: &View) -> Result<Messages> {
        let mut problems = Messages::new();

        if view.title.trim().is_empty() {
            problems.append("title", "Title is required.");
        }

        if self.store.exists(view.path()) {
            let existing = self.load_uncached(view.path())?;
            if existing.guid() != view.guid() {
                problems.append("handle", "A view with that handle already exists.");
            }
        }

        for tag in &view.types {
            if !SINGLETON_TYPES.contains(&tag.as_str()) {
                continue;
            }
            let mut holders = self.find_from_type(tag)?;
            if let Some(guid) = view.guid() {
                holders.remove(guid);
            }
            if !holders.is_empty() {
                problems.append("types", format!("A view of type \"{}\" already exists.", tag));
                break;
            }
        }

        match view.template.as_deref() {
            Some(template) if !template.trim().is_empty() => {
                if let Err(e) = definition::check_well_formed(template) {
                    problems.append(
                        "template",
                        format!(
                            "This document is not well formed. The following error was returned: {}",
                            e
                        ),
                    );
                }
            }
            _ => problems.append("template", "Template is required, and cannot be empty."),
        }

        Ok(problems)
    }

    /// Move `view` and its subtree to `dest`.
    ///
    /// The configuration file, the template file and the directory are
    /// renamed one after another; a failure part way leaves the tree half
    /// moved.
    pub fn move_view(&mut self, view: &mut View, dest: &str) -> Result<()> {
        let dest = path::checked(dest)?;
        if dest.is_empty()
            || dest == view.path()
            || dest.starts_with(&format!("{}/", view.path()))
        {
            return Err(Error::write_failure(
                dest,
                format!("cannot move {} into itself", view.path()),
            ));
        }
        self.store.rename(view.path(), &dest)?;
        debug!("moved view {} to {}", view.path(), dest);
        view.relocate(&dest);
        self.invalidate();

        // A definition without a declared guid derives it from its path.
        let moved = self.load_uncached(&dest)?;
        view.guid = moved.guid;
        Ok(())
    }

    /// Delete the view at `view_path`.
    ///
    /// Without `cascade`, each direct child is first lifted one level up
    /// the tree; with it, children are deleted along with the view.
    pub fn delete(&mut self, view_path: &str, cascade: bool) -> Result<()> {
        let view = self.load_from_path(view_path, None)?;

        if !cascade {
            let children: Vec<View> = self.children(&view)?.collect::<Result<_>>()?;
            for mut child in children {
                let dest = path::lift(child.path());
                self.move_view(&mut child, &dest)?;
            }
        }

        self.store.delete(view.path())?;
        self.invalidate();
        debug!("deleted view {} (cascade: {})", view.path(), cascade);
        Ok(())
    }

    fn load(&self, view_path: &str) -> Result<View> {
        match &self.cache {
            Some(cache) => cache.get_or_load(view_path, || self.load_uncached(view_path)),
            None => self.load_uncached(view_path),
        }
    }

    fn load_uncached(&self, view_path: &str) -> Result<View> {
        let definition = self.store.load(view_path)?;
        definition::parse(view_path, &definition)
    }

    fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// Restartable iterator over the children of a view.
///
/// The child list is read from the store once; each view is loaded as the
/// iterator reaches it.
pub struct Children<'a, S> {
    views: &'a Views<S>,
    paths: Vec<String>,
    position: usize,
}

impl<S: DefinitionStore> Children<'_, S> {
    /// Start again from the first child
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of children
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: DefinitionStore> Iterator for Children<'_, S> {
    type Item = Result<View>;

    fn next(&mut self) -> Option<Self::Item> {
        let child_path = self.paths.get(self.position)?;
        self.position += 1;
        Some(self.views.load(child_path))
    }
}
