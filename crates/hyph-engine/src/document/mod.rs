// Document passes: apply or remove hyphenation across a tree of elements.
//
// A pass has two phases. The gather phase walks the tree in document order
// and records an `ElementState` for every element that qualifies: selected
// by class (or a custom selector) itself or through an ancestor, and not
// inside an excluded tag or an opted-out subtree. The process phase then
// rewrites the direct text children of each recorded element.
//
// Languages are inherited: an element's own language, else the nearest
// ancestor's, else the document's, else the configured default.

pub mod tree;

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hashbrown::{HashMap, HashSet};
use hyph_patterns::PatternTable;

use crate::config::IntermediateState;
use crate::error::HyphError;
use crate::handle::Hyphenator;
use crate::text::{hyphenate_run, remove_markers};

/// Tags whose subtrees are never hyphenated.
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "code", "pre", "style", "textarea", "input", "button", "option", "label", "select",
    "samp", "kbd", "var", "abbr", "acronym", "sub", "sup", "math", "svg", "img", "br",
];

/// Whether elements with `tag` are skipped with all their descendants.
pub fn is_excluded_tag(tag: &str) -> bool {
    EXCLUDED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// A tree of text-bearing nodes owned by the caller.
///
/// Nodes are either elements (with a tag name) or text nodes (with text).
pub trait Document {
    type NodeId: Copy + Eq + Hash + Debug;

    fn root(&self) -> Self::NodeId;

    /// Child nodes of `node` in document order.
    fn children(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    /// Text of a text node; `None` for elements.
    fn text(&self, node: Self::NodeId) -> Option<&str>;

    fn set_text(&mut self, node: Self::NodeId, text: String);

    /// Tag name of an element; `None` for text nodes.
    fn tag_name(&self, node: Self::NodeId) -> Option<&str>;

    /// The element's own language attribute.
    fn language(&self, node: Self::NodeId) -> Option<&str>;

    fn has_class(&self, node: Self::NodeId, class: &str) -> bool;

    /// Whether the element has opted out of hyphenation.
    fn is_opted_out(&self, node: Self::NodeId, opt_out_class: &str) -> bool {
        self.has_class(node, opt_out_class)
    }

    fn is_hidden(&self, _node: Self::NodeId) -> bool {
        false
    }

    fn set_hidden(&mut self, _node: Self::NodeId, _hidden: bool) {}

    /// Document-wide language, used when no element declares one.
    fn document_language(&self) -> Option<&str> {
        None
    }
}

/// Bookkeeping for one element of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState<N> {
    /// Effective language code, if any could be determined.
    pub language: Option<String>,
    /// Visibility before the pass touched the element.
    pub was_hidden: bool,
    /// Whether this is the final element of the pass.
    pub is_last: bool,
    /// The outermost selected ancestor (the element itself for a root).
    pub selection_root: N,
}

/// Which direction a pass went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Apply,
    Remove,
}

/// Summary of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub kind: PassKind,
    /// Elements whose text children were processed.
    pub elements: usize,
    /// Text nodes whose content changed.
    pub runs_changed: usize,
    /// Words passed through the hyphenator.
    pub words: usize,
    /// Errors reported through the error callback.
    pub errors: usize,
}

impl PassReport {
    fn new(kind: PassKind) -> Self {
        Self {
            kind,
            elements: 0,
            runs_changed: 0,
            words: 0,
            errors: 0,
        }
    }
}

type Selector<'h, D> = Box<dyn Fn(&D, <D as Document>::NodeId) -> bool + Send + Sync + 'h>;

/// Per-document pass state.
pub struct DocumentSession<'h, D: Document> {
    hyphenator: &'h Hyphenator,
    selector: Option<Selector<'h, D>>,
    cancel: Option<Arc<AtomicBool>>,
    order: Vec<D::NodeId>,
    states: HashMap<D::NodeId, ElementState<D::NodeId>>,
    hyphenated: bool,
}

impl<'h, D: Document> DocumentSession<'h, D> {
    pub fn new(hyphenator: &'h Hyphenator) -> Self {
        Self {
            hyphenator,
            selector: None,
            cancel: None,
            order: Vec::new(),
            states: HashMap::new(),
            hyphenated: false,
        }
    }

    /// Replace the class test that selects elements for hyphenation.
    pub fn with_selector(
        mut self,
        selector: impl Fn(&D, D::NodeId) -> bool + Send + Sync + 'h,
    ) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Abort a pass at the next element boundary once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether the last completed pass applied hyphenation.
    pub fn is_hyphenated(&self) -> bool {
        self.hyphenated
    }

    /// State recorded for `node` by the most recent pass.
    pub fn element_state(&self, node: D::NodeId) -> Option<&ElementState<D::NodeId>> {
        self.states.get(&node)
    }

    /// Elements of the most recent pass, in document order.
    pub fn elements(&self) -> &[D::NodeId] {
        &self.order
    }

    /// Distinct effective languages of the selected elements.
    pub fn languages(&mut self, doc: &D) -> Vec<String> {
        self.gather(doc);
        let mut seen = HashSet::new();
        self.order
            .iter()
            .filter_map(|node| self.states[node].language.clone())
            .filter(|lang| seen.insert(lang.clone()))
            .collect()
    }

    /// Insert break markers into every qualifying text run.
    pub fn apply(&mut self, doc: &mut D) -> Result<PassReport, HyphError> {
        self.run(doc, PassKind::Apply)
    }

    /// Strip break markers from every qualifying text run.
    pub fn remove(&mut self, doc: &mut D) -> Result<PassReport, HyphError> {
        self.run(doc, PassKind::Remove)
    }

    /// Apply when the document is plain, remove when it is hyphenated.
    pub fn toggle(&mut self, doc: &mut D) -> Result<PassReport, HyphError> {
        if self.hyphenated {
            self.remove(doc)
        } else {
            self.apply(doc)
        }
    }

    fn run(&mut self, doc: &mut D, kind: PassKind) -> Result<PassReport, HyphError> {
        self.gather(doc);
        let mut pass = Pass::new(kind);
        for index in 0..self.order.len() {
            self.step(doc, index, &mut pass)?;
        }
        Ok(self.finish(doc, pass))
    }

    /// Record the qualifying elements of `doc` in document order.
    fn gather(&mut self, doc: &D) {
        let config = self.hyphenator.config();
        let fallback = doc
            .document_language()
            .map(str::to_string)
            .or_else(|| config.default_language.clone());

        self.order.clear();
        self.states.clear();

        // (node, inherited language, selection root of the nearest selected ancestor)
        let mut stack: Vec<(D::NodeId, Option<String>, Option<D::NodeId>)> =
            vec![(doc.root(), None, None)];
        while let Some((node, inherited, root)) = stack.pop() {
            let Some(tag) = doc.tag_name(node) else {
                continue;
            };
            if is_excluded_tag(tag) || doc.is_opted_out(node, &config.dont_hyphenate_class) {
                continue;
            }

            let language = doc.language(node).map(str::to_string).or(inherited);
            let root = root.or_else(|| self.is_selected(doc, node).then_some(node));
            if let Some(selection_root) = root {
                self.order.push(node);
                self.states.insert(
                    node,
                    ElementState {
                        language: language.clone().or_else(|| fallback.clone()),
                        was_hidden: doc.is_hidden(node),
                        is_last: false,
                        selection_root,
                    },
                );
            }

            for child in doc.children(node).into_iter().rev() {
                if doc.tag_name(child).is_some() {
                    stack.push((child, language.clone(), root));
                }
            }
        }

        if let Some(state) = self.order.last().and_then(|n| self.states.get_mut(n)) {
            state.is_last = true;
        }
        log::debug!("gathered {} elements", self.order.len());
    }

    fn is_selected(&self, doc: &D, node: D::NodeId) -> bool {
        match &self.selector {
            Some(selector) => selector(doc, node),
            None => doc.has_class(node, &self.hyphenator.config().hyphenate_class),
        }
    }

    /// Process the element at `index` of the gathered order.
    fn step(
        &self,
        doc: &mut D,
        index: usize,
        pass: &mut Pass<D::NodeId>,
    ) -> Result<(), HyphError> {
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        if cancelled {
            self.restore(doc, pass);
            log::debug!("pass cancelled after {} elements", pass.report.elements);
            return Err(HyphError::Cancelled);
        }

        let node = self.order[index];
        let state = &self.states[&node];
        if self.hyphenator.config().intermediate_state == IntermediateState::Hidden
            && pass.hidden_root != Some(state.selection_root)
        {
            self.restore(doc, pass);
            let root = state.selection_root;
            doc.set_hidden(root, true);
            pass.hidden_root = Some(root);
        }

        let table = match pass.report.kind {
            PassKind::Apply => match self.table_for(node, pass) {
                Some(table) => Some(table),
                None => return Ok(()),
            },
            PassKind::Remove => None,
        };

        pass.report.elements += 1;
        let markers = self.hyphenator.markers();
        let config = self.hyphenator.config();
        for child in doc.children(node) {
            let Some(text) = doc.text(child) else {
                continue;
            };
            let updated = match &table {
                Some(table) => {
                    let outcome = hyphenate_run(
                        table,
                        &markers,
                        config.orphan_control,
                        &config.callbacks,
                        text,
                    );
                    pass.report.words += outcome.words;
                    outcome.text
                }
                None => remove_markers(&markers, text),
            };
            if updated != text {
                doc.set_text(child, updated);
                pass.report.runs_changed += 1;
            }
        }
        Ok(())
    }

    /// The table for `node`'s language, reporting a missing or unusable
    /// language once per pass.
    fn table_for(
        &self,
        node: D::NodeId,
        pass: &mut Pass<D::NodeId>,
    ) -> Option<Arc<PatternTable>> {
        let language = self.states[&node].language.as_deref();
        let key = language.unwrap_or_default().to_string();
        let result = match language {
            Some(language) => self
                .hyphenator
                .registry()
                .table(language)
                .map_err(HyphError::from),
            None => Err(HyphError::MissingLanguage),
        };
        match result {
            Ok(table) => Some(table),
            Err(err) => {
                if pass.reported.insert(key) {
                    self.report(&err, pass);
                }
                None
            }
        }
    }

    fn report(&self, err: &HyphError, pass: &mut Pass<D::NodeId>) {
        log::warn!("hyphenation skipped: {err}");
        self.hyphenator.config().callbacks.error(err);
        pass.report.errors += 1;
    }

    /// Give the currently hidden selection root its previous visibility back.
    fn restore(&self, doc: &mut D, pass: &mut Pass<D::NodeId>) {
        if let Some(root) = pass.hidden_root.take() {
            let was_hidden = self.states.get(&root).is_some_and(|s| s.was_hidden);
            doc.set_hidden(root, was_hidden);
        }
    }

    fn finish(&mut self, doc: &mut D, mut pass: Pass<D::NodeId>) -> PassReport {
        self.restore(doc, &mut pass);
        self.hyphenated = pass.report.kind == PassKind::Apply;
        let report = pass.report;
        log::debug!(
            "{:?} pass done: {} elements, {} runs changed, {} words, {} errors",
            report.kind,
            report.elements,
            report.runs_changed,
            report.words,
            report.errors
        );
        self.hyphenator.config().callbacks.complete(&report);
        report
    }
}

#[cfg(feature = "async")]
impl<'h, D: Document> DocumentSession<'h, D> {
    /// Start loads for every language of `doc` the registry has no entry for.
    ///
    /// Does nothing unless remote loading is enabled.
    pub fn load_languages<L: hyph_patterns::AsyncPatternLoader>(
        &mut self,
        doc: &D,
        loader: Arc<L>,
    ) {
        if !self.hyphenator.config().remote_loading {
            return;
        }
        let languages = self.languages(doc);
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
        self.hyphenator.registry().load_async(&languages, loader);
    }

    /// Like [`apply`](Self::apply), but first waits for every language of
    /// `doc` to settle and yields to the scheduler between elements.
    pub async fn apply_async(&mut self, doc: &mut D) -> Result<PassReport, HyphError> {
        let languages = self.languages(doc);
        let waiting: Vec<&str> = languages.iter().map(String::as_str).collect();
        self.hyphenator
            .registry()
            .wait_until_ready(&waiting, self.hyphenator.config().wait_policy)
            .await
            .map_err(|err| {
                log::warn!("languages did not settle: {err}");
                HyphError::from(err)
            })?;

        self.gather(doc);
        let mut pass = Pass::new(PassKind::Apply);
        for index in 0..self.order.len() {
            self.step(doc, index, &mut pass)?;
            tokio::task::yield_now().await;
        }
        Ok(self.finish(doc, pass))
    }
}

/// Mutable state of one running pass.
struct Pass<N> {
    report: PassReport,
    hidden_root: Option<N>,
    /// Languages already reported as unusable.
    reported: HashSet<String>,
}

impl<N> Pass<N> {
    fn new(kind: PassKind) -> Self {
        Self {
            report: PassReport::new(kind),
            hidden_root: None,
            reported: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_tags_match_case_insensitively() {
        assert!(is_excluded_tag("code"));
        assert!(is_excluded_tag("PRE"));
        assert!(is_excluded_tag("svg"));
        assert!(!is_excluded_tag("p"));
        assert!(!is_excluded_tag("span"));
    }

    #[test]
    fn exclusion_set_is_complete() {
        assert_eq!(EXCLUDED_TAGS.len(), 21);
    }
}
