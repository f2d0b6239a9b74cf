// PatternStoreRegistry: the process-wide set of per-language pattern tables.
//
// Each language moves through a small state machine:
//
//   Raw(source) --prepare--> Ready(table)
//   Loading     --finish---> Ready(table) | Failed(error)
//
// Raw sources are prepared on first use. Loading is entered only by the
// async loader path, and always leaves it, so a wait on the registry cannot
// hang on a failed load. Ready and Failed are terminal for the session;
// adding exceptions rebuilds a Ready table in place with a fresh cache.

use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use hyph_core::language::{LanguageError, LanguageTag};
use parking_lot::RwLock;

use crate::PatternError;
use crate::exceptions::parse_exception_list;
use crate::format::PatternSource;
use crate::loader::PatternLoader;
use crate::table::{PatternTable, StoreOptions};

/// Registry-level errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error(transparent)]
    InvalidLanguage(#[from] LanguageError),
    #[error("patterns for {0} are still loading")]
    NotReady(LanguageTag),
    #[error("failed to load patterns for {language}: {source}")]
    LoadFailed {
        language: LanguageTag,
        source: Arc<PatternError>,
    },
    #[error("malformed exception list: {0}")]
    MalformedExceptions(Arc<PatternError>),
    #[error("timed out waiting for patterns: {}", display_tags(.pending))]
    Timeout { pending: Vec<LanguageTag> },
}

fn display_tags(tags: &[LanguageTag]) -> String {
    tags.iter()
        .map(LanguageTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Public view of a language's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageStatus {
    /// Data supplied, not yet prepared.
    Raw,
    /// An async load is in flight.
    Loading,
    /// Prepared and queryable.
    Ready,
    /// Loading or preparation failed.
    Failed,
}

/// Polling policy for [`PatternStoreRegistry::wait_until_ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            max_attempts: 1000,
        }
    }
}

#[derive(Debug)]
enum Slot {
    Raw(Box<PatternSource>),
    Loading,
    Ready(Arc<PatternTable>),
    Failed(Arc<PatternError>),
}

impl Slot {
    fn status(&self) -> LanguageStatus {
        match self {
            Slot::Raw(_) => LanguageStatus::Raw,
            Slot::Loading => LanguageStatus::Loading,
            Slot::Ready(_) => LanguageStatus::Ready,
            Slot::Failed(_) => LanguageStatus::Failed,
        }
    }
}

/// Caller-added exception lists.
#[derive(Debug, Default)]
struct ExtraExceptions {
    per_language: HashMap<LanguageTag, Vec<String>>,
    global: Vec<String>,
}

impl ExtraExceptions {
    /// Lists for `language` in merge order: its own lists, then global ones.
    fn lists_for(&self, language: &LanguageTag) -> Vec<String> {
        self.per_language
            .get(language)
            .into_iter()
            .flatten()
            .chain(&self.global)
            .cloned()
            .collect()
    }
}

/// Shared per-language pattern tables.
pub struct PatternStoreRegistry {
    options: StoreOptions,
    slots: RwLock<HashMap<LanguageTag, Slot>>,
    exceptions: RwLock<ExtraExceptions>,
    loader: Option<Arc<dyn PatternLoader>>,
}

impl std::fmt::Debug for PatternStoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternStoreRegistry")
            .field("options", &self.options)
            .field("languages", &self.languages())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

impl PatternStoreRegistry {
    /// An empty registry. Tables must be supplied with [`insert`](Self::insert)
    /// or loaded asynchronously.
    pub fn new(options: StoreOptions) -> Self {
        let exceptions = ExtraExceptions {
            global: options.global_exceptions.clone(),
            ..ExtraExceptions::default()
        };
        Self {
            options,
            slots: RwLock::new(HashMap::new()),
            exceptions: RwLock::new(exceptions),
            loader: None,
        }
    }

    /// A registry that falls back to `loader` for languages it has no data for.
    pub fn with_loader(options: StoreOptions, loader: Arc<dyn PatternLoader>) -> Self {
        Self {
            loader: Some(loader),
            ..Self::new(options)
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Supply raw data for `language`. Replaces any earlier data for the same
    /// code; the new data is prepared on first use.
    pub fn insert(
        &self,
        language: &str,
        source: PatternSource,
    ) -> Result<LanguageTag, StoreError> {
        let tag = LanguageTag::parse(language)?;
        let previous = self
            .slots
            .write()
            .insert(tag.clone(), Slot::Raw(Box::new(source)));
        if previous.is_some() {
            log::debug!("replaced pattern data for {tag}");
        }
        Ok(tag)
    }

    /// Resolve `language` to the code of a table this registry has or can load:
    /// the full code first, then its primary subtag.
    pub fn resolve(&self, language: &str) -> Result<LanguageTag, StoreError> {
        let tag = LanguageTag::parse(language)?;
        let slots = self.slots.read();
        for candidate in tag.candidates() {
            let known = slots.keys().any(|k| k.as_str() == candidate)
                || self.loader.as_ref().is_some_and(|l| l.supports(candidate));
            if known {
                return Ok(LanguageTag::parse(candidate)?);
            }
        }
        Err(StoreError::UnsupportedLanguage(tag.to_string()))
    }

    pub fn supports(&self, language: &str) -> bool {
        self.resolve(language).is_ok()
    }

    /// State of `language` after fallback resolution, or `None` if the registry
    /// has no entry for it.
    pub fn state(&self, language: &str) -> Option<LanguageStatus> {
        let tag = self.resolve(language).ok()?;
        self.slots.read().get(&tag).map(Slot::status)
    }

    /// Every language with an entry, sorted.
    pub fn languages(&self) -> Vec<LanguageTag> {
        let mut languages: Vec<_> = self.slots.read().keys().cloned().collect();
        languages.sort();
        languages
    }

    /// The prepared table for `language`, preparing it on first use.
    pub fn table(&self, language: &str) -> Result<Arc<PatternTable>, StoreError> {
        let tag = self.resolve(language)?;

        let source = match self.slots.read().get(&tag) {
            Some(Slot::Ready(table)) => return Ok(Arc::clone(table)),
            Some(Slot::Failed(err)) => {
                return Err(StoreError::LoadFailed {
                    language: tag,
                    source: Arc::clone(err),
                });
            }
            Some(Slot::Loading) => return Err(StoreError::NotReady(tag)),
            Some(Slot::Raw(source)) => Some(source.as_ref().clone()),
            None => None,
        };

        let source = match source {
            Some(source) => Ok(source),
            None => match &self.loader {
                Some(loader) => loader.load(tag.as_str()),
                None => return Err(StoreError::UnsupportedLanguage(tag.to_string())),
            },
        };

        self.settle(&tag, source)
    }

    /// Prepare `language` now. A no-op for a language that is already Ready.
    pub fn prepare(&self, language: &str) -> Result<(), StoreError> {
        self.table(language).map(drop)
    }

    /// Add an exception list for one language. The list is stored under the
    /// table `language` resolves to, or under `language` itself when nothing
    /// resolves yet. A Ready table is rebuilt with the merged exceptions and an
    /// empty cache.
    pub fn add_exceptions(&self, language: &str, list: &str) -> Result<(), StoreError> {
        let parsed = LanguageTag::parse(language)?;
        let tag = self.resolve(language).unwrap_or(parsed);
        parse_exception_list(list).map_err(|e| StoreError::MalformedExceptions(Arc::new(e)))?;
        self.exceptions
            .write()
            .per_language
            .entry(tag.clone())
            .or_default()
            .push(list.to_string());
        self.rebuild(|t| *t == tag)
    }

    /// Add an exception list for every language, merged after each language's
    /// own lists.
    pub fn add_global_exceptions(&self, list: &str) -> Result<(), StoreError> {
        parse_exception_list(list).map_err(|e| StoreError::MalformedExceptions(Arc::new(e)))?;
        self.exceptions.write().global.push(list.to_string());
        self.rebuild(|_| true)
    }

    fn rebuild(&self, affected: impl Fn(&LanguageTag) -> bool) -> Result<(), StoreError> {
        let exceptions = self.exceptions.read();
        let mut slots = self.slots.write();
        for (tag, slot) in slots.iter_mut() {
            if !affected(tag) {
                continue;
            }
            if let Slot::Ready(table) = slot {
                let lists = exceptions.lists_for(tag);
                let rebuilt = table
                    .with_exceptions(lists.iter().map(String::as_str))
                    .map_err(|e| StoreError::MalformedExceptions(Arc::new(e)))?;
                log::debug!("rebuilt {tag} with {} exceptions", rebuilt.exceptions().len());
                *table = Arc::new(rebuilt);
            }
        }
        Ok(())
    }

    /// Prepare `source` for `tag` and record the outcome. If another caller
    /// settled the language first, its table is kept.
    fn settle(
        &self,
        tag: &LanguageTag,
        source: Result<PatternSource, PatternError>,
    ) -> Result<Arc<PatternTable>, StoreError> {
        let prepared = source.and_then(|source| {
            let lists = self.exceptions.read().lists_for(tag);
            PatternTable::prepare(
                tag.clone(),
                &source,
                lists.iter().map(String::as_str),
                &self.options,
            )
        });

        let mut slots = self.slots.write();
        if let Some(Slot::Ready(existing)) = slots.get(tag) {
            return Ok(Arc::clone(existing));
        }
        match prepared {
            Ok(table) => {
                let table = Arc::new(table);
                slots.insert(tag.clone(), Slot::Ready(Arc::clone(&table)));
                Ok(table)
            }
            Err(err) => {
                log::warn!("patterns for {tag} failed to load: {err}");
                let err = Arc::new(err);
                slots.insert(tag.clone(), Slot::Failed(Arc::clone(&err)));
                Err(StoreError::LoadFailed {
                    language: tag.clone(),
                    source: err,
                })
            }
        }
    }
}

#[cfg(feature = "async")]
mod nonblocking {
    use std::sync::Arc;

    use hyph_core::language::LanguageTag;

    use super::{PatternStoreRegistry, Slot, StoreError, WaitPolicy};
    use crate::loader::AsyncPatternLoader;

    impl PatternStoreRegistry {
        /// Start one load task per requested language the registry has no
        /// entry for. Must be called from within a tokio runtime.
        ///
        /// Returns the languages a task was started for. Languages neither
        /// known to the registry nor supported by `loader` are skipped and
        /// surface as unsupported when their table is requested.
        pub fn load_async<L: AsyncPatternLoader>(
            self: &Arc<Self>,
            languages: &[&str],
            loader: Arc<L>,
        ) -> Vec<LanguageTag> {
            let mut started = Vec::new();
            for &language in languages {
                let Ok(tag) = LanguageTag::parse(language) else {
                    log::warn!("ignoring invalid language code {language:?}");
                    continue;
                };
                let Some(target) = self.claim(&tag, loader.as_ref()) else {
                    continue;
                };

                log::debug!("loading patterns for {target} in the background");
                let registry = Arc::clone(self);
                let loader = Arc::clone(&loader);
                let task_tag = target.clone();
                tokio::spawn(async move {
                    let source = loader.load(task_tag.as_str()).await;
                    // Errors are recorded in the slot.
                    let _ = registry.settle(&task_tag, source);
                });
                started.push(target);
            }
            started
        }

        /// Mark the first loadable candidate of `tag` as Loading. `None` when
        /// a candidate already has an entry or nothing can load it.
        fn claim<L: AsyncPatternLoader>(
            &self,
            tag: &LanguageTag,
            loader: &L,
        ) -> Option<LanguageTag> {
            let mut slots = self.slots.write();
            for candidate in tag.candidates() {
                if slots.keys().any(|k| k.as_str() == candidate) {
                    return None;
                }
                if loader.supports(candidate) {
                    let target = LanguageTag::parse(candidate).ok()?;
                    slots.insert(target.clone(), Slot::Loading);
                    return Some(target);
                }
            }
            None
        }

        /// Wait until none of `languages` is still loading.
        ///
        /// Polls every `policy.interval`; after `policy.max_attempts` polls the
        /// languages still loading are returned as [`StoreError::Timeout`].
        /// Dropping the future abandons the wait without affecting the loads.
        pub async fn wait_until_ready(
            &self,
            languages: &[&str],
            policy: WaitPolicy,
        ) -> Result<(), StoreError> {
            let mut attempts = 0;
            loop {
                let pending = self.pending(languages);
                if pending.is_empty() {
                    return Ok(());
                }
                if attempts >= policy.max_attempts {
                    log::warn!("gave up waiting for {} languages", pending.len());
                    return Err(StoreError::Timeout { pending });
                }
                attempts += 1;
                tokio::time::sleep(policy.interval).await;
            }
        }

        /// Start loads for `languages` and wait for all of them to settle.
        pub async fn ensure_languages<L: AsyncPatternLoader>(
            self: &Arc<Self>,
            languages: &[&str],
            loader: Arc<L>,
            policy: WaitPolicy,
        ) -> Result<(), StoreError> {
            self.load_async(languages, loader);
            self.wait_until_ready(languages, policy).await
        }

        fn pending(&self, languages: &[&str]) -> Vec<LanguageTag> {
            let slots = self.slots.read();
            let mut pending = Vec::new();
            for &language in languages {
                let Ok(tag) = LanguageTag::parse(language) else {
                    continue;
                };
                let loading = tag.candidates().find_map(|candidate| {
                    slots
                        .iter()
                        .find(|(k, _)| k.as_str() == candidate)
                        .map(|(k, slot)| (k, matches!(slot, Slot::Loading)))
                });
                if let Some((key, true)) = loading {
                    if !pending.contains(key) {
                        pending.push(key.clone());
                    }
                }
            }
            pending
        }
    }
}
