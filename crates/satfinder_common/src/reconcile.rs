//! Reconciler - resolves one query across encyclopedia, entity store and catalog
//!
//! Summaries prefer the local language; catalog names prefer the
//! international one. Every chain stops at the first non-empty answer.

use crate::claims::{EntityRecord, PROP_COSPAR_ID, PROP_LAUNCH_DATE, PROP_NORAD_ID};
use crate::error::SatError;
use crate::sources::{Catalog, Encyclopedia, EntityStore, HttpSources};
use crate::types::{CatalogRecord, Lang, LanguagePair, ResultRecord, SourceRef, SummaryRecord};
use tracing::{debug, info};

/// Progress reported while a query resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SearchingTitles,
    ResolvingEntity,
    LoadingSummary,
    SearchingCatalog,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::SearchingTitles => "Searching encyclopedia titles",
            Stage::ResolvingEntity => "Resolving entity record",
            Stage::LoadingSummary => "Loading summary",
            Stage::SearchingCatalog => "Searching orbital catalog",
        }
    }
}

/// Titles found for one language: canonical (entity site link) and search hit
#[derive(Debug, Default)]
struct LangTitles {
    canonical: Option<String>,
    searched: Option<String>,
}

pub struct Reconciler<'a> {
    encyclopedia: &'a dyn Encyclopedia,
    entities: &'a dyn EntityStore,
    catalog: &'a dyn Catalog,
    languages: LanguagePair,
    progress: Option<Box<dyn Fn(Stage) + 'a>>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        encyclopedia: &'a dyn Encyclopedia,
        entities: &'a dyn EntityStore,
        catalog: &'a dyn Catalog,
        languages: LanguagePair,
    ) -> Self {
        Self {
            encyclopedia,
            entities,
            catalog,
            languages,
            progress: None,
        }
    }

    pub fn from_sources(sources: &'a HttpSources, languages: LanguagePair) -> Self {
        Self::new(
            &sources.encyclopedia,
            &sources.entities,
            &sources.catalog,
            languages,
        )
    }

    /// Report each stage to `callback` (spinners, logs)
    pub fn with_progress(mut self, callback: impl Fn(Stage) + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    fn report(&self, stage: Stage) {
        debug!("{}", stage.label());
        if let Some(progress) = &self.progress {
            progress(stage);
        }
    }

    /// Resolve `query` into a merged fact sheet.
    ///
    /// With `exact_first`, the raw query is tried against the catalog before
    /// any resolved title.
    pub fn resolve(&self, query: &str, exact_first: bool) -> Result<ResultRecord, SatError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SatError::EmptyQuery);
        }

        let local = &self.languages.local;
        let intl = &self.languages.international;

        // 1. Search both languages
        self.report(Stage::SearchingTitles);
        let mut local_titles = LangTitles {
            searched: self.encyclopedia.search_title(query, local),
            ..Default::default()
        };
        let mut intl_titles = LangTitles {
            searched: self.encyclopedia.search_title(query, intl),
            ..Default::default()
        };
        debug!(
            "Search hits: {}={:?} {}={:?}",
            local, local_titles.searched, intl, intl_titles.searched
        );

        if local_titles.searched.is_none() && intl_titles.searched.is_none() {
            return Err(SatError::NotFound {
                query: query.to_string(),
            });
        }

        // 2-3. Entity id (local title first), then its record and site links
        self.report(Stage::ResolvingEntity);
        let entity = self.resolve_entity(&local_titles, &intl_titles);
        if let Some(entity) = &entity {
            local_titles.canonical = entity.title_for(local).map(str::to_string);
            intl_titles.canonical = entity.title_for(intl).map(str::to_string);
        }

        // 4. Summary: local canonical, local search, intl canonical, intl search
        self.report(Stage::LoadingSummary);
        let (summary, summary_source) = self
            .resolve_summary(&local_titles, &intl_titles)
            .ok_or_else(|| SatError::SummaryUnavailable {
                query: query.to_string(),
            })?;

        // 5. Catalog: raw query (optional), then intl canonical, intl search,
        //    local canonical, local search
        self.report(Stage::SearchingCatalog);
        let catalog_hit = self.resolve_catalog(query, exact_first, &local_titles, &intl_titles);

        // 6. Claims
        let claim = |property: &str| entity.as_ref().and_then(|e| e.claim(property));
        let launch_date = claim(PROP_LAUNCH_DATE);
        let cospar_id = claim(PROP_COSPAR_ID);
        let norad_id = claim(PROP_NORAD_ID);

        let (catalog, catalog_match) = match catalog_hit {
            Some((record, matched)) => (Some(record), Some(matched)),
            None => (None, None),
        };

        info!(
            "Resolved '{}' -> [{}] {} (entity: {}, catalog: {})",
            query,
            summary_source.lang,
            summary_source.title,
            entity
                .as_ref()
                .and_then(|e| e.id.as_ref())
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string()),
            catalog_match.as_deref().unwrap_or("none"),
        );

        // 7. Merge
        Ok(ResultRecord {
            query: query.to_string(),
            summary,
            summary_source,
            entity_id: entity.and_then(|e| e.id),
            launch_date,
            cospar_id,
            norad_id,
            catalog,
            catalog_match,
        })
    }

    fn resolve_entity(&self, local: &LangTitles, intl: &LangTitles) -> Option<EntityRecord> {
        let candidates = [
            (&self.languages.local, local.searched.as_deref()),
            (&self.languages.international, intl.searched.as_deref()),
        ];

        let id = candidates
            .into_iter()
            .filter_map(|(lang, title)| Some((lang, title?)))
            .find_map(|(lang, title)| {
                let id = self.encyclopedia.entity_id(title, lang);
                debug!("Entity id for [{}] {}: {:?}", lang, title, id);
                id
            })?;

        let mut entity = self.entities.entity(&id)?;
        if entity.id.is_none() {
            entity.id = Some(id);
        }
        Some(entity)
    }

    fn resolve_summary(
        &self,
        local: &LangTitles,
        intl: &LangTitles,
    ) -> Option<(SummaryRecord, SourceRef)> {
        let local_lang = &self.languages.local;
        let intl_lang = &self.languages.international;
        let candidates: [(&Lang, Option<&str>); 4] = [
            (local_lang, local.canonical.as_deref()),
            (local_lang, local.searched.as_deref()),
            (intl_lang, intl.canonical.as_deref()),
            (intl_lang, intl.searched.as_deref()),
        ];

        candidates
            .into_iter()
            .filter_map(|(lang, title)| Some((lang, title?)))
            .find_map(|(lang, title)| {
                let summary = self
                    .encyclopedia
                    .summary(title, lang)
                    .filter(|summary| !summary.is_empty());
                debug!("Summary [{}] {}: {}", lang, title, hit(summary.is_some()));

                summary.map(|summary| {
                    let source = SourceRef {
                        lang: lang.clone(),
                        title: title.to_string(),
                    };
                    (summary, source)
                })
            })
    }

    fn resolve_catalog(
        &self,
        query: &str,
        exact_first: bool,
        local: &LangTitles,
        intl: &LangTitles,
    ) -> Option<(CatalogRecord, String)> {
        let exact = exact_first.then_some(query);
        let candidates = [
            exact,
            intl.canonical.as_deref(),
            intl.searched.as_deref(),
            local.canonical.as_deref(),
            local.searched.as_deref(),
        ];

        candidates.into_iter().flatten().find_map(|name| {
            let record = self.catalog.lookup(name);
            debug!("Catalog '{}': {}", name, hit(record.is_some()));
            record.map(|record| (record, name.to_string()))
        })
    }
}

fn hit(found: bool) -> &'static str {
    if found {
        "hit"
    } else {
        "miss"
    }
}
