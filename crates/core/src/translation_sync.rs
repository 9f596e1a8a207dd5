//! Translation completeness synchronization.
//!
//! Every translatable entity (partner, project) must own exactly one
//! translation row per supported language. [`TranslationSynchronizer`]
//! finds the languages an entity lacks and inserts placeholder rows for
//! them through a [`TranslationStore`].
//!
//! Uniqueness of `(entity, language)` is the store's job: `create_many`
//! must skip rows that already exist, so two callers backfilling the same
//! entity at the same time cannot produce duplicates.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::languages::SupportedLanguages;

/// Localized column name -> value, used as defaults for backfilled rows.
pub type FieldMap = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Store capability
// ---------------------------------------------------------------------------

/// Anything that carries a language code.
pub trait Translated {
    fn language(&self) -> &str;
}

impl Translated for String {
    fn language(&self) -> &str {
        self
    }
}

/// A translation row to be inserted.
///
/// Holds exactly the entity reference, the language, and the caller's
/// default fields. Stores must not add columns of their own beyond what
/// the table defaults provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTranslation<K> {
    /// Foreign-key column naming the owning entity (e.g. `partner_id`).
    pub entity_field: String,
    pub entity_id: K,
    pub language: String,
    pub fields: FieldMap,
}

/// An entity together with its eagerly loaded translation rows.
#[derive(Debug, Clone)]
pub struct EntityTranslations<K, R> {
    pub entity_id: K,
    pub translations: Vec<R>,
}

/// The two operations the synchronizer needs from persistence.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    type Key: Clone + fmt::Display + Send + Sync;
    type Row: Translated + Send + Sync;
    type Error: Send;

    /// Insert all `rows`, silently skipping any `(entity, language)` pair
    /// that already exists. Returns the number of rows actually inserted.
    async fn create_many(&self, rows: Vec<NewTranslation<Self::Key>>) -> Result<u64, Self::Error>;

    /// Every entity of this kind with its translations, in store order.
    async fn find_with_translations(
        &self,
    ) -> Result<Vec<EntityTranslations<Self::Key, Self::Row>>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Totals for a batch run over every entity of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub total_entities: usize,
    /// Rows the store reported as inserted.
    pub total_created: u64,
}

/// Result of backfilling a single entity.
struct Backfill {
    languages: Vec<String>,
    inserted: u64,
}

pub struct TranslationSynchronizer<'a, S> {
    store: &'a S,
    languages: &'a SupportedLanguages,
}

impl<'a, S: TranslationStore> TranslationSynchronizer<'a, S> {
    pub fn new(store: &'a S, languages: &'a SupportedLanguages) -> Self {
        Self { store, languages }
    }

    /// Supported languages absent from `existing`, in configured order.
    ///
    /// Duplicate rows count once; rows in unsupported languages are ignored.
    pub fn missing_languages<R: Translated>(&self, existing: &[R]) -> Vec<String> {
        let present: HashSet<&str> = existing.iter().map(|t| t.language()).collect();
        self.languages
            .codes()
            .iter()
            .filter(|code| !present.contains(code.as_str()))
            .cloned()
            .collect()
    }

    /// Backfill the languages one entity is missing.
    ///
    /// `existing` must reflect the persisted rows at call time; it is not
    /// re-read. Issues at most one `create_many` and none when the entity
    /// is already complete. Returns the languages that were missing.
    pub async fn sync_one<R>(
        &self,
        entity_id: S::Key,
        entity_field: &str,
        existing: &[R],
        defaults: &FieldMap,
    ) -> Result<Vec<String>, S::Error>
    where
        R: Translated + Sync,
    {
        let backfill = self
            .backfill(entity_id, entity_field, existing, defaults)
            .await?;
        Ok(backfill.languages)
    }

    /// Backfill every entity of the store's kind, one entity at a time.
    ///
    /// The first store error aborts the run; entities already processed
    /// keep their inserted rows.
    pub async fn sync_all<F>(
        &self,
        entity_field: &str,
        defaults_fn: F,
    ) -> Result<SyncReport, S::Error>
    where
        F: Fn(&S::Key) -> FieldMap,
    {
        let entities = self.store.find_with_translations().await?;
        let mut report = SyncReport {
            total_entities: entities.len(),
            total_created: 0,
        };

        for entity in &entities {
            let defaults = defaults_fn(&entity.entity_id);
            match self
                .backfill(
                    entity.entity_id.clone(),
                    entity_field,
                    &entity.translations,
                    &defaults,
                )
                .await
            {
                Ok(backfill) => report.total_created += backfill.inserted,
                Err(e) => {
                    tracing::warn!(
                        entity_field,
                        entity_id = %entity.entity_id,
                        created_so_far = report.total_created,
                        "Translation sync aborted",
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            entity_field,
            total_entities = report.total_entities,
            total_created = report.total_created,
            "Translation sync complete",
        );
        Ok(report)
    }

    /// Like [`sync_all`](Self::sync_all), but with up to `limit` entities
    /// in flight at once. Each entity is still written by a single
    /// `create_many`. A `limit` of 0 is treated as 1.
    pub async fn sync_all_concurrent<F>(
        &self,
        entity_field: &str,
        defaults_fn: F,
        limit: usize,
    ) -> Result<SyncReport, S::Error>
    where
        F: Fn(&S::Key) -> FieldMap,
    {
        let entities = self.store.find_with_translations().await?;
        let mut report = SyncReport {
            total_entities: entities.len(),
            total_created: 0,
        };

        // Entities must be owned by their futures: a borrowing iterator
        // makes this future non-`Send`.
        let mut results = stream::iter(entities.into_iter().map(|entity| {
            let defaults = defaults_fn(&entity.entity_id);
            async move {
                self.backfill(
                    entity.entity_id.clone(),
                    entity_field,
                    &entity.translations,
                    &defaults,
                )
                .await
            }
        }))
        .buffer_unordered(limit.max(1));

        while let Some(result) = results.next().await {
            match result {
                Ok(backfill) => report.total_created += backfill.inserted,
                Err(e) => {
                    tracing::warn!(
                        entity_field,
                        created_so_far = report.total_created,
                        "Concurrent translation sync aborted",
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            entity_field,
            total_entities = report.total_entities,
            total_created = report.total_created,
            limit,
            "Translation sync complete",
        );
        Ok(report)
    }

    async fn backfill<R>(
        &self,
        entity_id: S::Key,
        entity_field: &str,
        existing: &[R],
        defaults: &FieldMap,
    ) -> Result<Backfill, S::Error>
    where
        R: Translated + Sync,
    {
        let missing = self.missing_languages(existing);
        if missing.is_empty() {
            return Ok(Backfill {
                languages: missing,
                inserted: 0,
            });
        }

        let rows = missing
            .iter()
            .map(|language| NewTranslation {
                entity_field: entity_field.to_string(),
                entity_id: entity_id.clone(),
                language: language.clone(),
                fields: defaults.clone(),
            })
            .collect();

        let inserted = self.store.create_many(rows).await?;
        tracing::debug!(
            entity_field,
            entity_id = %entity_id,
            languages = ?missing,
            inserted,
            "Backfilled translations",
        );

        Ok(Backfill {
            languages: missing,
            inserted,
        })
    }
}
