//! PostgreSQL implementation of the translation synchronizer's store.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use realty_core::translation_sync::{EntityTranslations, NewTranslation, TranslationStore};
use realty_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::models::translation::{
    PartnerTranslation, ProjectTranslation, TranslationRow, TranslationTable,
    PARTNER_TRANSLATIONS, PROJECT_TRANSLATIONS,
};
use crate::repositories::translation_repo::{group_by_entity, TranslationRepo};

/// A translation row type that can be loaded from any translation table.
pub trait StoredTranslation:
    TranslationRow + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin
{
}

impl<R> StoredTranslation for R where
    R: TranslationRow + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin
{
}

/// [`TranslationStore`] over one translation table.
///
/// `create_many` maps to `INSERT .. ON CONFLICT (entity, language) DO
/// NOTHING`, relying on the table's unique constraint for race safety.
///
/// `find_with_translations` also remembers each entity's non-localized name
/// from the same read, available through [`Self::entity_name`].
pub struct PgTranslationStore<'a, R> {
    pool: &'a PgPool,
    table: &'static TranslationTable,
    names: Mutex<HashMap<DbId, String>>,
    _row: PhantomData<fn() -> R>,
}

impl<'a, R> PgTranslationStore<'a, R> {
    pub fn new(pool: &'a PgPool, table: &'static TranslationTable) -> Self {
        Self {
            pool,
            table,
            names: Mutex::new(HashMap::new()),
            _row: PhantomData,
        }
    }

    pub fn table(&self) -> &'static TranslationTable {
        self.table
    }

    /// Name of an entity as of the last `find_with_translations` call.
    pub fn entity_name(&self, id: DbId) -> Option<String> {
        self.names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

/// Store for `partner_translations`.
pub fn partner_store(pool: &PgPool) -> PgTranslationStore<'_, PartnerTranslation> {
    PgTranslationStore::new(pool, &PARTNER_TRANSLATIONS)
}

/// Store for `project_translations`.
pub fn project_store(pool: &PgPool) -> PgTranslationStore<'_, ProjectTranslation> {
    PgTranslationStore::new(pool, &PROJECT_TRANSLATIONS)
}

#[async_trait]
impl<'a, R: StoredTranslation> TranslationStore for PgTranslationStore<'a, R> {
    type Key = DbId;
    type Row = R;
    type Error = sqlx::Error;

    async fn create_many(&self, rows: Vec<NewTranslation<DbId>>) -> Result<u64, sqlx::Error> {
        TranslationRepo::insert_many_skip_duplicates(self.pool, self.table, &rows).await
    }

    /// Two queries regardless of entity count: entities with their names,
    /// then every translation row of the table.
    async fn find_with_translations(
        &self,
    ) -> Result<Vec<EntityTranslations<DbId, R>>, sqlx::Error> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", self.table.entity_table);
        let entities: Vec<(DbId, String)> = sqlx::query_as(&query).fetch_all(self.pool).await?;

        let rows = TranslationRepo::list_all::<R>(self.pool, self.table).await?;
        let mut grouped = group_by_entity(rows);

        let mut names = HashMap::with_capacity(entities.len());
        let found = entities
            .into_iter()
            .map(|(id, name)| {
                names.insert(id, name);
                EntityTranslations {
                    entity_id: id,
                    translations: grouped.remove(&id).unwrap_or_default(),
                }
            })
            .collect();
        *self.names.lock().unwrap_or_else(PoisonError::into_inner) = names;

        Ok(found)
    }
}
