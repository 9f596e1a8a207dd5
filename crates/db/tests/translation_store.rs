//! Integration tests for the PostgreSQL translation store and repository.
//!
//! Covers:
//! - Skip-duplicate bulk inserts and their reported counts
//! - Column whitelisting for dynamically built SQL
//! - Backfilling through `TranslationSynchronizer`
//! - Per-language upserts

use std::collections::HashSet;

use assert_matches::assert_matches;
use realty_core::languages::SupportedLanguages;
use realty_core::translation_sync::{
    FieldMap, NewTranslation, TranslationStore, TranslationSynchronizer,
};
use realty_db::models::partner::CreatePartner;
use realty_db::models::project::CreateProject;
use realty_db::models::translation::{
    PartnerTranslation, ProjectTranslation, PARTNER_TRANSLATIONS, PROJECT_TRANSLATIONS,
};
use realty_db::repositories::{PartnerRepo, ProjectRepo, TranslationRepo};
use realty_db::translation_store::{partner_store, project_store};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn languages() -> SupportedLanguages {
    SupportedLanguages::parse("en,ka,ru").unwrap()
}

async fn seed_partner(pool: &PgPool, name: &str) -> i64 {
    PartnerRepo::create(
        pool,
        &CreatePartner {
            name: name.to_string(),
            logo_url: None,
            website: None,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            partner_id: None,
            name: name.to_string(),
            status: None,
            city: None,
            image_url: None,
            completion_year: None,
            is_featured: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn partner_row(partner_id: i64, language: &str, name: &str) -> NewTranslation<i64> {
    NewTranslation {
        entity_field: "partner_id".to_string(),
        entity_id: partner_id,
        language: language.to_string(),
        fields: FieldMap::from([("name".to_string(), name.to_string())]),
    }
}

async fn partner_languages(pool: &PgPool, partner_id: i64) -> Vec<String> {
    TranslationRepo::list_for_entity::<PartnerTranslation>(pool, &PARTNER_TRANSLATIONS, partner_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.language)
        .collect()
}

// ---------------------------------------------------------------------------
// create_many
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_skips_existing_pairs(pool: PgPool) {
    let partner_id = seed_partner(&pool, "Archi").await;
    let store = partner_store(&pool);

    let inserted = store
        .create_many(vec![partner_row(partner_id, "en", "Archi")])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let inserted = store
        .create_many(vec![
            partner_row(partner_id, "en", "Overwritten?"),
            partner_row(partner_id, "ka", "არქი"),
        ])
        .await
        .unwrap();
    assert_eq!(inserted, 1, "existing (partner, en) is skipped");

    let rows =
        TranslationRepo::list_for_entity::<PartnerTranslation>(&pool, &PARTNER_TRANSLATIONS, partner_id)
            .await
            .unwrap();
    assert_eq!(rows.len(), 2);
    let en = rows.iter().find(|r| r.language == "en").unwrap();
    assert_eq!(en.name, "Archi", "skipped row must not overwrite content");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_empty_batch_is_noop(pool: PgPool) {
    let store = partner_store(&pool);
    assert_eq!(store.create_many(Vec::new()).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_mixed_field_sets(pool: PgPool) {
    let project_id = seed_project(&pool, "Skyline").await;
    let store = project_store(&pool);

    let mut with_address = NewTranslation {
        entity_field: "project_id".to_string(),
        entity_id: project_id,
        language: "en".to_string(),
        fields: FieldMap::from([
            ("name".to_string(), "Skyline".to_string()),
            ("address".to_string(), "1 Rustaveli Ave".to_string()),
        ]),
    };
    let name_only = NewTranslation {
        language: "ka".to_string(),
        fields: FieldMap::from([("name".to_string(), "სქაილაინი".to_string())]),
        ..with_address.clone()
    };
    with_address.fields.insert("description".to_string(), String::new());

    let inserted = store.create_many(vec![with_address, name_only]).await.unwrap();
    assert_eq!(inserted, 2);

    let rows =
        TranslationRepo::list_for_entity::<ProjectTranslation>(&pool, &PROJECT_TRANSLATIONS, project_id)
            .await
            .unwrap();
    let ka = rows.iter().find(|r| r.language == "ka").unwrap();
    assert_eq!(ka.address, "", "omitted column takes the table default");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_rejects_unknown_column(pool: PgPool) {
    let partner_id = seed_partner(&pool, "Archi").await;
    let store = partner_store(&pool);

    let mut row = partner_row(partner_id, "en", "Archi");
    row.fields
        .insert("name; DROP TABLE partners".to_string(), String::new());

    let err = store.create_many(vec![row]).await.unwrap_err();
    assert_matches!(err, sqlx::Error::ColumnNotFound(_));
    assert!(partner_languages(&pool, partner_id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_rejects_wrong_entity_field(pool: PgPool) {
    let partner_id = seed_partner(&pool, "Archi").await;
    let store = partner_store(&pool);

    let mut row = partner_row(partner_id, "en", "Archi");
    row.entity_field = "project_id".to_string();

    let err = store.create_many(vec![row]).await.unwrap_err();
    assert_matches!(err, sqlx::Error::ColumnNotFound(ref c) if c == "partner_translations.project_id");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_many_missing_entity_propagates_fk_error(pool: PgPool) {
    let store = partner_store(&pool);
    let err = store
        .create_many(vec![partner_row(999_999, "en", "Ghost")])
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("Expected foreign key violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// find_with_translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_with_translations_includes_bare_entities(pool: PgPool) {
    let a = seed_partner(&pool, "A").await;
    let b = seed_partner(&pool, "B").await;
    let store = partner_store(&pool);
    store
        .create_many(vec![partner_row(a, "en", "A"), partner_row(a, "ru", "А")])
        .await
        .unwrap();

    let entities = store.find_with_translations().await.unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].entity_id, a);
    assert_eq!(entities[0].translations.len(), 2);
    assert_eq!(entities[1].entity_id, b);
    assert!(entities[1].translations.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_with_translations_records_entity_names(pool: PgPool) {
    let a = seed_project(&pool, "Skyline").await;
    let store = project_store(&pool);
    assert_eq!(store.entity_name(a), None);

    store.find_with_translations().await.unwrap();
    assert_eq!(store.entity_name(a).as_deref(), Some("Skyline"));

    // Entities created after the read stay unknown until the next one.
    let b = seed_project(&pool, "Riverside").await;
    assert_eq!(store.entity_name(b), None);

    store.find_with_translations().await.unwrap();
    assert_eq!(store.entity_name(b).as_deref(), Some("Riverside"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_all_defaults_from_entity_names(pool: PgPool) {
    let a = seed_project(&pool, "Skyline").await;
    let b = seed_project(&pool, "Riverside").await;
    let store = project_store(&pool);
    let langs = languages();

    let report = TranslationSynchronizer::new(&store, &langs)
        .sync_all("project_id", |id| {
            let mut fields = PROJECT_TRANSLATIONS.empty_fields();
            if let Some(name) = store.entity_name(*id) {
                fields.insert("name".to_string(), name);
            }
            fields
        })
        .await
        .unwrap();
    assert_eq!(report.total_created, 6);

    for (id, name) in [(a, "Skyline"), (b, "Riverside")] {
        let rows = TranslationRepo::list_for_entity::<ProjectTranslation>(
            &pool,
            &PROJECT_TRANSLATIONS,
            id,
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|t| t.name == name));
    }
}

// ---------------------------------------------------------------------------
// Synchronizer over Postgres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_one_backfills_missing_languages(pool: PgPool) {
    let partner_id = seed_partner(&pool, "Archi").await;
    let store = partner_store(&pool);
    store
        .create_many(vec![partner_row(partner_id, "ka", "არქი")])
        .await
        .unwrap();

    let langs = languages();
    let sync = TranslationSynchronizer::new(&store, &langs);
    let existing =
        TranslationRepo::list_for_entity::<PartnerTranslation>(&pool, &PARTNER_TRANSLATIONS, partner_id)
            .await
            .unwrap();
    let defaults = FieldMap::from([("name".to_string(), "Archi".to_string())]);

    let created = sync
        .sync_one(partner_id, "partner_id", &existing, &defaults)
        .await
        .unwrap();
    assert_eq!(created, ["en", "ru"]);

    let rows =
        TranslationRepo::list_for_entity::<PartnerTranslation>(&pool, &PARTNER_TRANSLATIONS, partner_id)
            .await
            .unwrap();
    assert_eq!(rows.len(), 3);
    let ka = rows.iter().find(|r| r.language == "ka").unwrap();
    assert_eq!(ka.name, "არქი", "existing translation untouched");
    let ru = rows.iter().find(|r| r.language == "ru").unwrap();
    assert_eq!(ru.name, "Archi");
    assert_eq!(ru.description, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_all_is_idempotent(pool: PgPool) {
    let first = seed_project(&pool, "First").await;
    let second = seed_project(&pool, "Second").await;
    let store = project_store(&pool);
    let langs = languages();
    let sync = TranslationSynchronizer::new(&store, &langs);

    let report = sync
        .sync_all("project_id", |_| PROJECT_TRANSLATIONS.empty_fields())
        .await
        .unwrap();
    assert_eq!(report.total_entities, 2);
    assert_eq!(report.total_created, 6);

    let again = sync
        .sync_all("project_id", |_| PROJECT_TRANSLATIONS.empty_fields())
        .await
        .unwrap();
    assert_eq!(again.total_entities, 2);
    assert_eq!(again.total_created, 0);

    for id in [first, second] {
        let rows =
            TranslationRepo::list_for_entity::<ProjectTranslation>(&pool, &PROJECT_TRANSLATIONS, id)
                .await
                .unwrap();
        let codes: HashSet<_> = rows.iter().map(|r| r.language.as_str()).collect();
        assert_eq!(codes, HashSet::from(["en", "ka", "ru"]));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_all_keeps_unsupported_languages(pool: PgPool) {
    let partner_id = seed_partner(&pool, "Archi").await;
    let store = partner_store(&pool);
    store
        .create_many(vec![partner_row(partner_id, "de", "Archi GmbH")])
        .await
        .unwrap();

    let langs = languages();
    let report = TranslationSynchronizer::new(&store, &langs)
        .sync_all("partner_id", |_| FieldMap::new())
        .await
        .unwrap();
    assert_eq!(report.total_created, 3);

    let mut codes = partner_languages(&pool, partner_id).await;
    codes.sort();
    assert_eq!(codes, ["de", "en", "ka", "ru"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_all_concurrent_matches_sequential(pool: PgPool) {
    for i in 0..5 {
        seed_partner(&pool, &format!("P{i}")).await;
    }
    let store = partner_store(&pool);
    let langs = languages();

    let report = TranslationSynchronizer::new(&store, &langs)
        .sync_all_concurrent("partner_id", |_| FieldMap::new(), 3)
        .await
        .unwrap();
    assert_eq!(report.total_entities, 5);
    assert_eq!(report.total_created, 15);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM partner_translations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 15);
}

// ---------------------------------------------------------------------------
// upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_inserts_then_updates_given_columns(pool: PgPool) {
    let project_id = seed_project(&pool, "Skyline").await;

    let created: ProjectTranslation = TranslationRepo::upsert(
        &pool,
        &PROJECT_TRANSLATIONS,
        project_id,
        "en",
        &FieldMap::from([
            ("name".to_string(), "Skyline".to_string()),
            ("address".to_string(), "1 Rustaveli Ave".to_string()),
        ]),
    )
    .await
    .unwrap();
    assert_eq!(created.address, "1 Rustaveli Ave");

    let updated: ProjectTranslation = TranslationRepo::upsert(
        &pool,
        &PROJECT_TRANSLATIONS,
        project_id,
        "en",
        &FieldMap::from([("name".to_string(), "Skyline Towers".to_string())]),
    )
    .await
    .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Skyline Towers");
    assert_eq!(updated.address, "1 Rustaveli Ave", "omitted column kept");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_entities_batches(pool: PgPool) {
    let a = seed_partner(&pool, "A").await;
    let b = seed_partner(&pool, "B").await;
    let c = seed_partner(&pool, "C").await;
    let store = partner_store(&pool);
    store
        .create_many(vec![
            partner_row(a, "en", "A"),
            partner_row(b, "en", "B"),
            partner_row(c, "en", "C"),
        ])
        .await
        .unwrap();

    let rows: Vec<PartnerTranslation> =
        TranslationRepo::list_for_entities(&pool, &PARTNER_TRANSLATIONS, &[a, c])
            .await
            .unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.partner_id).collect();
    assert_eq!(ids, [a, c]);

    let none: Vec<PartnerTranslation> =
        TranslationRepo::list_for_entities(&pool, &PARTNER_TRANSLATIONS, &[])
            .await
            .unwrap();
    assert!(none.is_empty());
}
