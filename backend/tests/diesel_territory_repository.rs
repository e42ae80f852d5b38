//! Integration tests for `DieselTerritoryRepository` against embedded
//! PostgreSQL.
//!
//! Each test provisions its own migrated database. When the embedded cluster
//! cannot be started the tests print a skip marker and return, unless
//! `REQUIRE_TEST_CLUSTER` is set.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use serde_json::json;
use territory_backend::domain::ports::{TerritoryRepository, TerritoryRepositoryError};
use territory_backend::domain::{
    Demographics, SeedOutcome, Territory, TerritoryId, seed_sample_territories,
};
use territory_backend::outbound::persistence::{
    DbPool, DieselTerritoryRepository, PoolConfig, tracking_scope,
};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::{
    delete_raw_territory, insert_raw_territory, provision_database, read_raw_demographics,
    write_raw_demographics,
};
use support::handle_cluster_setup_failure;

struct TestContext {
    /// Tokio runtime reused for all async operations in this test.
    runtime: Runtime,
    repository: DieselTerritoryRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database()?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselTerritoryRepository::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn demographics(value: serde_json::Value) -> Demographics {
    serde_json::from_value(value).expect("demographics fixture")
}

/// Run a blocking `postgres` call away from the Tokio runtime, which the
/// synchronous client refuses to nest inside.
fn off_runtime<T: Send>(f: impl FnOnce() -> T + Send) -> T {
    std::thread::scope(|scope| scope.spawn(f).join().expect("helper thread"))
}

fn territory(name: &str, zips: &[&str], attrs: serde_json::Value) -> Territory {
    Territory {
        id: TerritoryId::UNASSIGNED,
        name: name.to_owned(),
        zip_codes: zips.iter().map(|zip| (*zip).to_owned()).collect(),
        demographics: demographics(attrs),
    }
}

#[rstest]
fn create_assigns_an_id_and_round_trips(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };
    let input = territory(
        "Northwest Region",
        &["98101", "98102"],
        json!({ "population": 2_500_000, "primaryIndustries": ["Technology", "Healthcare"] }),
    );

    let (created, found) = context.runtime.block_on(async {
        let created = context.repository.create(&input).await.expect("create");
        let found = context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find");
        (created, found)
    });

    assert!(created.id.as_i32() > 0);
    assert_eq!(created.name, input.name);
    assert_eq!(created.zip_codes, input.zip_codes);
    assert_eq!(found, Some(created));
}

#[rstest]
fn list_is_ordered_by_id(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    let names: Vec<String> = context.runtime.block_on(async {
        for name in ["Central", "Atlantic", "Pacific"] {
            context
                .repository
                .create(&territory(name, &["60601"], json!({})))
                .await
                .expect("create");
        }
        context
            .repository
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|t| t.name)
            .collect()
    });

    assert_eq!(names, ["Central", "Atlantic", "Pacific"]);
}

#[rstest]
fn update_replaces_fields_and_missing_rows_report_none(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let created = context
            .repository
            .create(&territory("North", &["98101"], json!({ "a": 1 })))
            .await
            .expect("create");
        let mut incoming = territory("Cascadia", &["98109", "98110"], json!({ "b": "x" }));
        incoming.id = created.id;

        let updated = context
            .repository
            .update(&incoming)
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated, incoming);
        assert_eq!(
            context.repository.find_by_id(created.id).await.expect("find"),
            Some(incoming.clone())
        );

        incoming.id = TerritoryId::new(9_999).expect("id");
        assert!(
            context
                .repository
                .update(&incoming)
                .await
                .expect("update")
                .is_none()
        );
    });
}

#[rstest]
fn read_then_update_in_one_scope_uses_the_tracked_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let created = context
            .repository
            .create(&territory("North", &["98101"], json!({ "population": 1 })))
            .await
            .expect("create");

        let reread = tracking_scope(async {
            let loaded = context
                .repository
                .find_by_id(created.id)
                .await
                .expect("find")
                .expect("row exists");
            let mut incoming = loaded.clone();
            incoming.name = "Renamed".to_owned();
            incoming.zip_codes = vec!["98199".to_owned()];
            context
                .repository
                .update(&incoming)
                .await
                .expect("update")
                .expect("row exists");
            context
                .repository
                .find_by_id(created.id)
                .await
                .expect("find")
                .expect("row exists")
        })
        .await;

        assert_eq!(reread.name, "Renamed");
        assert_eq!(reread.zip_codes, vec!["98199"]);
        let fresh = context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("row exists");
        assert_eq!(fresh, reread);
    });
}

#[rstest]
fn equivalent_demographics_do_not_rewrite_the_column(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    let created = context.runtime.block_on(async {
        context
            .repository
            .create(&territory(
                "North",
                &["98101"],
                json!({ "population": 2_500_000, "growthRate": 3.2 }),
            ))
            .await
            .expect("create")
    });
    let id = created.id.as_i32();
    let stored = r#"{ "growthRate": 3.2, "population": 2500000 }"#;
    write_raw_demographics(&context.database_url, id, stored).expect("raw write");

    context.runtime.block_on(async {
        let mut incoming = created.clone();
        incoming.demographics = demographics(json!({ "population": 2.5e6, "growthRate": 3.2 }));
        tracking_scope(context.repository.update(&incoming))
            .await
            .expect("update")
            .expect("row exists");
    });

    assert_eq!(
        read_raw_demographics(&context.database_url, id).expect("raw read"),
        stored
    );
}

#[rstest]
fn undecodable_demographics_surface_as_query_errors(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    let created = context.runtime.block_on(async {
        context
            .repository
            .create(&territory("North", &["98101"], json!({})))
            .await
            .expect("create")
    });
    write_raw_demographics(&context.database_url, created.id.as_i32(), "not json")
        .expect("raw write");

    let error = context
        .runtime
        .block_on(context.repository.find_by_id(created.id))
        .expect_err("decode should fail");

    assert!(matches!(error, TerritoryRepositoryError::Query { .. }));
}

#[rstest]
#[case::dirty("Renamed")]
#[case::clean("North")]
fn tracked_rows_deleted_elsewhere_report_none(
    repo_context: Option<TestContext>,
    #[case] new_name: &str,
) {
    let Some(context) = repo_context else {
        return;
    };

    let outcome = context.runtime.block_on(tracking_scope(async {
        let created = context
            .repository
            .create(&territory("North", &["98101"], json!({})))
            .await
            .expect("create");
        let loaded = context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("row exists");
        off_runtime(|| delete_raw_territory(&context.database_url, created.id.as_i32()))
            .expect("raw delete");

        let mut incoming = loaded;
        incoming.name = new_name.to_owned();
        context.repository.update(&incoming).await.expect("update")
    }));

    assert!(outcome.is_none());
}

#[rstest]
fn delete_forgets_the_tracked_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    let (after_delete, reinserted) = context.runtime.block_on(tracking_scope(async {
        let created = context
            .repository
            .create(&territory("North", &["98101"], json!({})))
            .await
            .expect("create");
        context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("row exists");
        assert!(context.repository.delete(created.id).await.expect("delete"));
        let after_delete = context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find");

        off_runtime(|| {
            insert_raw_territory(&context.database_url, created.id.as_i32(), "Reinserted")
        })
        .expect("raw insert");
        let reinserted = context
            .repository
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("row exists");
        (after_delete, reinserted)
    }));

    assert!(after_delete.is_none());
    assert_eq!(reinserted.name, "Reinserted");
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let created = context
            .repository
            .create(&territory("North", &["98101"], json!({})))
            .await
            .expect("create");

        assert!(context.repository.delete(created.id).await.expect("delete"));
        assert!(!context.repository.delete(created.id).await.expect("delete"));
        assert!(
            context
                .repository
                .find_by_id(created.id)
                .await
                .expect("find")
                .is_none()
        );
    });
}

#[rstest]
fn seeding_fills_an_empty_store_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        return;
    };

    context.runtime.block_on(async {
        let first = seed_sample_territories(&context.repository)
            .await
            .expect("seed");
        let second = seed_sample_territories(&context.repository)
            .await
            .expect("seed");

        assert_eq!(first, SeedOutcome::Seeded { inserted: 5 });
        assert_eq!(second, SeedOutcome::Skipped { existing: 5 });
    });
}
