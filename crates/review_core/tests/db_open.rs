use review_core::db::{open_db, open_db_in_memory};
use review_core::{ReviewRepository, SqliteReviewRepository};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn open_db_in_memory_leaves_foreign_keys_off() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(pragma_i64(&conn, "foreign_keys"), 0);
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("reviews.db");

    let conn = open_db(&path).unwrap();
    drop(conn);

    assert!(path.exists());
}

#[test]
fn reviews_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.db");
    let employees: HashSet<i64> = [1].into_iter().collect();

    let saved = {
        let conn = open_db(&path).unwrap();
        let mut repo = SqliteReviewRepository::new(&conn, &employees);
        repo.create_table().unwrap();
        repo.create(2020, "Persisted", 1).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteReviewRepository::new(&conn, &employees);
    repo.create_table().unwrap();
    let loaded = repo.find_by_id(saved.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert!(repo.registry().is_empty());
}

#[test]
fn create_table_declares_expected_columns() {
    let conn = open_db_in_memory().unwrap();
    let employees: HashSet<i64> = HashSet::new();
    let repo = SqliteReviewRepository::new(&conn, &employees);
    repo.create_table().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(reviews);").unwrap();
    let columns: Vec<(String, String, i64)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?, row.get(5)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), 1),
            ("year".to_string(), "INT".to_string(), 0),
            ("summary".to_string(), "TEXT".to_string(), 0),
            ("employee_id".to_string(), "INTEGER".to_string(), 0),
        ]
    );

    let fk_target: String = conn
        .query_row("PRAGMA foreign_key_list(reviews);", [], |row| row.get(2))
        .unwrap();
    assert_eq!(fk_target, "employee");
}

fn pragma_i64(conn: &Connection, name: &str) -> i64 {
    conn.query_row(&format!("PRAGMA {name};"), [], |row| row.get(0))
        .unwrap()
}
