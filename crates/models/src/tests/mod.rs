/// Connection configuration tests
pub mod db_tests;


/// Live database tests run only when a database is configured.
pub(crate) fn db_available() -> bool {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return false;
    }
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip live database tests");
        return false;
    }
    true
}
