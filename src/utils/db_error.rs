//! Classification helpers for database errors.

/// Returns true if `e` is a unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if `e` is a unique-constraint violation on `constraint`.
///
/// PostgreSQL names primary keys `<table>_pkey`, so a short-link collision
/// shows up as `short_links_pkey`.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
