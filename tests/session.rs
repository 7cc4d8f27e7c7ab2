mod common;

#[cfg(test)]
mod tests {
    use super::common::StoreContext;
    use amelia::db::db::{DbError, DbRow};
    use amelia::db::query::{QueryError, QueryKind, SqlQuery};
    use rusqlite::types::Value;
    use test_context::test_context;

    fn insert_location(name: &str) -> Vec<Value> {
        vec![
            Value::Text(name.to_string()),
            Value::Text("2024-05-01".to_string()),
            Value::Text("2024-05-02".to_string()),
            Value::Text("Main Hall".to_string()),
            Value::Integer(0),
            Value::Text("Description".to_string()),
        ]
    }

    fn insert_query() -> SqlQuery {
        SqlQuery::insert(
            "INSERT INTO events (name, start_date, end_date, location, slots, description) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .unwrap()
    }

    fn count(ctx: &StoreContext) -> i64 {
        let query = SqlQuery::select("SELECT COUNT(*) AS total FROM events").unwrap();
        let row = ctx.db.session(|s| s.fetch_one(&query, &[])).unwrap().unwrap();
        match row.get("total") {
            Some(Value::Integer(total)) => *total,
            other => panic!("unexpected count {:?}", other),
        }
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_insert_returns_identity_and_commits(ctx: &mut StoreContext) {
        let first = ctx.db.session(|s| s.insert(&insert_query(), &insert_location("One"))).unwrap();
        let second = ctx.db.session(|s| s.insert(&insert_query(), &insert_location("Two"))).unwrap();

        assert!(first > 0);
        assert!(second > first);
        assert_eq!(count(ctx), 2);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_failed_work_rolls_back(ctx: &mut StoreContext) {
        let result: Result<(), DbError> = ctx.db.session(|s| {
            s.insert(&insert_query(), &insert_location("Lost"))?;
            let wrong = SqlQuery::select("SELECT * FROM events").unwrap();
            s.execute(&wrong, &[])?;
            Ok(())
        });

        assert!(matches!(result, Err(DbError::Query(QueryError::WrongKind { .. }))));
        assert_eq!(count(ctx), 0);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_operations_reject_wrong_kind(ctx: &mut StoreContext) {
        let select = SqlQuery::select("SELECT * FROM events WHERE id = ?1").unwrap();
        let many = SqlQuery::multi_select("SELECT * FROM events").unwrap();
        let delete = SqlQuery::delete("DELETE FROM events WHERE id = ?1").unwrap();

        let err = ctx.db.session(|s| s.insert(&select, &[])).unwrap_err();
        assert!(matches!(
            err,
            DbError::Query(QueryError::WrongKind { found: QueryKind::Select, .. })
        ));

        let err = ctx
            .db
            .session(|s| s.fetch_many(&select, Ok::<DbRow, DbError>))
            .unwrap_err();
        assert!(matches!(err, DbError::Query(QueryError::WrongKind { .. })));

        let err = ctx.db.session(|s| s.fetch_one(&delete, &[Value::Integer(1)])).unwrap_err();
        assert_eq!(err.to_string(), "Wrong query kind: expected Select, got Delete");

        // A multi-row select is also a select.
        assert!(ctx.db.session(|s| s.fetch_one(&many, &[])).unwrap().is_none());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_fetch_many_walks_rows_in_order(ctx: &mut StoreContext) {
        for name in ["Alpha", "Beta", "Gamma"] {
            ctx.db.session(|s| s.insert(&insert_query(), &insert_location(name))).unwrap();
        }

        let query = SqlQuery::multi_select("SELECT id, name FROM events ORDER BY id").unwrap();
        let names = ctx
            .db
            .session(|s| s.fetch_many(&query, |row| Ok::<_, DbError>(row.text("name"))))
            .unwrap();

        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_delete_of_missing_row_affects_nothing(ctx: &mut StoreContext) {
        let query = SqlQuery::delete("DELETE FROM events WHERE id = ?1").unwrap();
        let removed = ctx.db.session(|s| s.execute(&query, &[Value::Integer(999)])).unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_query_text_must_match_kind() {
        let err = SqlQuery::update("DELETE FROM events").unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery { kind: QueryKind::Update, .. }));
        assert!(SqlQuery::multi_select("SELECT * FROM registrations").is_ok());
    }
}
