mod common;

#[cfg(test)]
mod tests {
    use super::common::{StoreContext, SPRING_FAIR};
    use amelia::libs::event::Event;
    use amelia::libs::fields::{FieldError, FieldValue, ValidationError};
    use amelia::libs::record::{Model, RecordError};
    use amelia::libs::registration::Registration;
    use chrono::{Local, NaiveDate};
    use test_context::test_context;

    fn spring_fair(ctx: &StoreContext) -> Event {
        let mut event = Event::new();
        event.set_data(&ctx.db, SPRING_FAIR).unwrap();
        event
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_created_event_is_listed_in_items(ctx: &mut StoreContext) {
        let event = spring_fair(ctx);
        let id = event.id().unwrap();
        assert!(id > 0);

        let items = Event::items(&ctx.db).unwrap();
        assert!(items.contains(&(id.to_string(), "Spring Fair / 2024-05-01 / Main Hall".to_string())));
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_items_is_repeatable(ctx: &mut StoreContext) {
        spring_fair(ctx);
        spring_fair(ctx);

        let first = Event::items(&ctx.db).unwrap();
        let second = Event::items(&ctx.db).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_bad_email_persists_nothing(ctx: &mut StoreContext) {
        let mut registration = Registration::new();
        let err = registration
            .set_data(
                &ctx.db,
                [("first_name", "Ann"), ("last_name", "Lee"), ("email", "bad-email"), ("event_id", "1")],
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(
            err,
            RecordError::Field(FieldError::Invalid { ref field, source: ValidationError::WrongEmailFormat(_) }) if field == "email"
        ));
        assert_eq!(registration.id(), None);
        assert!(Registration::all(&ctx.db).unwrap().is_empty());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_set_data_skips_unknown_names(ctx: &mut StoreContext) {
        let mut registration = Registration::new();
        let id = registration
            .set_data(
                &ctx.db,
                [
                    ("first_name", "Ann"),
                    ("last_name", "Lee"),
                    ("email", "ann@example.com"),
                    ("event_id", "1"),
                    ("csrf_token", "ignored"),
                ],
            )
            .unwrap();

        let stored = Registration::load_one(&ctx.db, id).unwrap().unwrap();
        assert_eq!(stored.value_text("email"), "ann@example.com");
        assert_eq!(
            stored.get_field("registration_date").unwrap().get_value().unwrap(),
            FieldValue::Date(Local::now().date_naive())
        );
        assert_eq!(Registration::items(&ctx.db).unwrap(), vec![(id.to_string(), "Ann Lee / ann@example.com".to_string())]);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_missing_required_value_is_not_saved(ctx: &mut StoreContext) {
        let mut event = Event::new();
        let err = event.set_data(&ctx.db, [("name", "Incomplete")]).unwrap_err();
        assert!(matches!(err, RecordError::Field(FieldError::ValueNotSet(_))));
        assert!(!err.is_validation());
        assert!(Event::all(&ctx.db).unwrap().is_empty());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_load_one_round_trips_values(ctx: &mut StoreContext) {
        let event = spring_fair(ctx);
        let loaded = Event::load_one(&ctx.db, event.id().unwrap()).unwrap().unwrap();

        assert_eq!(loaded, event);
        assert_eq!(
            loaded.get_field("start_date").unwrap().get_value().unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(loaded.get_field("slots").unwrap().get_value().unwrap(), FieldValue::Integer(50));
        assert_eq!(loaded.summary(), "Spring Fair - 2024-05-01");
        assert_eq!(loaded.to_string(), format!("[{}] Spring Fair - 2024-05-01", event.id().unwrap()));
        assert!(loaded.verbose_details().contains("Location: Main Hall\n"));
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_load_one_of_missing_id_is_none(ctx: &mut StoreContext) {
        assert!(Event::load_one(&ctx.db, 42).unwrap().is_none());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_persisted_record_cannot_be_created_again(ctx: &mut StoreContext) {
        let mut event = spring_fair(ctx);
        let id = event.id().unwrap();
        assert!(matches!(event.save(&ctx.db), Err(RecordError::AlreadyPersisted(existing)) if existing == id));
        assert_eq!(Event::all(&ctx.db).unwrap().len(), 1);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_new_record_cannot_be_updated_or_deleted(ctx: &mut StoreContext) {
        let mut event = Event::new();
        assert!(matches!(event.update_data(&ctx.db), Err(RecordError::MissingId)));
        assert!(matches!(event.delete(&ctx.db), Err(RecordError::MissingId)));
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_update_data_rewrites_row(ctx: &mut StoreContext) {
        let mut event = spring_fair(ctx);
        event.record_mut().get_field_mut("location").unwrap().set_raw("Garden").unwrap();
        event.update_data(&ctx.db).unwrap();

        let loaded = Event::load_one(&ctx.db, event.id().unwrap()).unwrap().unwrap();
        assert_eq!(loaded.value_text("location"), "Garden");
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_delete_forgets_identity(ctx: &mut StoreContext) {
        let mut event = spring_fair(ctx);
        let id = event.id().unwrap();

        assert_eq!(event.delete(&ctx.db).unwrap(), 1);
        assert_eq!(event.id(), None);
        assert!(Event::load_one(&ctx.db, id).unwrap().is_none());
        assert!(matches!(event.delete(&ctx.db), Err(RecordError::MissingId)));
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_delete_of_vanished_row_is_a_no_op(ctx: &mut StoreContext) {
        let mut event = spring_fair(ctx);
        let mut stale = Event::load_one(&ctx.db, event.id().unwrap()).unwrap().unwrap();

        event.delete(&ctx.db).unwrap();
        assert_eq!(stale.delete(&ctx.db).unwrap(), 0);
        assert_eq!(stale.id(), None);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_load_many_follows_id_order(ctx: &mut StoreContext) {
        spring_fair(ctx);
        let mut second = Event::new();
        second
            .set_data(
                &ctx.db,
                [
                    ("name", "Autumn Walk"),
                    ("start_date", "2024-10-01"),
                    ("end_date", "2024-10-01"),
                    ("location", "Park"),
                    ("description", "Guided walk"),
                ],
            )
            .unwrap();

        let events = Event::load_many(&ctx.db).unwrap();
        let names: Vec<String> = events.iter().map(|event| event.value_text("name")).collect();
        assert_eq!(names, vec!["Spring Fair", "Autumn Walk"]);
        assert_eq!(events[1].get_field("slots").unwrap().get_value().unwrap(), FieldValue::Integer(0));
    }
}
