#[cfg(test)]
mod tests {
    use greg_reports::executor::DataSource;
    use greg_reports::params::{
        DayCount, HistoricDate, HistoricParams, HistoricViewParams, ParamError,
        RecentChangesParams, RecentChangesViewParams,
    };

    fn source() -> DataSource {
        DataSource::new("default")
    }

    #[test]
    fn test_recent_changes_accepts_zero_days() {
        let days = RecentChangesParams::new(source(), 0).validate().unwrap();
        assert_eq!(days, DayCount::new(0).unwrap());
    }

    #[test]
    fn test_recent_changes_rejects_negative_days() {
        let err = RecentChangesParams::new(source(), -5).validate().unwrap_err();
        assert_eq!(
            err,
            ParamError::OutOfRange {
                name: "Antal_dage".to_string(),
                value: -5
            }
        );
    }

    #[test]
    fn test_view_variant_parses_string_day_count() {
        let days = RecentChangesViewParams::new(source(), "30").validate().unwrap();
        assert_eq!(days.get(), 30);
    }

    #[test]
    fn test_view_variant_rejects_sql_in_day_count() {
        let params = RecentChangesViewParams::new(source(), "1) UNION SELECT * FROM pg_user --");
        assert!(matches!(params.validate(), Err(ParamError::NotANumber { .. })));
    }

    #[test]
    fn test_historic_params_validate_calendar() {
        let date = HistoricParams::new(source(), "1", "6", "2020").validate().unwrap();
        assert_eq!(date, HistoricDate::new(1, 6, 2020).unwrap());

        let err = HistoricViewParams::new(source(), "0", "6", "2020")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ParamError::InvalidDate { day: 0, .. }));
    }

    #[test]
    fn test_historic_params_reject_injection() {
        let params = HistoricViewParams::new(source(), "1", "6", "2020); DROP SCHEMA greg CASCADE; --");
        assert!(matches!(
            params.validate(),
            Err(ParamError::NotANumber { name, .. }) if name == "Aar"
        ));
    }

    #[test]
    fn test_historic_default_outputs() {
        let params = HistoricParams::new(source(), "1", "1", "2021");
        assert_eq!(params.outputs.flader, "Historik_Flader");
        assert_eq!(params.outputs.linier, "Historik_Linier");
        assert_eq!(params.outputs.punkter, "Historik_Punkter");
    }
}
