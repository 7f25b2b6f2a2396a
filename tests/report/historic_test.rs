#[cfg(test)]
mod tests {
    use greg_reports::executor::{DataSource, OutputTarget};
    use greg_reports::params::{HistoricParams, HistoricViewParams};
    use greg_reports::report::{HistoricChanges, HistoricViews, Report};

    fn historic(day: &str, month: &str, year: &str) -> HistoricChanges {
        HistoricChanges::new(HistoricParams::new(
            DataSource::new("default"),
            day,
            month,
            year,
        ))
        .unwrap()
    }

    fn historic_views(day: &str, month: &str, year: &str) -> HistoricViews {
        HistoricViews::new(HistoricViewParams::new(
            DataSource::new("default"),
            day,
            month,
            year,
        ))
        .unwrap()
    }

    #[test]
    fn test_three_selects_in_day_month_year_order() {
        let plan = historic("24", "12", "2019").plan();

        let sql: Vec<_> = plan.iter().map(|p| p.statement.to_literal_sql()).collect();
        assert_eq!(
            sql,
            [
                "SELECT * FROM greg.f_dato_flader(24, 12, 2019)",
                "SELECT * FROM greg.f_dato_linier(24, 12, 2019)",
                "SELECT * FROM greg.f_dato_punkter(24, 12, 2019)",
            ]
        );
        for planned in &plan {
            assert_eq!(planned.statement.params(), &[24, 12, 2019]);
        }
    }

    #[test]
    fn test_selects_target_historik_outputs() {
        let targets: Vec<_> = historic("1", "1", "2000")
            .plan()
            .into_iter()
            .map(|p| p.target)
            .collect();
        assert_eq!(
            targets,
            [
                OutputTarget::named("Historik_Flader"),
                OutputTarget::named("Historik_Linier"),
                OutputTarget::named("Historik_Punkter"),
            ]
        );
    }

    #[test]
    fn test_leading_zeros_normalized() {
        let plan = historic("01", "06", "2020").plan();
        assert_eq!(
            plan[0].statement.to_literal_sql(),
            "SELECT * FROM greg.f_dato_flader(1, 6, 2020)"
        );
    }

    #[test]
    fn test_views_first_june_2020() {
        let plan = historic_views("1", "6", "2020").plan();

        let sql: Vec<_> = plan.iter().map(|p| p.statement.to_literal_sql()).collect();
        assert_eq!(
            sql,
            [
                "CREATE OR REPLACE VIEW greg.v_maengder_historik AS SELECT * FROM greg.f_maengder(1, 6, 2020)",
                "CREATE OR REPLACE VIEW greg.v_greg_flader_historik AS SELECT * FROM greg.f_dato_flader(1, 6, 2020)",
                "CREATE OR REPLACE VIEW greg.v_greg_linier_historik AS SELECT * FROM greg.f_dato_linier(1, 6, 2020)",
                "CREATE OR REPLACE VIEW greg.v_greg_punkter_historik AS SELECT * FROM greg.f_dato_punkter(1, 6, 2020)",
                "CREATE OR REPLACE VIEW greg.v_greg_omraader_historik AS SELECT * FROM greg.f_dato_omraader(1, 6, 2020)",
            ]
        );
    }

    #[test]
    fn test_views_step_order() {
        let steps: Vec<_> = historic_views("15", "3", "2018")
            .plan()
            .into_iter()
            .map(|p| p.step)
            .collect();
        assert_eq!(steps, ["maengder", "flader", "linier", "punkter", "omraader"]);
    }

    #[test]
    fn test_views_idempotent_plan() {
        assert_eq!(
            historic_views("1", "6", "2020").plan(),
            historic_views("1", "6", "2020").plan()
        );
    }

    #[test]
    fn test_views_all_placeholder_targets() {
        let plan = historic_views("1", "6", "2020").plan();
        assert!(plan.iter().all(|p| p.target == OutputTarget::Placeholder));
    }
}
