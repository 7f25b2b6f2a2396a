#[cfg(test)]
mod tests {
    use greg_reports::executor::{DataSource, OutputTarget};
    use greg_reports::params::{RecentChangesParams, RecentChangesViewParams};
    use greg_reports::report::{RecentChangeViews, RecentChanges, Report, ReportKind};

    fn recent(days: i64) -> RecentChanges {
        RecentChanges::new(RecentChangesParams::new(DataSource::new("default"), days)).unwrap()
    }

    fn recent_views(days: &str) -> RecentChangeViews {
        RecentChangeViews::new(RecentChangesViewParams::new(DataSource::new("default"), days))
            .unwrap()
    }

    #[test]
    fn test_thirty_days_issues_three_selects() {
        let plan = recent(30).plan();

        let sql: Vec<_> = plan.iter().map(|p| p.statement.to_literal_sql()).collect();
        assert_eq!(
            sql,
            [
                "SELECT * FROM greg.f_tot_flader(30)",
                "SELECT * FROM greg.f_tot_linier(30)",
                "SELECT * FROM greg.f_tot_punkter(30)",
            ]
        );
    }

    #[test]
    fn test_day_count_is_bound_not_spliced() {
        for planned in recent(30).plan() {
            assert!(!planned.statement.sql().contains("30"));
            assert_eq!(planned.statement.params(), &[30]);
        }
    }

    #[test]
    fn test_each_select_has_distinct_named_output() {
        let targets: Vec<_> = recent(7).plan().into_iter().map(|p| p.target).collect();
        assert_eq!(
            targets,
            [
                OutputTarget::named("AEndringer_Flader"),
                OutputTarget::named("AEndringer_Linier"),
                OutputTarget::named("AEndringer_Punkter"),
            ]
        );
    }

    #[test]
    fn test_custom_output_names() {
        let mut params = RecentChangesParams::new(DataSource::new("default"), 1);
        params.outputs.linier = "linjer_i_gaar".to_string();
        let plan = RecentChanges::new(params).unwrap().plan();

        assert_eq!(plan[1].target, OutputTarget::named("linjer_i_gaar"));
    }

    #[test]
    fn test_any_non_negative_day_count() {
        for n in [0, 1, 365, i64::from(i32::MAX)] {
            let plan = recent(n).plan();
            assert_eq!(plan.len(), 3);
            for (planned, kind) in plan.iter().zip(["flader", "linier", "punkter"]) {
                assert_eq!(
                    planned.statement.to_literal_sql(),
                    format!("SELECT * FROM greg.f_tot_{}({})", kind, n)
                );
            }
        }
    }

    #[test]
    fn test_views_in_documented_order() {
        let steps: Vec<_> = recent_views("30").plan().into_iter().map(|p| p.step).collect();
        assert_eq!(steps, ["flader", "linier", "punkter", "omraader"]);
    }

    #[test]
    fn test_views_replace_aendring_views() {
        let plan = recent_views("30").plan();

        let prefixes: Vec<_> = plan
            .iter()
            .map(|p| {
                let sql = p.statement.sql();
                sql[..sql.find(" AS ").unwrap()].to_string()
            })
            .collect();
        assert_eq!(
            prefixes,
            [
                "CREATE OR REPLACE VIEW greg.v_aendring_flader",
                "CREATE OR REPLACE VIEW greg.v_aendring_linier",
                "CREATE OR REPLACE VIEW greg.v_aendring_punkter",
                "CREATE OR REPLACE VIEW greg.v_aendring_omraader",
            ]
        );
        assert!(plan.iter().all(|p| p.target == OutputTarget::Placeholder));
        assert!(plan.iter().all(|p| p.statement.params().is_empty()));
    }

    #[test]
    fn test_views_are_byte_identical_across_invocations() {
        let first: Vec<_> = recent_views("30").plan();
        let second: Vec<_> = recent_views(" 30 ").plan();
        assert_eq!(first, second);
    }

    #[test]
    fn test_view_geometry_casts() {
        let plan = recent_views("5").plan();
        let casts = [
            "geometri::public.geometry('MultiPolygon', 25832)",
            "geometri::public.geometry('MultiLineString', 25832)",
            "geometri::public.geometry('MultiPoint', 25832)",
            "geometri::public.geometry('MultiPolygon', 25832)",
        ];
        for (planned, cast) in plan.iter().zip(casts) {
            assert!(planned.statement.sql().contains(cast), "{}", planned.statement);
        }
        assert!(plan[3].statement.sql().ends_with("arbejdssted FROM greg.f_tot_omraader(5)"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(recent(1).kind(), ReportKind::RecentChanges);
        assert_eq!(recent_views("1").kind(), ReportKind::RecentChangeViews);
    }
}
