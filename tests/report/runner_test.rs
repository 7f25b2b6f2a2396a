#[cfg(test)]
mod tests {
    use greg_reports::executor::{
        DataSource, ExecError, ExecMode, OutputTarget, RecordingExecutor,
    };
    use greg_reports::report::{ReportError, ReportInput, ReportKind, ReportRunner};

    fn input() -> ReportInput {
        ReportInput::new(DataSource::new("greg")).with_days("30")
    }

    #[tokio::test]
    async fn test_recent_changes_execution_order() {
        let report = ReportKind::RecentChanges.build(&input()).unwrap();
        let runner = ReportRunner::new(RecordingExecutor::new());

        let outputs = runner.run(&*report).await.unwrap();

        assert_eq!(
            runner.executor().literal_sql(),
            [
                "SELECT * FROM greg.f_tot_flader(30)",
                "SELECT * FROM greg.f_tot_linier(30)",
                "SELECT * FROM greg.f_tot_punkter(30)",
            ]
        );
        let names: Vec<_> = outputs.iter().map(|o| o.name.clone().unwrap()).collect();
        assert_eq!(names, ["AEndringer_Flader", "AEndringer_Linier", "AEndringer_Punkter"]);
    }

    #[tokio::test]
    async fn test_every_call_uses_source_and_native_mode() {
        let report = ReportKind::RecentChangeViews.build(&input()).unwrap();
        let runner = ReportRunner::new(RecordingExecutor::new());
        runner.run(&*report).await.unwrap();

        let calls = runner.executor().calls();
        assert_eq!(calls.len(), 4);
        for call in calls {
            assert_eq!(call.source, DataSource::new("greg"));
            assert_eq!(call.mode, ExecMode::Native);
            assert_eq!(call.target, OutputTarget::Placeholder);
        }
    }

    #[tokio::test]
    async fn test_historic_views_execution_order() {
        let input = ReportInput::new(DataSource::new("greg")).with_date("1", "6", "2020");
        let report = ReportKind::HistoricViews.build(&input).unwrap();
        let runner = ReportRunner::new(RecordingExecutor::new());

        let outputs = runner.run(&*report).await.unwrap();
        assert!(outputs.iter().all(|o| o.is_placeholder()));

        let sql = runner.executor().literal_sql();
        let expected = [
            ("v_maengder_historik", "f_maengder(1, 6, 2020)"),
            ("v_greg_flader_historik", "f_dato_flader(1, 6, 2020)"),
            ("v_greg_linier_historik", "f_dato_linier(1, 6, 2020)"),
            ("v_greg_punkter_historik", "f_dato_punkter(1, 6, 2020)"),
            ("v_greg_omraader_historik", "f_dato_omraader(1, 6, 2020)"),
        ];
        assert_eq!(sql.len(), expected.len());
        for (stmt, (view, call)) in sql.iter().zip(expected) {
            assert!(stmt.contains(view), "{}", stmt);
            assert!(stmt.contains(call), "{}", stmt);
        }
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_statements() {
        let report = ReportKind::RecentChanges.build(&input()).unwrap();
        let runner = ReportRunner::new(RecordingExecutor::failing_at(1));

        let err = runner.run(&*report).await.unwrap_err();

        match &err {
            ReportError::Statement {
                report,
                step,
                index,
                source,
            } => {
                assert_eq!(*report, ReportKind::RecentChanges);
                assert_eq!(step, "linier");
                assert_eq!(*index, 2);
                assert!(matches!(source, ExecError::Remote { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.exec_error().is_some());

        // The first statement ran and is not undone; the third never ran.
        assert_eq!(runner.executor().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_same_parameters_same_sql() {
        let report = ReportKind::HistoricViews
            .build(&ReportInput::new(DataSource::new("greg")).with_date("1", "6", "2020"))
            .unwrap();

        let first = ReportRunner::new(RecordingExecutor::new());
        first.run(&*report).await.unwrap();
        let second = ReportRunner::new(RecordingExecutor::new());
        second.run(&*report).await.unwrap();

        assert_eq!(first.executor().literal_sql(), second.executor().literal_sql());
    }

    #[tokio::test]
    async fn test_runner_over_borrowed_executor() {
        let executor = RecordingExecutor::new();
        let report = ReportKind::HistoricChanges
            .build(&ReportInput::new(DataSource::new("greg")).with_date("2", "1", "2022"))
            .unwrap();

        ReportRunner::new(&executor).run(&*report).await.unwrap();

        assert_eq!(executor.calls().len(), 3);
    }
}
