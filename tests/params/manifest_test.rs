#[cfg(test)]
mod tests {
    use greg_reports::params::{Manifest, ParamType};
    use greg_reports::report::ReportKind;

    /// Header of the original "recent changes" toolbox script.
    const AENDRINGER_HEADER: &str = "##AEndringer=name
##dummy=vector
##Antal_dage=number
##AEndringer_Flader=output vector
##AEndringer_Linier=output vector
##AEndringer_Punkter=output vector


fl = \"SELECT * FROM greg.f_tot_flader(\" + Antal_dage + \")\"
";

    #[test]
    fn test_parse_script_header() {
        let manifest = Manifest::parse(AENDRINGER_HEADER).unwrap();

        assert_eq!(manifest.name(), Some("AEndringer"));
        assert_eq!(manifest.decls().len(), 6);
        assert_eq!(manifest.get("Antal_dage").unwrap().ty, ParamType::Number);
        assert_eq!(manifest, ReportKind::RecentChanges.manifest());
    }

    #[test]
    fn test_every_report_manifest_reparses() {
        for kind in ReportKind::ALL {
            let manifest = kind.manifest();
            let reparsed = Manifest::parse(&manifest.to_header()).unwrap();
            assert_eq!(reparsed, manifest, "{}", kind);
        }
    }

    #[test]
    fn test_day_count_type_differs_between_variants() {
        let plain = ReportKind::RecentChanges.manifest();
        let views = ReportKind::RecentChangeViews.manifest();

        assert_eq!(plain.get("Antal_dage").unwrap().ty, ParamType::Number);
        assert_eq!(views.get("Antal_dage").unwrap().ty, ParamType::String);
    }

    #[test]
    fn test_view_reports_have_single_scratch_output() {
        for kind in [ReportKind::RecentChangeViews, ReportKind::HistoricViews] {
            let outputs: Vec<_> = kind.manifest().outputs().map(|d| d.name.clone()).collect();
            assert_eq!(outputs, ["dummy_out"]);
        }
    }

    #[test]
    fn test_date_inputs_in_order() {
        let manifest = ReportKind::HistoricChanges.manifest();
        let inputs: Vec<_> = manifest.inputs().map(|d| d.name.as_str()).collect();
        assert_eq!(inputs, ["dummy", "Dag", "Maaned", "Aar"]);
    }
}
