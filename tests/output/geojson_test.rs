#[cfg(test)]
mod tests {
    use greg_reports::executor::{OutputDataset, OutputTarget};
    use greg_reports::output::{feature_collection, write_all, write_geojson, OutputError};
    use serde_json::{json, Value};

    fn dataset(name: &str) -> OutputDataset {
        OutputDataset {
            name: Some(name.to_string()),
            features: vec![json!({
                "type": "Feature",
                "geometry": {"type": "MultiPoint", "coordinates": [[574000.0, 6220000.0]]},
                "properties": {"objekt_id": 17, "handling": "Tilføjet"}
            })],
            rows_affected: 0,
        }
    }

    #[test]
    fn test_feature_collection_shape() {
        let collection = feature_collection(&dataset("Historik_Punkter"));
        assert_eq!(collection["type"], "FeatureCollection");
        assert_eq!(collection["name"], "Historik_Punkter");
        assert_eq!(collection["features"][0]["properties"]["objekt_id"], 17);
    }

    #[test]
    fn test_write_named_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_geojson(dir.path(), &dataset("AEndringer_Punkter"))
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("AEndringer_Punkter.geojson"));
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["features"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_write_all_skips_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let datasets = [
            dataset("Historik_Flader"),
            OutputDataset::empty(&OutputTarget::Placeholder),
            dataset("Historik_Linier"),
        ];

        let paths = write_all(dir.path(), &datasets).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(dir.path().join("Historik_Linier.geojson").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("rapporter").join("2020");

        write_geojson(&nested, &dataset("Historik_Flader")).unwrap();
        assert!(nested.join("Historik_Flader.geojson").exists());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_geojson(dir.path(), &dataset("../escape")).unwrap_err();
        assert!(matches!(err, OutputError::InvalidName(_)));
    }
}
