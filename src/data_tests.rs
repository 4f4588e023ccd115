use std::path::Path;

use tempfile::TempDir;

use super::*;

fn csv(content: &str) -> Result<Vec<Record>> {
    parse_records(content, DataFormat::Csv, Path::new("rows.csv"))
}

mod detect_tests {
    use super::*;

    #[test]
    fn by_extension() {
        assert_eq!(DataFormat::detect(Path::new("a.json"), ""), DataFormat::Json);
        assert_eq!(DataFormat::detect(Path::new("a.CSV"), "[1]"), DataFormat::Csv);
    }

    #[test]
    fn by_content_without_extension() {
        assert_eq!(DataFormat::detect(Path::new("rows"), "  [ ]"), DataFormat::Json);
        assert_eq!(DataFormat::detect(Path::new("rows"), "a,1"), DataFormat::Csv);
    }
}

mod json_tests {
    use super::*;

    #[test]
    fn parses_key_value_objects() {
        let records = parse_records(
            r#"[{"key": "a", "value": 10}, {"key": "b", "value": 2.5}]"#,
            DataFormat::Json,
            Path::new("rows.json"),
        )
        .unwrap();
        assert_eq!(records, vec![Record::new("a", 10.0), Record::new("b", 2.5)]);
    }

    #[test]
    fn missing_value_is_reported_with_path() {
        let err = parse_records(r#"[{"key": "a"}]"#, DataFormat::Json, Path::new("rows.json"))
            .unwrap_err();
        assert!(matches!(err, ChartError::DataParse { .. }));
        assert!(err.to_string().contains("rows.json"));
    }
}

mod csv_tests {
    use super::*;

    #[test]
    fn parses_lines() {
        let records = csv("a,1\nb, 2.5\n").unwrap();
        assert_eq!(records, vec![Record::new("a", 1.0), Record::new("b", 2.5)]);
    }

    #[test]
    fn skips_header_blank_lines_and_comments() {
        let records = csv("key,value\n\n# comment\na,3\n").unwrap();
        assert_eq!(records, vec![Record::new("a", 3.0)]);
    }

    #[test]
    fn keys_may_contain_commas_and_quotes() {
        let records = csv("\"Smith, J\",4\n").unwrap();
        assert_eq!(records, vec![Record::new("Smith, J", 4.0)]);
    }

    #[test]
    fn bad_number_after_first_row_is_an_error() {
        let err = csv("a,1\nb,lots\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert!(csv("a 1\n").is_err());
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(csv("").unwrap().is_empty());
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"key": "x", "value": 1}]"#).unwrap();

        assert_eq!(load_records(&path).unwrap(), vec![Record::new("x", 1.0)]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_records(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ChartError::FileRead { .. }));
    }
}
