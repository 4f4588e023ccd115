use super::*;

mod defaults_tests {
    use super::*;

    #[test]
    fn chart_config_defaults() {
        let config = ChartConfig::default();
        assert!((config.svg_width - 500.0).abs() < f64::EPSILON);
        assert!((config.svg_height - 500.0).abs() < f64::EPSILON);
        assert!((config.margin_top - 40.0).abs() < f64::EPSILON);
        assert!((config.margin_bottom - 5.0).abs() < f64::EPSILON);
        assert!((config.margin_right - 300.0).abs() < f64::EPSILON);
        assert!((config.margin_left - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.container, "body");
        assert_eq!(config.default_text_fill, "#2C3E50");
        assert_eq!(config.default_font, "Helvetica");
        assert!(config.data.is_empty());
        assert_eq!(config.chart_width, None);
        assert_eq!(config.chart_height, None);
        assert!(config.first_render);
        assert!(!config.gui_enabled);
    }

    #[test]
    fn generated_ids_have_prefix_and_number() {
        let id = generate_id();
        let number: u32 = id.strip_prefix("ID").unwrap().parse().unwrap();
        assert!(number < 1_000_000);
    }
}

mod patch_tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut config = ChartConfig::default();
        let id = config.id.clone();

        config.apply(StatePatch {
            svg_width: Some(800.0),
            container: Some("#chart".to_string()),
            ..Default::default()
        });

        assert!((config.svg_width - 800.0).abs() < f64::EPSILON);
        assert_eq!(config.container, "#chart");
        assert_eq!(config.id, id);
        assert!((config.svg_height - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn apply_replaces_data_wholesale() {
        let mut config = ChartConfig::default();
        config.data = vec![Record::new("a", 1.0), Record::new("b", 2.0)];

        config.apply(StatePatch {
            data: Some(vec![Record::new("c", 3.0)]),
            ..Default::default()
        });

        assert_eq!(config.data, vec![Record::new("c", 3.0)]);
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut config = ChartConfig::default();
        let before = config.clone();
        config.apply(StatePatch::default());
        assert_eq!(config, before);
        assert!(StatePatch::default().is_empty());
    }

    #[test]
    fn merged_with_prefers_later_values() {
        let base = StatePatch {
            svg_width: Some(100.0),
            default_font: Some("Arial".to_string()),
            ..Default::default()
        };
        let over = StatePatch {
            svg_width: Some(200.0),
            ..Default::default()
        };

        let merged = base.merged_with(over);
        assert_eq!(merged.svg_width, Some(200.0));
        assert_eq!(merged.default_font.as_deref(), Some("Arial"));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn patch_parses_from_toml() {
        let patch: StatePatch = toml::from_str(
            r##"
svg_width = 640
margin_left = 20.5
container = "#bars"

[[data]]
key = "a"
value = 10
"##,
        )
        .unwrap();

        assert_eq!(patch.svg_width, Some(640.0));
        assert_eq!(patch.margin_left, Some(20.5));
        assert_eq!(patch.container.as_deref(), Some("#bars"));
        assert_eq!(patch.data, Some(vec![Record::new("a", 10.0)]));
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: Result<StatePatch, _> = toml::from_str("bar_color = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn config_serializes_to_json_with_snake_case_keys() {
        let config = ChartConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("svg_width").is_some());
        assert!(value.get("gui_enabled").is_some());
        assert!(value.get("chart_width").is_none());
    }

    #[test]
    fn record_parses_from_json() {
        let records: Vec<Record> =
            serde_json::from_str(r#"[{"key": "a", "value": 1.5}]"#).unwrap();
        assert_eq!(records, vec![Record::new("a", 1.5)]);
    }
}
