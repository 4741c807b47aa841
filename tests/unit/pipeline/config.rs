use super::*;

#[test]
fn defaults_match_reference_run() {
    let cfg = PipelineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.input_dir, PathBuf::from("scraped_art"));
    assert_eq!(cfg.source_count(), 6);
    assert_eq!((cfg.fold_lower, cfg.fold_upper), (3, 7));
    assert_eq!(cfg.fold_ratio, 0.25);
    assert_eq!(cfg.final_ratio, 0.5);
    assert_eq!(cfg.mode_filter_size, 15);
    assert_eq!(cfg.dpi, Dpi(300));
    assert_eq!(cfg.intermediate_path(), PathBuf::from(".").join("new.png"));
    assert_eq!(cfg.final_path(), PathBuf::from(".").join("finalproduct.png"));
    assert_eq!(cfg.augmenters, AugmenterSpec::default_chain());
    assert_eq!(
        cfg.source_layout().path_for(6),
        PathBuf::from("scraped_art").join("6.jpg")
    );
}

#[test]
fn empty_json_is_all_defaults() {
    let cfg = PipelineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PipelineConfig::default());
}

#[test]
fn partial_json_overrides_named_fields() {
    let cfg = PipelineConfig::from_json_str(
        r#"{"fold_upper": 5, "seed": 9, "dpi": 150, "augmenters": [{"kind": "jigsaw", "rows": 2, "cols": 3}]}"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.source_count(), 4);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.dpi, Dpi(150));
    assert_eq!(cfg.augmenters.len(), 1);
    assert_eq!(cfg.fold_ratio, 0.25);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(PipelineConfig::from_json_str(r#"{"fold_uper": 5}"#).is_err());
}

#[test]
fn config_file_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("synthesis.json");
    let mut cfg = PipelineConfig::default();
    cfg.seed = Some(1234);
    cfg.work_dir = tmp.path().to_path_buf();
    std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

    assert_eq!(PipelineConfig::from_path(&path).unwrap(), cfg);
}

#[test]
fn invalid_values_are_rejected() {
    let cases: Vec<fn(&mut PipelineConfig)> = vec![
        |c: &mut PipelineConfig| c.fold_lower = 2,
        |c: &mut PipelineConfig| c.fold_upper = 2,
        |c: &mut PipelineConfig| c.fold_ratio = 1.5,
        |c: &mut PipelineConfig| c.final_ratio = f32::NAN,
        |c: &mut PipelineConfig| c.mode_filter_size = 0,
        |c: &mut PipelineConfig| c.dpi = Dpi(0),
        |c: &mut PipelineConfig| c.final_name = " ".to_string(),
        |c: &mut PipelineConfig| c.final_name = c.intermediate_name.clone(),
        |c: &mut PipelineConfig| {
            c.augmenters = vec![AugmenterSpec::Jigsaw {
                rows: 7,
                cols: 0,
                max_steps: 1,
            }]
        },
    ];
    for (i, mutate) in cases.into_iter().enumerate() {
        let mut cfg = PipelineConfig::default();
        mutate(&mut cfg);
        assert!(
            matches!(cfg.validate(), Err(SynthError::Validation(_))),
            "case {i} should fail validation"
        );
    }
}

#[test]
fn empty_fold_range_is_allowed() {
    let cfg = PipelineConfig {
        fold_upper: 3,
        ..PipelineConfig::default()
    };
    cfg.validate().unwrap();
    assert_eq!(cfg.source_count(), 2);
}

#[test]
fn readme_example_parses_with_extended_presets() {
    let readme = include_str!("../../../README.md");
    let start = readme.find("```json\n").unwrap() + "```json\n".len();
    let end = start + readme[start..].find("```").unwrap();
    let cfg = PipelineConfig::from_json_str(&readme[start..end]).unwrap();
    cfg.validate().unwrap();

    assert!(cfg.augmenters.contains(&AugmenterSpec::Voronoi {
        rows_frac: crate::foundation::core::UniformRange { lo: 0.03, hi: 0.1 },
        cols_frac: crate::foundation::core::UniformRange::fixed(0.1),
        p_replace: 0.9,
    }));
    assert!(cfg.augmenters.contains(&AugmenterSpec::PolarPool {
        kernel: crate::foundation::core::IntRange { lo: 2, hi: 8 },
    }));
}
