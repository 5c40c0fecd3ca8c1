//! Layouts built from pipeline configuration.

use std::fs;

use tempfile::TempDir;
use txseq_cli::config::PipelineConfig;
use txseq_layout::EncodingStrategy;
use txseq_model::{Field, TensorSpace};

fn config_from(json: &str) -> PipelineConfig {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("txseq.json");
    fs::write(&path, json).unwrap();
    PipelineConfig::load(&path).unwrap()
}

#[test]
fn default_config_builds_full_banksformer_layout() {
    let info = PipelineConfig::default().build_layout().unwrap();
    assert_eq!(info.order().len(), 7);
    assert_eq!(info.layout(TensorSpace::Network).total_width(), 101);
}

#[test]
fn tcode_layout_export() {
    let config = config_from(r#"{"preset": "tcode", "tcode_classes": 8}"#);
    let info = config.build_layout().unwrap();
    let json = serde_json::to_string_pretty(&info.to_config()).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "ORDER": [
        "tcode_num"
      ],
      "FIELD_DIMS_IN": {
        "tcode_num": 8
      },
      "FIELD_STARTS_IN": {
        "tcode_num": 0
      },
      "FIELD_DIMS_TAR": {
        "tcode_num": 1
      },
      "FIELD_STARTS_TAR": {
        "tcode_num": 0
      },
      "FIELD_DIMS_NET": {
        "tcode_num": 8
      },
      "FIELD_STARTS_NET": {
        "tcode_num": 0
      },
      "LOSS_TYPES": {
        "tcode_num": "scce"
      },
      "ACTIVATIONS": {
        "tcode_num": null
      }
    }
    "#);
}

#[test]
fn overrides_change_the_network_head() {
    let config = config_from(
        r#"{"scenario": "dateclock", "overrides": {"network": {"td_sc": "raw"}}}"#,
    );
    assert_eq!(config.scenario, EncodingStrategy::DateClock);
    let info = config.build_layout().unwrap();
    let net = info.layout(TensorSpace::Network);
    assert_eq!(net.width(Field::TdSc), Some(1));
    assert_eq!(net.width(Field::Day), Some(2));
    assert_eq!(info.activation(Field::TdSc), None);
}

#[test]
fn override_of_field_outside_preset_fails() {
    let config = config_from(r#"{"preset": "tcode", "overrides": {"input": {"day": "cl"}}}"#);
    let err = config.build_layout().unwrap_err();
    assert!(format!("{err:#}").contains("day"));
}

#[test]
fn input_only_code_on_network_fails() {
    let config = config_from(r#"{"overrides": {"network": {"month": "rbf"}}}"#);
    let err = config.build_layout().unwrap_err();
    assert!(format!("{err:#}").contains("cannot be a network output"));
}

#[test]
fn extension_appends_fields_to_the_preset() {
    let config = config_from(
        r#"{
            "preset": "type2",
            "extend": {
                "fields": ["k_symbol_num"],
                "input": {"k_symbol_num": "oh_symbol"},
                "target": {"k_symbol_num": "raw"},
                "network": {"k_symbol_num": "oh_symbol", "td_sc": "dist_cont"}
            }
        }"#,
    );
    let info = config.build_layout().unwrap();
    assert_eq!(info.order().last(), Some(&Field::KSymbolNum));
    let input = info.layout(TensorSpace::Input);
    assert_eq!(input.start(Field::KSymbolNum), Some(18));
    assert_eq!(input.total_width(), 27);
    assert_eq!(info.layout(TensorSpace::Target).total_width(), 4);
    assert_eq!(info.layout(TensorSpace::Network).total_width(), 29);
}

#[test]
fn extension_conflicting_with_preset_fails() {
    let config = config_from(
        r#"{"preset": "type2", "extend": {"network": {"td_sc": "raw"}}}"#,
    );
    let err = config.build_layout().unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("extend network encoding"));
    assert!(message.contains("field td_sc is encoded as dist_cont and as raw"));
}

#[test]
fn unknown_preset_fails() {
    let config = config_from(r#"{"preset": "wide"}"#);
    let err = config.build_layout().unwrap_err();
    assert!(format!("{err:#}").contains("unknown layout preset"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = PipelineConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}
