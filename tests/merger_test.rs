use netops_etl::core::merge::MergePipeline;
use netops_etl::EtlEngine;
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn test_merge_keys_by_filename_stem() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    std::fs::write(input_dir.join("core1.json"), "[1, 2]").unwrap();
    std::fs::write(input_dir.join("core2.json"), r#"[{"port": "Gi1/1"}]"#).unwrap();

    let pipeline = MergePipeline::new(input_dir, output.clone());
    EtlEngine::new(pipeline).run().unwrap();

    let merged: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        merged,
        json!({
            "core1": [1, 2],
            "core2": [{"port": "Gi1/1"}]
        })
    );
}

#[test]
fn test_non_list_file_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    std::fs::write(input_dir.join("a.json"), "[1, 2]").unwrap();
    std::fs::write(input_dir.join("b.json"), r#"{"x": 1}"#).unwrap();

    let pipeline = MergePipeline::new(input_dir, output.clone());
    EtlEngine::new(pipeline).run().unwrap();

    let merged: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged, json!({"a": [1, 2]}));
}

#[test]
fn test_unparseable_file_does_not_abort_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    std::fs::write(input_dir.join("broken.json"), "{ not json").unwrap();
    std::fs::write(input_dir.join("ok.json"), "[true]").unwrap();

    let pipeline = MergePipeline::new(input_dir, output.clone());
    EtlEngine::new(pipeline).run().unwrap();

    let merged: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged, json!({"ok": [true]}));
}

#[test]
fn test_non_json_files_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    std::fs::write(input_dir.join("data.json"), "[]").unwrap();
    std::fs::write(input_dir.join("README.md"), "# not data").unwrap();

    let pipeline = MergePipeline::new(input_dir, output.clone());
    EtlEngine::new(pipeline).run().unwrap();

    let merged: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged, json!({"data": []}));
}

#[test]
fn test_empty_directory_yields_empty_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    let pipeline = MergePipeline::new(input_dir, output.clone());
    EtlEngine::new(pipeline).run().unwrap();

    let merged: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged, json!({}));
}

#[test]
fn test_merge_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("parts");
    let output = temp_dir.path().join("merged.json");
    std::fs::create_dir(&input_dir).unwrap();

    std::fs::write(input_dir.join("z.json"), "[3]").unwrap();
    std::fs::write(input_dir.join("a.json"), "[1]").unwrap();

    EtlEngine::new(MergePipeline::new(input_dir.clone(), output.clone()))
        .run()
        .unwrap();
    let first = std::fs::read(&output).unwrap();

    EtlEngine::new(MergePipeline::new(input_dir, output.clone()))
        .run()
        .unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}
