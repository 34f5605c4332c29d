use crate::core::Pipeline;
use crate::domain::model::ValueKind;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// 把一份 JSON 文件拆成一個條目一個檔案。
/// 陣列 → 0001.json、0002.json…；物件 → <sanitized key>.json。
pub struct SplitPipeline {
    input: PathBuf,
    output_dir: PathBuf,
}

impl SplitPipeline {
    pub fn new(input: PathBuf, output_dir: PathBuf) -> Self {
        Self { input, output_dir }
    }
}

/// 檔名淨化：[A-Za-z0-9_-] 以外的字元一律換成底線
pub fn sanitize_filename(name: &str) -> String {
    let re = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
    re.replace_all(name, "_").into_owned()
}

impl Pipeline for SplitPipeline {
    type Extracted = Value;
    type Transformed = Vec<(String, Value)>;

    fn extract(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.input)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn transform(&self, data: Value) -> Result<Vec<(String, Value)>> {
        match data {
            Value::Array(entries) => Ok(entries
                .into_iter()
                .enumerate()
                .map(|(idx, entry)| (format!("{:04}.json", idx + 1), entry))
                .collect()),
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, entry)| (format!("{}.json", sanitize_filename(&key)), entry))
                .collect()),
            other => Err(EtlError::UnsupportedRoot {
                found: ValueKind::of(&other),
                expected: "array or object",
            }),
        }
    }

    fn load(&self, entries: Vec<(String, Value)>) -> Result<String> {
        fs::create_dir_all(&self.output_dir)?;

        let count = entries.len();
        for (filename, entry) in entries {
            let path = self.output_dir.join(filename);
            fs::write(&path, serde_json::to_string_pretty(&entry)?)?;
            println!("✔ Wrote {}", path.display());
        }

        Ok(format!(
            "Split {} entries into {}",
            count,
            self.output_dir.display()
        ))
    }
}
