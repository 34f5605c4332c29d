use crate::core::Pipeline;
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// 把目錄下的 .json 檔合併成一個 mapping，鍵為去掉副檔名的檔名。
/// 單一檔案壞掉只跳過該檔，不中斷整批。
pub struct MergePipeline {
    input_dir: PathBuf,
    output: PathBuf,
}

/// 成功解析的輸入檔
pub struct MergeSource {
    pub filename: String,
    pub stem: String,
    pub root: Value,
}

impl MergePipeline {
    pub fn new(input_dir: PathBuf, output: PathBuf) -> Self {
        Self { input_dir, output }
    }
}

impl Pipeline for MergePipeline {
    type Extracted = Vec<MergeSource>;
    type Transformed = Map<String, Value>;

    fn extract(&self) -> Result<Vec<MergeSource>> {
        let mut filenames: Vec<String> = fs::read_dir(&self.input_dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json"))
            .collect();
        filenames.sort();

        let mut sources = Vec::new();
        for filename in filenames {
            let stem = filename
                .strip_suffix(".json")
                .unwrap_or(&filename)
                .to_string();

            // 讀檔或解析失敗都只影響這一個檔案
            let parsed = fs::read_to_string(self.input_dir.join(&filename))
                .map_err(crate::utils::error::EtlError::from)
                .and_then(|content| Ok(serde_json::from_str(&content)?));

            match parsed {
                Ok(root) => sources.push(MergeSource {
                    filename,
                    stem,
                    root,
                }),
                Err(e) => {
                    tracing::warn!("failed to read {}: {}", filename, e);
                    eprintln!("❌ Error reading {}: {}", filename, e);
                }
            }
        }

        Ok(sources)
    }

    fn transform(&self, sources: Vec<MergeSource>) -> Result<Map<String, Value>> {
        let mut merged = Map::new();

        for source in sources {
            match source.root {
                Value::Array(_) => {
                    merged.insert(source.stem, source.root);
                    println!("✔ Merged: {}", source.filename);
                }
                _ => {
                    eprintln!("❌ Skipped (not a list): {}", source.filename);
                }
            }
        }

        Ok(merged)
    }

    fn load(&self, merged: Map<String, Value>) -> Result<String> {
        fs::write(
            &self.output,
            serde_json::to_string_pretty(&Value::Object(merged))?,
        )?;

        Ok(format!("Merged JSON written to {}", self.output.display()))
    }
}
