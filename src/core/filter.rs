use crate::config::filter_rules::{FilterMode, FilterRules};
use crate::core::Pipeline;
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// 依排除規則過濾介面紀錄。輸入給檔案就處理單檔，
/// 給目錄就逐一處理裡面的每個 .json。
pub struct FilterPipeline {
    input: PathBuf,
    output: PathBuf,
    rules: FilterRules,
}

/// 一個輸入檔解析後的內容
pub struct SourceFile {
    pub filename: String,
    pub root: Value,
}

/// 過濾完、等著寫出的檔案
pub struct FilteredFile {
    pub filename: String,
    pub removed: usize,
    pub records: Vec<Value>,
}

impl FilterPipeline {
    pub fn new(input: PathBuf, output: PathBuf, rules: FilterRules) -> Self {
        Self {
            input,
            output,
            rules,
        }
    }
}

/// 組出一個檔案的排除集合：固定清單，VLAN 感知模式再聯集
/// 所有 vlan == trigger 紀錄的 port
fn exclusion_set(rules: &FilterRules, records: &[Value]) -> HashSet<String> {
    let mut excluded = rules.excluded_ports.clone();

    if rules.mode == FilterMode::VlanAware {
        for record in records {
            if record.get("vlan").and_then(Value::as_str) == Some(rules.vlan_trigger.as_str()) {
                if let Some(port) = record.get("port").and_then(Value::as_str) {
                    excluded.insert(port.to_string());
                }
            }
        }
    }

    excluded
}

/// 過濾一份紀錄序列，保留原本順序；回傳 (移除筆數, 留下的紀錄)
pub fn filter_records(rules: &FilterRules, records: Vec<Value>) -> (usize, Vec<Value>) {
    let excluded = exclusion_set(rules, &records);
    let before = records.len();

    let kept: Vec<Value> = records
        .into_iter()
        .filter(|record| match record.get("port").and_then(Value::as_str) {
            Some(port) => !excluded.contains(port),
            None => true,
        })
        .collect();

    let removed = before - kept.len();
    (removed, kept)
}

impl Pipeline for FilterPipeline {
    type Extracted = Vec<SourceFile>;
    type Transformed = Vec<FilteredFile>;

    fn extract(&self) -> Result<Vec<SourceFile>> {
        if self.input.is_dir() {
            let mut filenames: Vec<String> = fs::read_dir(&self.input)?
                .collect::<std::io::Result<Vec<_>>>()?
                .into_iter()
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .filter(|name| name.ends_with(".json"))
                .collect();
            // 目錄列舉順序不保證，排序求確定性
            filenames.sort();

            let mut sources = Vec::new();
            for filename in filenames {
                let content = fs::read_to_string(self.input.join(&filename))?;
                sources.push(SourceFile {
                    filename,
                    root: serde_json::from_str(&content)?,
                });
            }
            Ok(sources)
        } else {
            let filename = self
                .input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.input.display().to_string());
            let content = fs::read_to_string(&self.input)?;
            Ok(vec![SourceFile {
                filename,
                root: serde_json::from_str(&content)?,
            }])
        }
    }

    fn transform(&self, sources: Vec<SourceFile>) -> Result<Vec<FilteredFile>> {
        let mut filtered = Vec::new();

        for source in sources {
            match source.root {
                Value::Array(records) => {
                    let (removed, kept) = filter_records(&self.rules, records);
                    filtered.push(FilteredFile {
                        filename: source.filename,
                        removed,
                        records: kept,
                    });
                }
                _ => {
                    tracing::warn!("{} is not a list, skipping", source.filename);
                    eprintln!("❌ Skipped (not a list): {}", source.filename);
                }
            }
        }

        Ok(filtered)
    }

    fn load(&self, files: Vec<FilteredFile>) -> Result<String> {
        let batch = self.input.is_dir();
        if batch {
            fs::create_dir_all(&self.output)?;
        }

        let count = files.len();
        let mut total_removed = 0;
        for file in files {
            let out_path = if batch {
                self.output.join(&file.filename)
            } else {
                self.output.clone()
            };
            fs::write(
                &out_path,
                serde_json::to_string_pretty(&Value::Array(file.records))?,
            )?;

            let out_name = out_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| out_path.display().to_string());
            println!(
                "✔ {} → {} (removed {} entries)",
                file.filename, out_name, file.removed
            );
            total_removed += file.removed;
        }

        Ok(format!(
            "Filtered {} file(s), removed {} entries",
            count, total_removed
        ))
    }
}
