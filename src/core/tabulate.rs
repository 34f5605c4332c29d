use crate::core::Pipeline;
use crate::domain::model::ValueKind;
use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// 把 {站點: [紀錄, ...]} 攤平成一張表：一筆紀錄一列，
/// 每列帶上 site 欄位，輸出 CSV。
pub struct TabulatePipeline {
    input: PathBuf,
    output: PathBuf,
}

/// 攤平後的表：欄位清單 + 每列的欄值
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl TabulatePipeline {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self { input, output }
    }
}

/// 一格的文字呈現：字串不加引號、null 與缺欄留空、其餘用 JSON 字面
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 攤平站點 mapping；site 欄先放，紀錄自己的同名欄位優先
pub fn flatten_sites(data: Map<String, Value>) -> Table {
    let mut columns = vec!["site".to_string()];
    let mut seen: HashSet<String> = columns.iter().cloned().collect();
    let mut rows = Vec::new();

    for (site, entries) in data {
        let entries = match entries {
            Value::Array(entries) => entries,
            _ => {
                eprintln!("⚠️ Skipped {}: not a list of entries.", site);
                continue;
            }
        };

        for entry in entries {
            let fields = match entry {
                Value::Object(fields) => fields,
                other => {
                    tracing::warn!("site {} has a non-object entry, skipping: {}", site, other);
                    continue;
                }
            };

            let mut row = Map::new();
            row.insert("site".to_string(), Value::String(site.clone()));
            for (key, value) in fields {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
                row.insert(key, value);
            }
            rows.push(row);
        }
    }

    Table { columns, rows }
}

impl Pipeline for TabulatePipeline {
    type Extracted = Value;
    type Transformed = Table;

    fn extract(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.input)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn transform(&self, data: Value) -> Result<Table> {
        match data {
            Value::Object(map) => Ok(flatten_sites(map)),
            other => Err(EtlError::UnsupportedRoot {
                found: ValueKind::of(&other),
                expected: "object keyed by site name",
            }),
        }
    }

    fn load(&self, table: Table) -> Result<String> {
        let row_count = table.rows.len();
        let mut writer = csv::Writer::from_path(&self.output)?;

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&cells)?;
        }
        writer.flush()?;

        Ok(format!(
            "Wrote {} rows to {}",
            row_count,
            self.output.display()
        ))
    }
}
