use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 連接埠排除模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Static,
    VlanAware,
}

/// 排除規則。取代原本寫死在模組層級的排除集合：
/// 固定清單、模式、VLAN 觸發值都可以從 TOML 檔帶入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    pub mode: FilterMode,
    pub excluded_ports: HashSet<String>,
    #[serde(default = "default_vlan_trigger")]
    pub vlan_trigger: String,
}

fn default_vlan_trigger() -> String {
    "100".to_string()
}

impl FilterRules {
    /// 靜態模式的預設排除清單
    pub fn static_default() -> Self {
        Self {
            mode: FilterMode::Static,
            excluded_ports: ["Gi1/1", "CPU", "Gi1/1/1", "Te1/1/1", "pv"]
                .iter()
                .map(|port| port.to_string())
                .collect(),
            vlan_trigger: default_vlan_trigger(),
        }
    }

    /// VLAN 感知模式的預設排除清單
    pub fn vlan_aware_default() -> Self {
        Self {
            mode: FilterMode::VlanAware,
            excluded_ports: ["pv", "CPU", "for"]
                .iter()
                .map(|port| port.to_string())
                .collect(),
            vlan_trigger: default_vlan_trigger(),
        }
    }

    /// 從 TOML 檔案載入規則
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析規則
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRUNK_VLAN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for FilterRules {
    fn validate(&self) -> Result<()> {
        for port in &self.excluded_ports {
            validate_non_empty_string("excluded_ports", port)?;
        }

        if self.mode == FilterMode::VlanAware {
            validate_non_empty_string("vlan_trigger", &self.vlan_trigger)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_rules() {
        let toml_content = r#"
mode = "vlan_aware"
excluded_ports = ["pv", "CPU"]
vlan_trigger = "200"
"#;

        let rules = FilterRules::from_toml_str(toml_content).unwrap();

        assert_eq!(rules.mode, FilterMode::VlanAware);
        assert_eq!(rules.excluded_ports.len(), 2);
        assert!(rules.excluded_ports.contains("CPU"));
        assert_eq!(rules.vlan_trigger, "200");
    }

    #[test]
    fn test_vlan_trigger_defaults_to_100() {
        let toml_content = r#"
mode = "static"
excluded_ports = ["Gi1/1"]
"#;

        let rules = FilterRules::from_toml_str(toml_content).unwrap();
        assert_eq!(rules.vlan_trigger, "100");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let toml_content = r#"
mode = "fancy"
excluded_ports = []
"#;

        assert!(FilterRules::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_TRUNK_VLAN", "300");

        let toml_content = r#"
mode = "vlan_aware"
excluded_ports = ["CPU"]
vlan_trigger = "${TEST_TRUNK_VLAN}"
"#;

        let rules = FilterRules::from_toml_str(toml_content).unwrap();
        assert_eq!(rules.vlan_trigger, "300");

        std::env::remove_var("TEST_TRUNK_VLAN");
    }

    #[test]
    fn test_validation_rejects_blank_trigger() {
        let rules = FilterRules {
            mode: FilterMode::VlanAware,
            excluded_ports: HashSet::new(),
            vlan_trigger: "  ".to_string(),
        };

        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_port() {
        let mut rules = FilterRules::static_default();
        rules.excluded_ports.insert(String::new());

        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_rules_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
mode = "static"
excluded_ports = ["Gi9/9"]
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let rules = FilterRules::from_file(temp_file.path()).unwrap();
        assert_eq!(rules.mode, FilterMode::Static);
        assert!(rules.excluded_ports.contains("Gi9/9"));
    }

    #[test]
    fn test_mode_defaults_carry_source_lists() {
        let static_rules = FilterRules::static_default();
        assert!(static_rules.excluded_ports.contains("Gi1/1"));
        assert!(static_rules.excluded_ports.contains("Te1/1/1"));

        let vlan_rules = FilterRules::vlan_aware_default();
        assert!(vlan_rules.excluded_ports.contains("for"));
        assert_eq!(vlan_rules.vlan_trigger, "100");
    }
}
