use crate::core::Pipeline;
use crate::domain::model::ScanHost;
use crate::utils::error::Result;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use xml::reader::{EventReader, XmlEvent};

/// 比對 MAC 清單與掃描報告：清單中的 MAC 出現在掃描結果時
/// 印出它的 IP。
pub struct XrefPipeline {
    mac_list: PathBuf,
    scan_report: PathBuf,
}

impl XrefPipeline {
    pub fn new(mac_list: PathBuf, scan_report: PathBuf) -> Self {
        Self {
            mac_list,
            scan_report,
        }
    }
}

/// MAC 正規化：轉大寫、破折號改冒號、去掉十六進位與冒號以外的字元
pub fn normalize_mac(mac: &str) -> String {
    let mac = mac.to_uppercase().replace('-', ":");
    let re = Regex::new(r"[^0-9A-F:]").unwrap();
    re.replace_all(&mac, "").into_owned()
}

/// 讀 MAC 清單，一行一個位址，空行跳過
pub fn load_mac_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_mac)
        .collect()
}

/// 走訪掃描報告裡的每個 <host>，收集它的 ipv4 與 mac 位址。
/// 同型別出現多次時，以文件順序最後一個為準。
pub fn parse_scan_report<R: Read>(reader: R) -> Result<Vec<ScanHost>> {
    let mut hosts = Vec::new();
    let mut current: Option<ScanHost> = None;

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => match name.local_name.as_str() {
                "host" => current = Some(ScanHost::default()),
                "address" => {
                    if let Some(host) = current.as_mut() {
                        let mut addr_type = None;
                        let mut addr = None;
                        for attribute in &attributes {
                            match attribute.name.local_name.as_str() {
                                "addrtype" => addr_type = Some(attribute.value.as_str()),
                                "addr" => addr = Some(attribute.value.as_str()),
                                _ => {}
                            }
                        }
                        match (addr_type, addr) {
                            (Some("ipv4"), Some(addr)) => host.ipv4 = Some(addr.to_string()),
                            (Some("mac"), Some(addr)) => host.mac = Some(normalize_mac(addr)),
                            _ => {}
                        }
                    }
                }
                _ => {}
            },
            XmlEvent::EndElement { name } => {
                if name.local_name == "host" {
                    if let Some(host) = current.take() {
                        hosts.push(host);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(hosts)
}

impl Pipeline for XrefPipeline {
    type Extracted = (HashSet<String>, Vec<ScanHost>);
    type Transformed = Vec<(String, String)>;

    fn extract(&self) -> Result<(HashSet<String>, Vec<ScanHost>)> {
        let mac_list = load_mac_list(&fs::read_to_string(&self.mac_list)?);
        tracing::debug!("loaded {} MAC addresses", mac_list.len());

        let report = BufReader::new(File::open(&self.scan_report)?);
        let hosts = parse_scan_report(report)?;
        tracing::debug!("scan report contains {} hosts", hosts.len());

        Ok((mac_list, hosts))
    }

    fn transform(&self, (mac_list, hosts): Self::Extracted) -> Result<Vec<(String, String)>> {
        let mut matches = Vec::new();

        for host in hosts {
            if let (Some(mac), Some(ip)) = (host.mac, host.ipv4) {
                if mac_list.contains(&mac) {
                    matches.push((mac, ip));
                }
            }
        }

        Ok(matches)
    }

    fn load(&self, matches: Vec<(String, String)>) -> Result<String> {
        if matches.is_empty() {
            println!("No matching MAC addresses found.");
            return Ok("Matched 0 hosts".to_string());
        }

        let count = matches.len();
        for (mac, ip) in matches {
            println!("{} => {}", mac, ip);
        }

        Ok(format!("Matched {} host(s)", count))
    }
}
