use crate::core::pom::escape_xml;
use crate::domain::model::PublicationIdentity;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// The per-artifact `maven-metadata.xml` index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
    pub last_updated: Option<String>,
}

struct Patterns {
    root: Regex,
    versions_block: Regex,
    version: Regex,
    latest: Regex,
    release: Regex,
    last_updated: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        root: Regex::new(r"<metadata[\s>]").unwrap(),
        versions_block: Regex::new(r"(?s)<versions>(.*?)</versions>").unwrap(),
        version: Regex::new(r"<version>\s*([^<]*?)\s*</version>").unwrap(),
        latest: Regex::new(r"<latest>\s*([^<]*?)\s*</latest>").unwrap(),
        release: Regex::new(r"<release>\s*([^<]*?)\s*</release>").unwrap(),
        last_updated: Regex::new(r"<lastUpdated>\s*([^<]*?)\s*</lastUpdated>").unwrap(),
    })
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn capture(pattern: &Regex, xml: &str) -> Option<String> {
    pattern
        .captures(xml)
        .map(|caps| unescape_xml(&caps[1]))
        .filter(|value| !value.is_empty())
}

impl MavenMetadata {
    pub fn new(identity: &PublicationIdentity) -> Self {
        Self {
            group_id: identity.group_id.clone(),
            artifact_id: identity.artifact_id.clone(),
            latest: None,
            release: None,
            versions: Vec::new(),
            last_updated: None,
        }
    }

    /// 解析 registry 上既有的 metadata；只讀取 versioning 相關欄位，
    /// groupId / artifactId 以本次發佈為準。沒有 `<metadata>` 根節點時回傳 None
    pub fn parse(identity: &PublicationIdentity, xml: &str) -> Option<Self> {
        let patterns = patterns();
        if !patterns.root.is_match(xml) {
            return None;
        }
        let mut metadata = Self::new(identity);

        if let Some(block) = patterns.versions_block.captures(xml) {
            for caps in patterns.version.captures_iter(&block[1]) {
                let version = unescape_xml(&caps[1]);
                if !version.is_empty() && !metadata.versions.contains(&version) {
                    metadata.versions.push(version);
                }
            }
        }

        metadata.latest = capture(&patterns.latest, xml);
        metadata.release = capture(&patterns.release, xml);
        metadata.last_updated = capture(&patterns.last_updated, xml);
        Some(metadata)
    }

    /// Records `version` as the newest release.
    pub fn add_version(&mut self, version: &str, now: DateTime<Utc>) {
        if !self.versions.iter().any(|v| v == version) {
            self.versions.push(version.to_string());
        }
        self.latest = Some(version.to_string());
        self.release = Some(version.to_string());
        self.last_updated = Some(now.format("%Y%m%d%H%M%S").to_string());
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<metadata>\n");
        xml.push_str(&format!("  <groupId>{}</groupId>\n", escape_xml(&self.group_id)));
        xml.push_str(&format!(
            "  <artifactId>{}</artifactId>\n",
            escape_xml(&self.artifact_id)
        ));
        xml.push_str("  <versioning>\n");
        if let Some(latest) = &self.latest {
            xml.push_str(&format!("    <latest>{}</latest>\n", escape_xml(latest)));
        }
        if let Some(release) = &self.release {
            xml.push_str(&format!("    <release>{}</release>\n", escape_xml(release)));
        }
        xml.push_str("    <versions>\n");
        for version in &self.versions {
            xml.push_str(&format!("      <version>{}</version>\n", escape_xml(version)));
        }
        xml.push_str("    </versions>\n");
        if let Some(last_updated) = &self.last_updated {
            xml.push_str(&format!(
                "    <lastUpdated>{}</lastUpdated>\n",
                escape_xml(last_updated)
            ));
        }
        xml.push_str("  </versioning>\n</metadata>\n");
        xml
    }
}
