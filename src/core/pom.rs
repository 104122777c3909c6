use crate::domain::model::PublicationIdentity;

pub(crate) fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// 產生最小的 POM，packaging 使用產物副檔名 (aar)
pub fn generate_pom(identity: &PublicationIdentity, packaging: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{}</groupId>
  <artifactId>{}</artifactId>
  <version>{}</version>
  <packaging>{}</packaging>
</project>
"#,
        escape_xml(&identity.group_id),
        escape_xml(&identity.artifact_id),
        escape_xml(&identity.version),
        escape_xml(packaging)
    )
}
