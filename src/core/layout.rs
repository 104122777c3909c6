use crate::core::checksum::ChecksumAlgorithm;
use crate::domain::model::{Publication, PublicationIdentity};

pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Maven repository layout rooted at a registry base URL.
#[derive(Debug, Clone)]
pub struct MavenLayout {
    base_url: String,
}

impl MavenLayout {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/{group/as/path}/{artifactId}`
    pub fn artifact_dir(&self, identity: &PublicationIdentity) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            identity.group_id.replace('.', "/"),
            identity.artifact_id
        )
    }

    pub fn version_dir(&self, identity: &PublicationIdentity) -> String {
        format!("{}/{}", self.artifact_dir(identity), identity.version)
    }

    pub fn file_name(
        identity: &PublicationIdentity,
        classifier: Option<&str>,
        extension: &str,
    ) -> String {
        match classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                identity.artifact_id, identity.version, classifier, extension
            ),
            None => format!("{}-{}.{}", identity.artifact_id, identity.version, extension),
        }
    }

    pub fn artifact_url(&self, publication: &Publication) -> String {
        format!(
            "{}/{}",
            self.version_dir(&publication.identity),
            Self::file_name(
                &publication.identity,
                publication.artifact.classifier.as_deref(),
                &publication.artifact.extension,
            )
        )
    }

    pub fn pom_url(&self, identity: &PublicationIdentity) -> String {
        format!(
            "{}/{}",
            self.version_dir(identity),
            Self::file_name(identity, None, "pom")
        )
    }

    pub fn metadata_url(&self, identity: &PublicationIdentity) -> String {
        format!("{}/{}", self.artifact_dir(identity), METADATA_FILE)
    }

    pub fn checksum_url(file_url: &str, algorithm: ChecksumAlgorithm) -> String {
        format!("{}.{}", file_url, algorithm.extension())
    }

    /// 依上傳順序列出所有檔案 URL (含 checksum)
    pub fn planned_uploads(&self, publication: &Publication) -> Vec<String> {
        let files = [
            self.artifact_url(publication),
            self.pom_url(&publication.identity),
            self.metadata_url(&publication.identity),
        ];

        files
            .iter()
            .flat_map(|file| {
                std::iter::once(file.clone()).chain(
                    ChecksumAlgorithm::ALL
                        .into_iter()
                        .map(move |algorithm| Self::checksum_url(file, algorithm)),
                )
            })
            .collect()
    }
}
