use crate::core::checksum::ChecksumAlgorithm;
use crate::core::layout::MavenLayout;
use crate::core::metadata::MavenMetadata;
use crate::core::pom::generate_pom;
use crate::domain::model::{Publication, PublicationIdentity, PublishReceipt, RegistryTarget};
use crate::domain::ports::Publisher;
use crate::utils::error::{PublishError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("gpr-publish/", env!("CARGO_PKG_VERSION"));

/// Uploads a publication to a Maven HTTP repository the way Gradle's
/// `maven-publish` does: artifact, POM and `maven-metadata.xml`, each
/// followed by its checksum sidecars.
pub struct MavenPublisher {
    client: Client,
}

impl MavenPublisher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = build_client(timeout, USER_AGENT)?;
        Ok(Self { client })
    }

    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
        target: &RegistryTarget,
        version: &str,
    ) -> Result<()> {
        tracing::debug!("PUT {} ({} bytes)", url, body.len());
        let response = self
            .client
            .put(url)
            .basic_auth(
                &target.credentials.username,
                Some(&target.credentials.password),
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        tracing::debug!("Registry response status: {}", response.status());
        check_status(response.status(), url, version)
    }

    /// 上傳檔案本體後接著上傳每一種 checksum
    async fn put_with_checksums(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
        target: &RegistryTarget,
        version: &str,
        receipt: &mut PublishReceipt,
    ) -> Result<()> {
        let checksums: Vec<(ChecksumAlgorithm, String)> = ChecksumAlgorithm::ALL
            .into_iter()
            .map(|algorithm| (algorithm, algorithm.digest_hex(&body)))
            .collect();

        self.put(url, body, content_type, target, version).await?;
        receipt.uploaded.push(url.to_string());

        for (algorithm, digest) in checksums {
            let checksum_url = MavenLayout::checksum_url(url, algorithm);
            self.put(&checksum_url, digest.into_bytes(), "text/plain", target, version)
                .await?;
            receipt.uploaded.push(checksum_url);
        }

        Ok(())
    }

    /// Existing metadata, or `None` when the artifact has never been published.
    async fn fetch_metadata(
        &self,
        url: &str,
        target: &RegistryTarget,
        identity: &PublicationIdentity,
    ) -> Result<Option<MavenMetadata>> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .basic_auth(
                &target.credentials.username,
                Some(&target.credentials.password),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No metadata at {}, starting a new index", url);
            return Ok(None);
        }

        let status = response.status();
        check_status(status, url, &identity.version)?;
        let body = response.text().await?;

        // 非 metadata 的回應 (例如代理伺服器的 HTML) 不能當成空索引覆寫回去
        match MavenMetadata::parse(identity, &body) {
            Some(metadata) => Ok(Some(metadata)),
            None => {
                tracing::error!("Response from {} is not maven-metadata.xml", url);
                Err(PublishError::Registry {
                    status: status.as_u16(),
                    url: url.to_string(),
                })
            }
        }
    }
}

/// 建立 HTTP client 失敗 (TLS 後端、無效標頭) 是本機設定問題，不是網路錯誤
fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| PublishError::config(format!("cannot build HTTP client: {}", e)))
}

fn check_status(status: StatusCode, url: &str, version: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PublishError::Authentication {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(PublishError::PublishConflict {
                version: version.to_string(),
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
        _ => Err(PublishError::Registry {
            status: status.as_u16(),
            url: url.to_string(),
        }),
    }
}

#[async_trait]
impl Publisher for MavenPublisher {
    async fn publish(
        &self,
        publication: &Publication,
        target: &RegistryTarget,
    ) -> Result<PublishReceipt> {
        let identity = &publication.identity;
        let version = identity.version.as_str();
        let layout = MavenLayout::new(&target.url);
        let mut receipt = PublishReceipt::default();

        let artifact_bytes = publication.artifact.read().await?;
        tracing::info!(
            "📦 Uploading {} ({} bytes) to {}",
            publication.artifact.path.display(),
            artifact_bytes.len(),
            target.name
        );

        self.put_with_checksums(
            &layout.artifact_url(publication),
            artifact_bytes,
            "application/octet-stream",
            target,
            version,
            &mut receipt,
        )
        .await?;

        let pom = generate_pom(identity, &publication.artifact.extension);
        self.put_with_checksums(
            &layout.pom_url(identity),
            pom.into_bytes(),
            "application/xml",
            target,
            version,
            &mut receipt,
        )
        .await?;

        let metadata_url = layout.metadata_url(identity);
        let mut metadata = match self.fetch_metadata(&metadata_url, target, identity).await? {
            Some(metadata) => metadata,
            None => MavenMetadata::new(identity),
        };
        metadata.add_version(version, Utc::now());
        self.put_with_checksums(
            &metadata_url,
            metadata.to_xml().into_bytes(),
            "application/xml",
            target,
            version,
            &mut receipt,
        )
        .await?;

        tracing::info!("✅ Published {} ({} files)", identity, receipt.uploaded.len());
        Ok(receipt)
    }
}
