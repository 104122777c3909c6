use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gpr_publish::{
    MavenPublisher, PublishConfig, PublishDescriptor, PublishEngine, PublishError, PublishOutcome,
};
use httpmock::prelude::*;
use regex::Regex;
use std::time::Duration;
use tempfile::TempDir;

const ARTIFACT_BYTES: &str = "PK\u{3}\u{4} fake paymenttools sdk release";
const REPO_PATH: &str = "/paymenttools/wlp-android-distribution";
const VERSION_DIR: &str =
    "/paymenttools/wlp-android-distribution/com/paymenttools/paymenttoolssdk/1.0.13";
const METADATA_PATH: &str =
    "/paymenttools/wlp-android-distribution/com/paymenttools/paymenttoolssdk/maven-metadata.xml";

fn expected_auth() -> String {
    format!("Basic {}", STANDARD.encode("octocat:ghp_token"))
}

/// 建立含 github.properties 與 AAR 的專案目錄
fn project(properties: &str, with_artifact: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("github.properties"), properties).unwrap();
    if with_artifact {
        std::fs::create_dir_all(dir.path().join("source")).unwrap();
        std::fs::write(
            dir.path().join("source/paymenttools-sdk-release.aar"),
            ARTIFACT_BYTES,
        )
        .unwrap();
    }
    dir
}

fn config_for(dir: &TempDir, repository_url: String) -> PublishConfig {
    let mut config = PublishConfig::default().with_project_root(dir.path());
    config.repository.url = repository_url;
    config.repository.timeout_seconds = 5;
    config
}

async fn publish(config: PublishConfig) -> gpr_publish::Result<PublishOutcome> {
    let descriptor = PublishDescriptor::assemble(config)?;
    let publisher = MavenPublisher::new(Duration::from_secs(5))?;
    PublishEngine::new(publisher).run(&descriptor).await
}

#[tokio::test]
async fn test_publish_uploads_artifact_pom_and_metadata() -> Result<()> {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let artifact_mock = server.mock(|when, then| {
        when.method(PUT)
            .path(format!("{}/paymenttoolssdk-1.0.13.aar", VERSION_DIR))
            .header("authorization", expected_auth().as_str())
            .body(ARTIFACT_BYTES);
        then.status(201);
    });
    let pom_mock = server.mock(|when, then| {
        when.method(PUT)
            .path(format!("{}/paymenttoolssdk-1.0.13.pom", VERSION_DIR))
            .header("authorization", expected_auth().as_str())
            .body_contains("<groupId>com.paymenttools</groupId>")
            .body_contains("<artifactId>paymenttoolssdk</artifactId>")
            .body_contains("<version>1.0.13</version>")
            .body_contains("<packaging>aar</packaging>");
        then.status(201);
    });
    let checksum_mock = server.mock(|when, then| {
        when.method(PUT)
            .path_matches(Regex::new(r"\.(md5|sha1|sha256|sha512)$").unwrap())
            .header("authorization", expected_auth().as_str());
        then.status(201);
    });
    let metadata_get = server.mock(|when, then| {
        when.method(GET).path(METADATA_PATH);
        then.status(404);
    });
    let metadata_put = server.mock(|when, then| {
        when.method(PUT)
            .path(METADATA_PATH)
            .body_contains("<latest>1.0.13</latest>")
            .body_contains("<version>1.0.13</version>");
        then.status(201);
    });

    let outcome = publish(config_for(&dir, server.url(REPO_PATH))).await?;

    artifact_mock.assert();
    pom_mock.assert();
    metadata_get.assert();
    metadata_put.assert();
    checksum_mock.assert_hits(12);

    match outcome {
        PublishOutcome::Published(receipt) => {
            assert_eq!(receipt.uploaded.len(), 15);
            assert!(receipt.uploaded[2].ends_with("paymenttoolssdk-1.0.13.aar.sha1"));
            assert!(receipt.uploaded[0].ends_with("paymenttoolssdk-1.0.13.aar"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_artifact_checksums_match_content() -> Result<()> {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let sha256 = gpr_publish::core::checksum::ChecksumAlgorithm::Sha256
        .digest_hex(ARTIFACT_BYTES.as_bytes());
    let sha256_mock = server.mock(|when, then| {
        when.method(PUT)
            .path(format!("{}/paymenttoolssdk-1.0.13.aar.sha256", VERSION_DIR))
            .body(sha256.clone());
        then.status(201);
    });
    let everything_else = server.mock(|when, then| {
        when.method(PUT).path_matches(
            Regex::new(r"\.(aar|pom|xml|md5|sha1|sha512)$|\.(pom|xml)\.sha256$").unwrap(),
        );
        then.status(201);
    });
    let _metadata_get = server.mock(|when, then| {
        when.method(GET).path(METADATA_PATH);
        then.status(404);
    });

    publish(config_for(&dir, server.url(REPO_PATH))).await?;

    sha256_mock.assert();
    everything_else.assert_hits(14);
    Ok(())
}

#[tokio::test]
async fn test_existing_metadata_is_merged() -> Result<()> {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let existing = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>com.paymenttools</groupId>
  <artifactId>paymenttoolssdk</artifactId>
  <versioning>
    <latest>1.0.12</latest>
    <release>1.0.12</release>
    <versions>
      <version>1.0.11</version>
      <version>1.0.12</version>
    </versions>
    <lastUpdated>20240101120000</lastUpdated>
  </versioning>
</metadata>
"#;

    let metadata_get = server.mock(|when, then| {
        when.method(GET)
            .path(METADATA_PATH)
            .header("authorization", expected_auth().as_str());
        then.status(200)
            .header("Content-Type", "application/xml")
            .body(existing);
    });
    let metadata_put = server.mock(|when, then| {
        when.method(PUT)
            .path(METADATA_PATH)
            .body_contains("<version>1.0.11</version>")
            .body_contains("<version>1.0.12</version>")
            .body_contains("<version>1.0.13</version>")
            .body_contains("<release>1.0.13</release>");
        then.status(201);
    });
    let _other_puts = server.mock(|when, then| {
        when.method(PUT).path_contains(VERSION_DIR);
        then.status(201);
    });
    let _metadata_checksums = server.mock(|when, then| {
        when.method(PUT).path_contains("maven-metadata.xml.");
        then.status(201);
    });

    publish(config_for(&dir, server.url(REPO_PATH))).await?;

    metadata_get.assert();
    metadata_put.assert();
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_fails_without_retry() {
    let dir = project("gpr.usr=octocat\ngpr.key=wrong\n", true);
    let server = MockServer::start();

    let artifact_mock = server.mock(|when, then| {
        when.method(PUT)
            .path(format!("{}/paymenttoolssdk-1.0.13.aar", VERSION_DIR));
        then.status(401);
    });
    let pom_mock = server.mock(|when, then| {
        when.method(PUT).path_contains(".pom");
        then.status(201);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;

    artifact_mock.assert_hits(1);
    pom_mock.assert_hits(0);
    match result {
        Err(e @ PublishError::Authentication { status: 401, .. }) => {
            assert_ne!(e.exit_code(), 0)
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_forbidden_is_authentication_error() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let _mock = server.mock(|when, then| {
        when.method(PUT).path_contains("/");
        then.status(403);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;
    assert!(matches!(
        result,
        Err(PublishError::Authentication { status: 403, .. })
    ));
}

#[tokio::test]
async fn test_duplicate_version_is_conflict() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let artifact_mock = server.mock(|when, then| {
        when.method(PUT)
            .path(format!("{}/paymenttoolssdk-1.0.13.aar", VERSION_DIR));
        then.status(409).body("Conflict");
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;

    artifact_mock.assert_hits(1);
    match result {
        Err(PublishError::PublishConflict { version, status, .. }) => {
            assert_eq!(version, "1.0.13");
            assert_eq!(status, 409);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_artifact_sends_nothing() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", false);
    let server = MockServer::start();

    let any_request = server.mock(|when, then| {
        when.path_contains("/");
        then.status(201);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;

    assert!(matches!(result, Err(PublishError::ArtifactNotFound { .. })));
    any_request.assert_hits(0);
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let dir = project("gpr.usr=octocat\n", true);
    let server = MockServer::start();

    let any_request = server.mock(|when, then| {
        when.path_contains("/");
        then.status(201);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;

    assert!(matches!(
        result,
        Err(PublishError::ConfigurationError { .. })
    ));
    any_request.assert_hits(0);
}

#[tokio::test]
async fn test_server_error_is_registry_error() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let _puts = server.mock(|when, then| {
        when.method(PUT).path_contains("/");
        then.status(201);
    });
    let _metadata_get = server.mock(|when, then| {
        when.method(GET).path(METADATA_PATH);
        then.status(502);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;
    match result {
        Err(e @ PublishError::Registry { status: 502, .. }) => assert_eq!(e.exit_code(), 3),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_metadata_response_is_not_overwritten() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);
    let server = MockServer::start();

    let _version_puts = server.mock(|when, then| {
        when.method(PUT).path_contains(VERSION_DIR);
        then.status(201);
    });
    let _metadata_get = server.mock(|when, then| {
        when.method(GET).path(METADATA_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body>Sign in to continue</body></html>");
    });
    let metadata_put = server.mock(|when, then| {
        when.method(PUT).path_contains("maven-metadata.xml");
        then.status(201);
    });

    let result = publish(config_for(&dir, server.url(REPO_PATH))).await;

    metadata_put.assert_hits(0);
    match result {
        Err(e @ PublishError::Registry { status: 200, .. }) => assert_eq!(e.exit_code(), 3),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_registry_is_network_error() {
    let dir = project("gpr.usr=octocat\ngpr.key=ghp_token\n", true);

    let result = publish(config_for(&dir, "http://127.0.0.1:1/maven".to_string())).await;

    match result {
        Err(e @ PublishError::Network(_)) => assert_eq!(e.exit_code(), 2),
        other => panic!("unexpected result: {:?}", other),
    }
}
