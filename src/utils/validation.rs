use crate::utils::error::{PublishError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(PublishError::config(format!("{} cannot be empty", field_name)));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(PublishError::config(format!(
                "{}: unsupported URL scheme '{}' in {}",
                field_name, scheme, url_str
            ))),
        },
        Err(e) => Err(PublishError::config(format!(
            "{}: invalid URL '{}': {}",
            field_name, url_str, e
        ))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PublishError::config(format!("{} cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(PublishError::config(format!(
            "{} contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PublishError::config(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-.]+$").expect("valid coordinate regex"))
}

/// Maven 座標 (groupId / artifactId / version) 只允許安全字元，避免路徑穿越
pub fn validate_coordinate(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if !coordinate_pattern().is_match(value) || value.starts_with('.') || value.contains("..") {
        return Err(PublishError::config(format!(
            "{}: '{}' is not a valid Maven coordinate",
            field_name, value
        )));
    }
    Ok(())
}
