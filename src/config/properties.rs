use crate::domain::model::Credentials;
use crate::utils::error::{PublishError, Result};
use std::collections::HashMap;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Key/value pairs parsed from a `.properties` file.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// 從 properties 檔案載入，檔案不存在或無法讀取都視為配置錯誤。
    /// 與 java.util.Properties 相同，以 ISO-8859-1 解碼
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PublishError::config(format!(
                "cannot read properties file {}: {}",
                path.display(),
                e
            ))
        })?;
        let content: String = bytes.iter().map(|&byte| char::from(byte)).collect();
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in logical_lines(content) {
            let (key, value) = parse_entry(&line)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value of `key`, failing when it is absent or blank.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(_) => Err(PublishError::config(format!(
                "property '{}' is empty",
                key
            ))),
            None => Err(PublishError::config(format!(
                "property '{}' is missing",
                key
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the registry credentials from `path` under the two given keys.
pub fn load_credentials<P: AsRef<Path>>(
    path: P,
    username_key: &str,
    password_key: &str,
) -> Result<Credentials> {
    let path = path.as_ref();
    let properties = Properties::from_file(path)?;
    tracing::debug!(
        "Loaded {} properties from {}",
        properties.len(),
        path.display()
    );

    let with_path = |e: PublishError| match e {
        PublishError::ConfigurationError { message } => {
            PublishError::config(format!("{} in {}", message, path.display()))
        }
        other => other,
    };

    let username = properties.require(username_key).map_err(with_path)?;
    let password = properties.require(password_key).map_err(with_path)?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// 合併以反斜線結尾的續行，並略過空行與註解
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in content.lines() {
        let line = raw.trim_start_matches(is_blank);

        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        if ends_with_continuation(line) {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing && !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn parse_entry(line: &str) -> Result<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    let mut has_separator = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(unescaped) = unescape(&mut chars)? {
                    key.push(unescaped);
                }
            }
            '=' | ':' => {
                has_separator = true;
                break;
            }
            c if is_blank(c) => break,
            c => key.push(c),
        }
    }

    skip_blanks(&mut chars);
    if !has_separator && matches!(chars.peek(), Some('=') | Some(':')) {
        chars.next();
        skip_blanks(&mut chars);
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(unescaped) = unescape(&mut chars)? {
                value.push(unescaped);
            }
        } else {
            value.push(c);
        }
    }

    Ok((key, value))
}

fn skip_blanks(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().copied().is_some_and(is_blank) {
        chars.next();
    }
}

fn unescape(chars: &mut Peekable<Chars<'_>>) -> Result<Option<char>> {
    let escaped = match chars.next() {
        Some(c) => c,
        None => return Ok(None),
    };

    let c = match escaped {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\x0c',
        'u' => {
            let hex: String = chars.by_ref().take(4).collect();
            u32::from_str_radix(&hex, 16)
                .ok()
                .filter(|_| hex.len() == 4)
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    PublishError::config(format!("malformed \\u{} escape in properties", hex))
                })?
        }
        other => other,
    };

    Ok(Some(c))
}
