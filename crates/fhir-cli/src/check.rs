//! Decode-only validation of resource files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use fhir_codec::WireFormat;

use crate::input::{decode, detect_format};

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Failed,
}

impl CheckOutcome {
    fn failed(file: &Path, format: Option<WireFormat>, kind: &str, message: String) -> Self {
        Self {
            file: file.to_path_buf(),
            format: format.map(|format| format.as_str().to_string()),
            resource_type: None,
            status: CheckStatus::Failed,
            error_kind: Some(kind.to_string()),
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok()).count()
    }
}

/// Decode one file and record what happened. Never fails; problems become
/// failed outcomes.
pub fn check_file(path: &Path) -> CheckOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            warn!(path = %path.display(), %error, "cannot read file");
            return CheckOutcome::failed(path, None, "io", error.to_string());
        }
    };
    let Some(format) = detect_format(path, &content) else {
        warn!(path = %path.display(), "unknown wire format");
        return CheckOutcome::failed(
            path,
            None,
            "unknown-format",
            "content is neither JSON nor XML".to_string(),
        );
    };
    match decode(&content, format) {
        Ok(resource) => {
            info!(path = %path.display(), resource_type = resource.resource_type(), "ok");
            CheckOutcome {
                file: path.to_path_buf(),
                format: Some(format.as_str().to_string()),
                resource_type: Some(resource.resource_type().to_string()),
                status: CheckStatus::Ok,
                error_kind: None,
                message: None,
            }
        }
        Err(error) => {
            warn!(path = %path.display(), kind = %error.kind(), %error, "decode failed");
            CheckOutcome::failed(path, Some(format), error.kind().as_str(), error.to_string())
        }
    }
}

pub fn check_files(paths: &[PathBuf]) -> CheckReport {
    CheckReport {
        outcomes: paths.iter().map(|path| check_file(path)).collect(),
    }
}
