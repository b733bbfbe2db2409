use crate::models::pairing::PairingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No application key for the bridge. Run with --pair to pair.")]
    NotPaired,

    #[error("Pairing failed: {0}")]
    Pairing(#[from] PairingError),

    #[error("Light with name \"{0}\" is not registered")]
    LightNotFound(String),

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::NotPaired | AppError::Pairing(_) => 2,
            AppError::LightNotFound(_) => 3,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NotPaired => "not_paired",
            AppError::Pairing(_) => "pairing",
            AppError::LightNotFound(_) => "light_not_found",
            AppError::Api { .. } => "api",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Prompt(_) => "prompt",
            AppError::Http(_) => "http",
            AppError::Json(_) => "json",
            AppError::Io(_) => "io",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let Some(status) = self.http_status() {
            obj["status"] = serde_json::json!(status);
        }
        if let AppError::Pairing(PairingError::Rejected { code, .. }) = self {
            obj["error_code"] = serde_json::json!(code);
        }
        obj
    }

    fn http_status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => *status,
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::NotPaired.exit_code(), 2);
        assert_eq!(
            AppError::Pairing(PairingError::LinkButtonNotPressed).exit_code(),
            2
        );
        assert_eq!(AppError::LightNotFound("Desk".into()).exit_code(), 3);
        assert_eq!(AppError::InvalidInput("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_to_json_includes_status() {
        let err = AppError::Api {
            message: "403 Forbidden: unauthorized user".into(),
            status: Some(403),
        };
        let json = err.to_json();
        assert_eq!(json["error"], "api");
        assert_eq!(json["status"], 403);
    }

    #[test]
    fn test_to_json_includes_bridge_error_code() {
        let err = AppError::Pairing(PairingError::Rejected {
            code: 7,
            description: "invalid value".into(),
        });
        let json = err.to_json();
        assert_eq!(json["error"], "pairing");
        assert_eq!(json["error_code"], 7);
    }

    #[test]
    fn test_light_not_found_message() {
        let err = AppError::LightNotFound("Kitchen".into());
        assert_eq!(
            err.to_string(),
            "Light with name \"Kitchen\" is not registered"
        );
    }
}
