use serde::Deserialize;

/// Envelope wrapping every CLIP v2 resource response.
#[derive(Debug, Deserialize)]
pub struct ResourceEnvelope<T> {
    #[serde(default)]
    pub errors: Vec<ClipError>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct ClipError {
    #[serde(default)]
    pub description: String,
}

impl<T> ResourceEnvelope<T> {
    pub fn log_errors(&self) {
        for error in &self.errors {
            tracing::warn!(description = %error.description, "bridge reported an error");
        }
    }
}
