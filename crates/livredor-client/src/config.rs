//! Client configuration.
//!
//! The original page hardcoded these two URLs; here they default to the
//! site values and can be overridden through the environment for staging
//! or self-hosted deployments.

/// Display-side configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Public raw URL of the note blob (unauthenticated text fetch).
    /// Env: `NOTE_FILE_URL`
    pub note_file_url: String,

    /// URL of the submission endpoint.
    /// Env: `SUBMIT_URL`
    pub submit_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            note_file_url: "https://livredor.github.io/files/website/note.txt".to_string(),
            submit_url: "https://livredor.pages.dev/submit".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("NOTE_FILE_URL") {
            config.note_file_url = url;
        }

        if let Ok(url) = std::env::var("SUBMIT_URL") {
            config.submit_url = url;
        }

        config
    }
}
