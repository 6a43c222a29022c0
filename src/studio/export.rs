//! Clip export through injected services.
//!
//! The studio never talks to a video backend directly: a [`CredentialProvider`]
//! gates access and a [`VideoSink`] turns a rendered frame plus a prompt into
//! a video asset.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Prompt used when the user does not supply one.
pub const DEFAULT_PROMPT: &str = "character motion";

/// Access to the credential the sink needs.
pub trait CredentialProvider {
    fn has_credential(&self) -> bool;

    /// Ask the host to obtain a credential (for example by prompting the user).
    fn request_credential(&mut self) -> Result<()>;
}

/// Consumer of export requests; returns the URL of the produced asset.
pub trait VideoSink {
    fn submit(&mut self, request: &ExportRequest) -> Result<String>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    /// Length of the short edge in pixels.
    pub fn short_edge(self) -> u32 {
        match self {
            Resolution::P720 => 720,
            Resolution::P1080 => 1080,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Width over height.
    pub fn ratio(self) -> f32 {
        match self {
            AspectRatio::Landscape => 16.0 / 9.0,
            AspectRatio::Portrait => 9.0 / 16.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
    /// Style description; empty means [`DEFAULT_PROMPT`]
    pub prompt: String,
}

impl ExportSettings {
    /// Output size in pixels as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        let short = self.resolution.short_edge();
        let long = short * 16 / 9;
        match self.aspect_ratio {
            AspectRatio::Landscape => (long, short),
            AspectRatio::Portrait => (short, long),
        }
    }

    pub fn effective_prompt(&self) -> &str {
        let prompt = self.prompt.trim();
        if prompt.is_empty() { DEFAULT_PROMPT } else { prompt }
    }
}

/// Everything a sink receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: AspectRatio,
    /// Encoded still of the current frame (PNG)
    pub frame: Vec<u8>,
}

/// Hand a rendered frame to the sink, obtaining a credential first if needed.
pub fn export_clip(
    credentials: &mut dyn CredentialProvider,
    sink: &mut dyn VideoSink,
    settings: &ExportSettings,
    frame: Vec<u8>,
) -> Result<String> {
    if !credentials.has_credential() {
        log::info!("No export credential; requesting one");
        credentials.request_credential()?;
        if !credentials.has_credential() {
            return Err(Error::Credential("credential request was not completed".to_string()));
        }
    }

    if frame.is_empty() {
        return Err(Error::Export("no rendered frame to export".to_string()));
    }

    let (width, height) = settings.dimensions();
    let request = ExportRequest {
        prompt: settings.effective_prompt().to_string(),
        width,
        height,
        aspect_ratio: settings.aspect_ratio,
        frame,
    };

    log::info!("Exporting {}x{} clip: \"{}\"", width, height, request.prompt);
    let url = sink.submit(&request)?;
    log::info!("Export finished: {}", url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCredentials {
        present: bool,
        grant_on_request: bool,
        requests: usize,
    }

    impl CredentialProvider for FakeCredentials {
        fn has_credential(&self) -> bool {
            self.present
        }

        fn request_credential(&mut self) -> Result<()> {
            self.requests += 1;
            self.present = self.grant_on_request;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        requests: Vec<ExportRequest>,
        fail: bool,
    }

    impl VideoSink for RecordingSink {
        fn submit(&mut self, request: &ExportRequest) -> Result<String> {
            if self.fail {
                return Err(Error::Export("backend unavailable".to_string()));
            }
            self.requests.push(request.clone());
            Ok(format!("https://videos.example/{}", self.requests.len()))
        }
    }

    fn creds(present: bool, grant: bool) -> FakeCredentials {
        FakeCredentials {
            present,
            grant_on_request: grant,
            requests: 0,
        }
    }

    #[test]
    fn test_dimensions() {
        let mut settings = ExportSettings::default();
        assert_eq!(settings.dimensions(), (1280, 720));
        settings.resolution = Resolution::P1080;
        settings.aspect_ratio = AspectRatio::Portrait;
        assert_eq!(settings.dimensions(), (1080, 1920));
    }

    #[test]
    fn test_export_with_credential() {
        let mut credentials = creds(true, false);
        let mut sink = RecordingSink::default();
        let settings = ExportSettings::default();

        let url = export_clip(&mut credentials, &mut sink, &settings, vec![1, 2, 3]).unwrap();
        assert_eq!(url, "https://videos.example/1");
        assert_eq!(sink.requests[0].prompt, DEFAULT_PROMPT);
        assert_eq!(sink.requests[0].frame, vec![1, 2, 3]);
        assert_eq!(credentials.requests, 0);
    }

    #[test]
    fn test_export_requests_missing_credential() {
        let mut credentials = creds(false, true);
        let mut sink = RecordingSink::default();
        let settings = ExportSettings {
            prompt: "  neon rain  ".to_string(),
            ..Default::default()
        };

        export_clip(&mut credentials, &mut sink, &settings, vec![0]).unwrap();
        assert_eq!(credentials.requests, 1);
        assert_eq!(sink.requests[0].prompt, "neon rain");
    }

    #[test]
    fn test_export_fails_without_credential() {
        let mut credentials = creds(false, false);
        let mut sink = RecordingSink::default();
        let err = export_clip(&mut credentials, &mut sink, &ExportSettings::default(), vec![0]);
        assert!(matches!(err, Err(Error::Credential(_))));
        assert!(sink.requests.is_empty());
    }

    #[test]
    fn test_sink_errors_propagate() {
        let mut credentials = creds(true, false);
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let err = export_clip(&mut credentials, &mut sink, &ExportSettings::default(), vec![0]);
        assert!(matches!(err, Err(Error::Export(_))));

        let err = export_clip(&mut credentials, &mut RecordingSink::default(), &ExportSettings::default(), Vec::new());
        assert!(matches!(err, Err(Error::Export(_))));
    }

    #[test]
    fn test_settings_serde_names() {
        let settings = ExportSettings {
            resolution: Resolution::P1080,
            aspect_ratio: AspectRatio::Portrait,
            prompt: String::new(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"1080p\"") && json.contains("\"9:16\""));
    }
}
