//! Media types courier can produce.

use serde::{Deserialize, Serialize};

/// The closed set of producible media types.
///
/// The four YAML aliases all render through the YAML factory but remain
/// distinct values so a response's Content-Type echoes exactly what the
/// client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Json,
    Xml,
    Siren,
    ApplicationYaml,
    TextYaml,
    VndYaml,
    CourierYaml,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Xml => "application/xml",
            MediaType::Siren => "application/vnd.siren+json",
            MediaType::ApplicationYaml => "application/x-yaml",
            MediaType::TextYaml => "text/x-yaml",
            MediaType::VndYaml => "text/vnd.yaml",
            MediaType::CourierYaml => "application/vnd.courier+yaml",
        }
    }

    /// Parse a media-type value. Parameters (`;q=...`, `;charset=...`) are
    /// ignored; unknown types yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/json" => Some(MediaType::Json),
            "application/xml" => Some(MediaType::Xml),
            "application/vnd.siren+json" => Some(MediaType::Siren),
            "application/x-yaml" => Some(MediaType::ApplicationYaml),
            "text/x-yaml" => Some(MediaType::TextYaml),
            "text/vnd.yaml" => Some(MediaType::VndYaml),
            "application/vnd.courier+yaml" => Some(MediaType::CourierYaml),
            _ => None,
        }
    }

    pub fn is_yaml(&self) -> bool {
        matches!(
            self,
            MediaType::ApplicationYaml
                | MediaType::TextYaml
                | MediaType::VndYaml
                | MediaType::CourierYaml
        )
    }

    /// Every producible type, in registration order.
    pub fn all() -> [MediaType; 7] {
        [
            MediaType::Json,
            MediaType::Xml,
            MediaType::Siren,
            MediaType::ApplicationYaml,
            MediaType::TextYaml,
            MediaType::VndYaml,
            MediaType::CourierYaml,
        ]
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
