use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

/// Attachment filter and path conventions of the reference database.
///
/// Defaults match Zotero's `itemAttachments` table as used by zotfile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Literal prefix marking a path as relative to the managed directory.
    pub relative_marker: String,
    /// Link mode selected regardless of content type.
    pub stored_link_mode: i64,
    /// Link mode selected only together with `pdf_content_type`.
    pub linked_link_mode: i64,
    pub pdf_content_type: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relative_marker: "attachments:".to_string(),
            stored_link_mode: 2,
            linked_link_mode: 3,
            pdf_content_type: "application/pdf".to_string(),
        }
    }
}

/// Layered load: defaults, optional `ZotfileDoctor.*` in the working
/// directory, the explicit file if one is given, then `ZOTFILE_DOCTOR_*`
/// environment variables.
pub fn load_configuration(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let builder =
        Config::builder().add_source(ConfigFile::with_name("ZotfileDoctor").required(false));

    with_explicit_file(builder, explicit)
        .add_source(Environment::with_prefix("ZOTFILE_DOCTOR"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn with_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    explicit: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match explicit {
        Some(path) => builder.add_source(ConfigFile::from(path).required(true)),
        None => builder,
    }
}
