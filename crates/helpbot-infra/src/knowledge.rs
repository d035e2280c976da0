//! Knowledge pack loader.
//!
//! A pack is a `.toml` or `.json` file with `knowledge`, `keywords`,
//! `quick_replies` and an optional `welcome_message`. Entry order in the file
//! is kept, since it decides which topic wins on overlapping matches.

use std::path::Path;

use helpbot_types::error::KnowledgeError;
use helpbot_types::knowledge::KnowledgePack;

/// On-disk format of a knowledge pack, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackFormat {
    Toml,
    Json,
}

impl PackFormat {
    pub fn from_path(path: &Path) -> Result<Self, KnowledgeError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(KnowledgeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse pack content that has already been read.
///
/// `source` only labels errors.
pub fn parse_knowledge_pack(
    content: &str,
    format: PackFormat,
    source: &str,
) -> Result<KnowledgePack, KnowledgeError> {
    let parsed = match format {
        PackFormat::Toml => toml::from_str::<KnowledgePack>(content).map_err(|e| e.to_string()),
        PackFormat::Json => {
            serde_json::from_str::<KnowledgePack>(content).map_err(|e| e.to_string())
        }
    };
    parsed.map_err(|message| KnowledgeError::Parse {
        path: source.to_string(),
        message,
    })
}

/// Read and parse the knowledge pack at `path`.
pub async fn load_knowledge_pack(path: &Path) -> Result<KnowledgePack, KnowledgeError> {
    let format = PackFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| KnowledgeError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let pack = parse_knowledge_pack(&content, format, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        topics = pack.knowledge.len(),
        aliases = pack.keywords.len(),
        quick_replies = pack.quick_replies.len(),
        "loaded knowledge pack"
    );
    Ok(pack)
}
