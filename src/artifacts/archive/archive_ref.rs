use crate::artifacts::archive::VERSIONED_URL_REGEX;
use anyhow::Context;

/// A reference to an archive as it was opened, e.g. `dat://X`, `dat://X+3`
/// or `dat://X+preview`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveRef {
    base_url: String,
    version_qualifier: Option<String>,
}

impl ArchiveRef {
    pub fn try_parse(url: &str) -> anyhow::Result<Self> {
        let re = regex::Regex::new(VERSIONED_URL_REGEX)
            .with_context(|| format!("invalid versioned url regex: {VERSIONED_URL_REGEX}"))?;

        Ok(match re.captures(url) {
            Some(caps) => {
                let qualifier = &caps[2];
                Self {
                    base_url: caps[1].to_string(),
                    version_qualifier: (!qualifier.is_empty()).then(|| qualifier.to_string()),
                }
            }
            None => Self {
                base_url: url.to_string(),
                version_qualifier: None,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version_qualifier(&self) -> Option<&str> {
        self.version_qualifier.as_deref()
    }

    /// The URL of this archive at another version, `dat://X+<qualifier>`.
    pub fn with_qualifier(&self, qualifier: &str) -> String {
        format!("{}+{}", self.base_url, qualifier)
    }
}

impl std::fmt::Display for ArchiveRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version_qualifier {
            Some(qualifier) => write!(f, "{}+{}", self.base_url, qualifier),
            None => write!(f, "{}", self.base_url),
        }
    }
}
