use std::fmt;

#[derive(Debug)]
pub enum UtiErrorKind {
    InvalidData,
    NotSupported,
    Failed,
}

#[derive(Debug)]
pub struct UtiError {
    domain: UtiErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl UtiError {
    pub fn new(domain: UtiErrorKind, message: impl Into<String>) -> Self {
        Self {
            domain,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        domain: UtiErrorKind,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            domain,
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn kind(&self) -> &UtiErrorKind {
        &self.domain
    }
}

impl fmt::Display for UtiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.domain, self.message)
    }
}

impl std::error::Error for UtiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref().map(|e| e as &dyn std::error::Error)
    }
}

impl From<serde_json::Error> for UtiError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(UtiErrorKind::InvalidData, err.to_string(), Box::new(err))
    }
}

pub type UtiResult<T> = Result<T, UtiError>;
