//! Error types for descriptor and document handling

/// Errors raised while interpreting metadata payloads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetaError {
    /// Status code outside 0..=2
    #[error("invalid docstatus: {0}")]
    InvalidDocStatus(u8),

    /// Descriptor payload could not be decoded
    #[error("malformed descriptor for {doctype}: {message}")]
    MalformedDescriptor { doctype: String, message: String },
}

impl MetaError {
    /// Create malformed descriptor error
    pub fn malformed(doctype: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            doctype: doctype.into(),
            message: message.into(),
        }
    }
}
