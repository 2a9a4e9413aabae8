use payloads::ClientError;

/// Outcome of every store operation. Failures are values; nothing is thrown
/// across the store boundary.
pub type MutationResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Operation cancelled")]
    Cancelled,
}

/// Coarse classification of a [`StoreError`] for callers that branch on
/// the kind of failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status(u16),
    Malformed,
    Cancelled,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Client(ClientError::APIError(status, _)) => {
                ErrorKind::Status(status.as_u16())
            }
            Self::Client(ClientError::Network(e)) => match e.status() {
                Some(status) => ErrorKind::Status(status.as_u16()),
                None => ErrorKind::Network,
            },
            Self::Client(
                ClientError::Malformed(_) | ClientError::Upload(_),
            ) => ErrorKind::Malformed,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
