use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid OwnerId: {0}")]
    InvalidOwnerId(String),

    #[error("Invalid ProgramId: {0}")]
    InvalidProgramId(String),

    #[error("Invalid RecordAddress: {0}")]
    InvalidRecordAddress(String),
}

/// ToDo アカウント操作で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Todo already exists: {0}")]
    AlreadyExists(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: signer {signer} is not the owner of {address}")]
    Unauthorized { signer: String, address: String },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
