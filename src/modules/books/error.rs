use bookshelf_http::AppError;
use thiserror::Error;

/// Failures of book operations
#[derive(Error, Debug)]
pub enum BookError {
    #[error("name required")]
    NameRequired,

    #[error("invalid page range")]
    InvalidPageRange { read_page: u32, page_count: u32 },

    #[error("book not found")]
    NotFound { id: String },

    #[error("book id '{0}' is already taken")]
    DuplicateId(String),

    #[error("book '{0}' missing right after insert")]
    MissingAfterInsert(String),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NameRequired | BookError::InvalidPageRange { .. } => {
                AppError::validation(err.to_string())
            }
            BookError::NotFound { .. } => AppError::not_found(err.to_string()),
            BookError::DuplicateId(_) | BookError::MissingAfterInsert(_) => {
                AppError::failure("book could not be added", anyhow::Error::new(err))
            }
        }
    }
}
