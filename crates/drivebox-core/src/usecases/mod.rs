//! Use cases orchestrating the workflow through port interfaces
//!
//! - `SignInUseCase` - turns a freshly obtained credential into a session
//! - `ListFilesUseCase` - single-page and paginated remote listings
//! - `UploadFileUseCase` - permission-gated, serialized single-shot upload

pub mod list_files;
pub mod sign_in;
pub mod upload_file;

pub use list_files::ListFilesUseCase;
pub use sign_in::SignInUseCase;
pub use upload_file::UploadFileUseCase;
