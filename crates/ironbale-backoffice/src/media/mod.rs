//! Media library
//!
//! Records mirror the hosted `media` table; binaries live in an object
//! storage bucket. [`MediaLibrary`] ties the two together for the dashboard.

mod library;
mod query;
mod record;
mod store;

pub use library::{MediaLibrary, UploadFailure, UploadFile, UploadReport};
pub use query::{MediaQuery, MediaStats};
pub use record::{FileCategory, MediaRecord, MediaUpdate};
pub use store::{
    InMemoryMediaRepository, InMemoryObjectStorage, MediaRepository, ObjectStorage, StoredObject,
};
