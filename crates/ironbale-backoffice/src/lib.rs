#![deny(warnings)]
//! Back-office domain for the Ironbale site.
//!
//! The dashboard manages two things: the media library used by the content
//! pages, and the inquiries that arrive through contact forms and calculator
//! quote requests. Both sit behind an explicit [`Session`] acquired when a
//! dashboard route is entered. Persistence and object storage are reached
//! through repository traits so a hosted backend can be slotted in; in-memory
//! implementations back local development and tests.

/// Error types shared by every back-office operation
pub mod error;
/// Inquiry records, validation and the inquiry desk service
pub mod inquiry;
/// Media records, search and upload pipeline
pub mod media;
/// Operator sessions
pub mod session;

pub use error::{BackofficeError, BackofficeResult};
pub use inquiry::{
    InMemoryInquiryRepository, Inquiry, InquiryDesk, InquiryRepository, InquiryStatus, NewInquiry,
};
pub use media::{
    FileCategory, InMemoryMediaRepository, InMemoryObjectStorage, MediaLibrary, MediaQuery,
    MediaRecord, MediaRepository, MediaStats, MediaUpdate, ObjectStorage, UploadFailure,
    UploadFile, UploadReport,
};
pub use session::{InMemorySessionProvider, OperatorAccount, Session, SessionProvider};
