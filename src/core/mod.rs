//! Core types and traits for the Arachnid Shield client.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - Wire models like `ScannedMedia` and `MediaClassification`
//! - [`input`] - Media input abstraction for the bytes endpoint
//! - [`error`] - Structured error types
//! - [`fs`] - Filesystem and MIME capability seams

pub mod error;
pub mod fs;
pub mod input;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{ScanError, ScanResult};
pub use fs::{ExtensionMimeResolver, FileReader, MimeResolver, TokioFileReader};
pub use input::{MediaInput, ScanMediaRequest};
pub use types::{
    MatchType, MediaClassification, NearMatchDetails, PdqMatch, ScannedMedia, ScannedPdqHashes,
};
