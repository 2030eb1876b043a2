//! # Arachnid Shield
//!
//! An async client for the Arachnid Shield API, which scans media (images
//! and videos) or PDQ hashes against a database of known CSAM and other
//! material that is harmful to children.
//!
//! ## Overview
//!
//! The client exposes four operations, each issuing a single authenticated
//! HTTP request:
//!
//! - Scan media from raw bytes
//! - Scan media fetched by the server from a URL
//! - Scan media stored in a local file
//! - Scan a batch of PDQ hashes
//!
//! Classification, hash comparison, and matching all happen server-side;
//! the client's one piece of derived logic is normalizing the `is_match`
//! field on media scan results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arachnid_shield::ArachnidShield;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arachnid_shield::ScanError> {
//!     let client = ArachnidShield::new("username", "password")?;
//!
//!     let scanned = client.scan_media_from_file("/path/to/photo.jpg").await?;
//!     if scanned.is_match() {
//!         println!("matched: {:?}", scanned.classification);
//!     }
//!
//!     let hashes = client.scan_pdq_hashes(["<base64 pdq hash>"]).await?;
//!     for (hash, matched) in hashes.iter() {
//!         println!("{hash}: {}", matched.classification);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Every operation returns [`core::ScanResult`]; server-reported errors
//! surface the API's `detail` message through [`ScanError`]'s `Display`,
//! and nothing panics past the library boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod core;

// Re-export commonly used types at the crate root
pub use crate::client::{ArachnidShield, ArachnidShieldConfig, ARACHNID_SHIELD_BASE_URL};
pub use crate::core::{
    MatchType, MediaClassification, MediaInput, NearMatchDetails, PdqMatch, ScanError,
    ScanMediaRequest, ScanResult, ScannedMedia, ScannedPdqHashes,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use arachnid_shield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{ArachnidShield, ArachnidShieldConfig, ARACHNID_SHIELD_BASE_URL};
    pub use crate::core::{
        ExtensionMimeResolver, FileReader, MatchType, MediaClassification, MediaInput,
        MimeResolver, NearMatchDetails, PdqMatch, ScanError, ScanMediaRequest, ScanResult,
        ScannedMedia, ScannedPdqHashes, TokioFileReader,
    };
}
