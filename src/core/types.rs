//! Wire models for the Arachnid Shield API.
//!
//! These structures mirror the JSON bodies returned by the scanning
//! endpoints. Field names match the wire format exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The classification assigned to a scanned media.
///
/// Video files are classified based on their frames: if any frame matches a
/// known image, the video receives that image's classification. When frames
/// match both `csam` and `harmful-abusive-material`, the server returns the
/// higher-severity classification (`csam`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaClassification {
    /// Child sexual abuse material.
    Csam,

    /// Content considered harmful to children: images or videos associated
    /// with an abusive incident, or nude/partially nude images of children
    /// used in a sexualized context.
    HarmfulAbusiveMaterial,

    /// The media matched nothing in the database, exactly or nearly.
    NoKnownMatch,
}

impl MediaClassification {
    /// Returns `true` if this classification denotes a match against known
    /// harmful material.
    pub fn is_known_match(&self) -> bool {
        !matches!(self, Self::NoKnownMatch)
    }
}

impl fmt::Display for MediaClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csam => write!(f, "csam"),
            Self::HarmfulAbusiveMaterial => write!(f, "harmful-abusive-material"),
            Self::NoKnownMatch => write!(f, "no-known-match"),
        }
    }
}

/// The technology that verified a match between two media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// A visual near-match using perceptual hashing.
    Near,

    /// An exact cryptographic hash match.
    Exact,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Near => write!(f, "near"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// A record of a media that has been scanned, with any cryptographic or
/// visual matches attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedMedia {
    /// Base-32 representation of the SHA1 hash of the media.
    pub sha1_base32: String,

    /// Hexadecimal representation of the SHA256 hash of the media.
    pub sha256_hex: String,

    /// The classification assigned to this media, if any.
    pub classification: Option<MediaClassification>,

    /// Whether this media matches known harmful material. Derived client-side
    /// from `classification` after every successful scan; `None` only when
    /// the server returned no classification.
    #[serde(default)]
    pub is_match: Option<bool>,

    /// The matching technology used; `None` iff the classification is
    /// `no-known-match`.
    pub match_type: Option<MatchType>,

    /// Total size, in bytes, of the media that was scanned.
    pub size_bytes: u64,

    /// Images in the database that were visually similar to the scanned
    /// media.
    #[serde(default)]
    pub near_match_details: Vec<NearMatchDetails>,
}

impl ScannedMedia {
    /// Recomputes `is_match` from the classification.
    ///
    /// `Some(true)` when the media is classified as anything other than
    /// `no-known-match`, `Some(false)` for `no-known-match`, `None` when the
    /// server omitted a classification.
    pub(crate) fn derive_is_match(&mut self) {
        self.is_match = self.classification.map(|c| c.is_known_match());
    }

    /// Returns `true` if this media matched known harmful material.
    pub fn is_match(&self) -> bool {
        self.is_match.unwrap_or(false)
    }
}

/// A database image that was a near match to the scanned media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMatchDetails {
    /// Base-32 representation of the SHA1 hash of the matched media.
    pub sha1_base32: String,

    /// Hexadecimal representation of the SHA256 hash of the matched media.
    pub sha256_hex: String,

    /// The classification assigned to the matched media.
    pub classification: Option<MediaClassification>,

    /// Whether the matched media is itself a known match.
    #[serde(default)]
    pub is_match: Option<bool>,

    /// Seconds into the submitted video where the match was found; 0 for
    /// still images.
    pub timestamp: f64,
}

/// Match details for a single queried PDQ hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdqMatch {
    /// The classification assigned to the matched media.
    pub classification: MediaClassification,

    /// The matching technology used; `None` iff the classification is
    /// `no-known-match`.
    pub match_type: Option<MatchType>,

    /// Best-matched database image similar to the queried hash.
    pub near_match_details: Option<NearMatchDetails>,
}

/// Match results for a batch of scanned PDQ hashes, keyed by the submitted
/// hash string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannedPdqHashes {
    /// Match details per submitted hash.
    pub scanned_hashes: HashMap<String, PdqMatch>,
}

impl ScannedPdqHashes {
    /// Returns the match details for a submitted hash, if present.
    pub fn get(&self, hash: &str) -> Option<&PdqMatch> {
        self.scanned_hashes.get(hash)
    }

    /// Returns the number of scanned hashes.
    pub fn len(&self) -> usize {
        self.scanned_hashes.len()
    }

    /// Returns `true` if no hashes were scanned.
    pub fn is_empty(&self) -> bool {
        self.scanned_hashes.is_empty()
    }

    /// Iterates over submitted hashes and their match details.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdqMatch)> {
        self.scanned_hashes.iter()
    }
}
