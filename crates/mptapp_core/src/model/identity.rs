//! Stable lesson identity derivation.
//!
//! # Responsibility
//! - Map a lesson's semantic attributes to a deterministic 128-bit identity.
//! - Keep primary and secondary (numerator/denominator) identities disjoint.
//!
//! # Invariants
//! - Same inputs always produce the same identity, across process restarts.
//! - The variant tag always participates in the hash input.
//! - A missing date hashes as an empty string; date-less identities are stable
//!   across days and must not be mixed with date-bound ones for the same slot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Foreign key used by homework records to attach to one lesson occurrence.
pub type LessonIdentity = Uuid;

const DJB2_SEED: u64 = 5381;
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const V2_SEPARATOR: char = '\u{1f}';
const LOW_48_BITS: u64 = 0xffff_ffff_ffff;

/// Which subject/teacher pair of a double-booked slot an identity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonVariant {
    Primary,
    Secondary,
}

impl LessonVariant {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Hash input layout and 64→128 bit expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityScheme {
    /// Dash-joined input, single DJB2 hash packed into the historical UUID
    /// layout. Byte-compatible with identities stored by the first app
    /// release.
    Legacy,
    /// Version-tagged input, DJB2 and FNV-1a halves concatenated.
    #[default]
    V2,
}

/// Attributes that define one lesson occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityFields<'a> {
    pub slot_number: u8,
    pub subject: &'a str,
    pub teacher: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub campus: &'a str,
    pub date: Option<NaiveDate>,
    pub variant: LessonVariant,
}

/// Derives the identity of one lesson occurrence.
pub fn derive_identity(fields: &IdentityFields<'_>, scheme: IdentityScheme) -> LessonIdentity {
    match scheme {
        IdentityScheme::Legacy => {
            let input = legacy_input(fields);
            pack_legacy(djb2_64(input.as_bytes()))
        }
        IdentityScheme::V2 => {
            let input = v2_input(fields);
            let bytes = input.as_bytes();
            Uuid::from_u64_pair(djb2_64(bytes), fnv1a_64(bytes))
        }
    }
}

fn iso_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn legacy_input(fields: &IdentityFields<'_>) -> String {
    let mut input = format!(
        "{}-{}-{}-{}-{}-{}-{}",
        fields.slot_number,
        fields.subject,
        fields.teacher,
        fields.start_time,
        fields.end_time,
        fields.campus,
        iso_date(fields.date)
    );
    // The first release only suffixed the denominator variant.
    if fields.variant == LessonVariant::Secondary {
        input.push_str("-denominator");
    }
    input
}

fn v2_input(fields: &IdentityFields<'_>) -> String {
    let slot_number = fields.slot_number.to_string();
    let date = iso_date(fields.date);
    let parts: [&str; 9] = [
        "v2",
        slot_number.as_str(),
        fields.subject,
        fields.teacher,
        fields.start_time,
        fields.end_time,
        fields.campus,
        date.as_str(),
        fields.variant.tag(),
    ];
    let mut input = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            input.push(V2_SEPARATOR);
        }
        input.push_str(part);
    }
    input
}

/// DJB2 (`h * 33 + byte`) widened to 64 bits with wrapping arithmetic.
pub(crate) fn djb2_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |hash, byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(*byte))
    })
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Packs a 64-bit hash as `low32-bits32..47-bits48..63-bits16..31-low48`.
fn pack_legacy(hash: u64) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[0..4].copy_from_slice(&((hash & 0xffff_ffff) as u32).to_be_bytes());
    bytes[4..6].copy_from_slice(&(((hash >> 32) & 0xffff) as u16).to_be_bytes());
    bytes[6..8].copy_from_slice(&(((hash >> 48) & 0xffff) as u16).to_be_bytes());
    bytes[8..10].copy_from_slice(&(((hash >> 16) & 0xffff) as u16).to_be_bytes());
    bytes[10..16].copy_from_slice(&(hash & LOW_48_BITS).to_be_bytes()[2..8]);
    Uuid::from_bytes(bytes)
}
