//! Entity tags: opaque version tokens derived from a contact's fields.
//!
//! A tag is a truncated Blake3 hash over a domain separator, the id, and
//! every text field, each length-prefixed so that moving bytes between
//! adjacent fields changes the tag. Tags are lowercase hex and can be placed
//! verbatim inside a quoted `ETag` header.
//!
//! Two contacts with identical fields always share a tag. Distinct field
//! values collide only with negligible probability; a collision would make a
//! changed contact look unchanged to a conditional request.

use std::fmt;

use crate::contact::Contact;
use crate::error::CoreError;

/// Domain separator mixed into every tag.
const TAG_DOMAIN: &[u8] = b"contactd-etag-v1:";

/// Number of hash bytes kept in a tag.
const TAG_BYTES: usize = 16;

/// An HTTP entity tag.
///
/// Tags computed by [`EntityTag::of`] are always strong. Tags parsed from
/// request headers may be weak (`W/"..."`) or carry any opaque value the
/// client sent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    opaque: String,
    weak: bool,
}

impl EntityTag {
    /// Derive the current tag of a contact.
    pub fn of(contact: &Contact) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(TAG_DOMAIN);
        hasher.update(&contact.id.get().to_be_bytes());
        for field in [
            &contact.title,
            &contact.name,
            &contact.email,
            &contact.phone_number,
        ] {
            hasher.update(&(field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        let digest = hasher.finalize();
        Self {
            opaque: hex::encode(&digest.as_bytes()[..TAG_BYTES]),
            weak: false,
        }
    }

    /// A strong tag with the given opaque value.
    pub fn strong(opaque: impl Into<String>) -> Result<Self, CoreError> {
        Self::checked(opaque.into(), false)
    }

    /// A weak tag with the given opaque value.
    pub fn weak(opaque: impl Into<String>) -> Result<Self, CoreError> {
        Self::checked(opaque.into(), true)
    }

    fn checked(opaque: String, weak: bool) -> Result<Self, CoreError> {
        if !opaque.chars().all(is_etag_char) {
            return Err(CoreError::InvalidEntityTag(opaque));
        }
        Ok(Self { opaque, weak })
    }

    /// Parse a single tag in header form: `"abc"` or `W/"abc"`.
    ///
    /// A bare token without quotes is accepted as a strong tag, since some
    /// clients send tags unquoted.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let input = input.trim();
        let (weak, rest) = match input.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let opaque = match rest.strip_prefix('"') {
            Some(quoted) => quoted
                .strip_suffix('"')
                .ok_or_else(|| CoreError::InvalidEntityTag(input.to_string()))?,
            None if !weak && !rest.is_empty() => rest,
            None => return Err(CoreError::InvalidEntityTag(input.to_string())),
        };
        Self::checked(opaque.to_string(), weak)
    }

    /// The opaque value, without quotes.
    pub fn opaque(&self) -> &str {
        &self.opaque
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Strong comparison: both tags strong and opaque values equal.
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.opaque == other.opaque
    }

    /// Weak comparison: opaque values equal, weakness ignored.
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.opaque == other.opaque
    }
}

/// `etagc` from RFC 9110: `!`, `#`..`~`, or obs-text.
fn is_etag_char(c: char) -> bool {
    c == '!' || ('#'..='~').contains(&c) || !c.is_ascii()
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            write!(f, "W/\"{}\"", self.opaque)
        } else {
            write!(f, "\"{}\"", self.opaque)
        }
    }
}

impl fmt::Debug for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityTag({})", self)
    }
}
