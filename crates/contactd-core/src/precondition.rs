//! Conditional-request preconditions.
//!
//! `If-Match` and `If-None-Match` each carry either the wildcard `*` or a
//! comma-separated list of entity tags. Evaluation is always against an
//! existing contact: a missing contact is answered with 404 before any
//! precondition is consulted, so `*` simply matches.
//!
//! `If-Match` uses strong comparison and `If-None-Match` uses weak
//! comparison, as in RFC 9110.

use crate::error::CoreError;
use crate::etag::EntityTag;

/// The value of one precondition header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMatch {
    /// `*`: matches any current representation.
    Any,
    /// One or more listed tags.
    Tags(Vec<EntityTag>),
}

impl TagMatch {
    /// Parse a header value.
    pub fn parse(header: &str) -> Result<Self, CoreError> {
        let trimmed = header.trim();
        if trimmed == "*" {
            return Ok(TagMatch::Any);
        }
        parse_tag_list(trimmed).map(TagMatch::Tags)
    }

    /// A single-tag match.
    pub fn tag(tag: EntityTag) -> Self {
        TagMatch::Tags(vec![tag])
    }

    /// Strong comparison against the current tag.
    pub fn matches_strong(&self, current: &EntityTag) -> bool {
        match self {
            TagMatch::Any => true,
            TagMatch::Tags(tags) => tags.iter().any(|t| t.strong_eq(current)),
        }
    }

    /// Weak comparison against the current tag.
    pub fn matches_weak(&self, current: &EntityTag) -> bool {
        match self {
            TagMatch::Any => true,
            TagMatch::Tags(tags) => tags.iter().any(|t| t.weak_eq(current)),
        }
    }
}

fn parse_tag_list(input: &str) -> Result<Vec<EntityTag>, CoreError> {
    let mut tags = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }

        // Find where this item ends, then hand it to the tag parser.
        let prefix = if rest.starts_with("W/") { 2 } else { 0 };
        let body = &rest[prefix..];
        let len = if let Some(quoted) = body.strip_prefix('"') {
            let close = quoted
                .find('"')
                .ok_or_else(|| CoreError::MalformedPrecondition(input.to_string()))?;
            prefix + close + 2
        } else if prefix > 0 {
            return Err(CoreError::MalformedPrecondition(input.to_string()));
        } else {
            body.find(',').unwrap_or(body.len())
        };

        tags.push(EntityTag::parse(&rest[..len])?);
        rest = rest[len..].trim_start();
        if !rest.is_empty() && !rest.starts_with(',') {
            return Err(CoreError::MalformedPrecondition(input.to_string()));
        }
    }

    if tags.is_empty() {
        return Err(CoreError::MalformedPrecondition(input.to_string()));
    }
    Ok(tags)
}

/// Outcome of evaluating preconditions for a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDecision {
    /// Send the representation.
    Send,
    /// The client's copy is current: 304.
    NotModified,
}

/// Outcome of evaluating preconditions for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Apply the mutation.
    Proceed,
    /// `If-Match` did not match: 412, nothing changes.
    PreconditionFailed,
    /// `If-None-Match` matched: 304, nothing changes.
    NotModified,
}

/// The precondition headers of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub if_match: Option<TagMatch>,
    pub if_none_match: Option<TagMatch>,
}

impl Preconditions {
    /// No precondition headers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse raw header values.
    pub fn from_headers(
        if_match: Option<&str>,
        if_none_match: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            if_match: if_match.map(TagMatch::parse).transpose()?,
            if_none_match: if_none_match.map(TagMatch::parse).transpose()?,
        })
    }

    pub fn with_if_match(mut self, value: TagMatch) -> Self {
        self.if_match = Some(value);
        self
    }

    pub fn with_if_none_match(mut self, value: TagMatch) -> Self {
        self.if_none_match = Some(value);
        self
    }

    /// GET on a single contact. Only `If-None-Match` is consulted.
    pub fn evaluate_read(&self, current: &EntityTag) -> ReadDecision {
        match &self.if_none_match {
            Some(m) if m.matches_weak(current) => ReadDecision::NotModified,
            _ => ReadDecision::Send,
        }
    }

    /// PUT on an existing contact.
    ///
    /// Rules are checked in a fixed order and the first that applies wins:
    /// no headers proceeds; a non-matching `If-Match` fails; a matching
    /// `If-Match` or a non-matching `If-None-Match` proceeds; a matching
    /// `If-None-Match` is not modified. With both headers present this means
    /// `If-Match` decides whenever it is supplied.
    pub fn evaluate_update(&self, current: &EntityTag) -> WriteDecision {
        let if_match = self.if_match.as_ref();
        let if_none_match = self.if_none_match.as_ref();

        if if_match.is_none() && if_none_match.is_none() {
            return WriteDecision::Proceed;
        }
        if let Some(m) = if_match {
            if !m.matches_strong(current) {
                return WriteDecision::PreconditionFailed;
            }
            return WriteDecision::Proceed;
        }
        match if_none_match {
            Some(m) if m.matches_weak(current) => WriteDecision::NotModified,
            _ => WriteDecision::Proceed,
        }
    }

    /// DELETE on an existing contact. Only `If-Match` is consulted.
    pub fn evaluate_delete(&self, current: &EntityTag) -> WriteDecision {
        match &self.if_match {
            Some(m) if !m.matches_strong(current) => WriteDecision::PreconditionFailed,
            _ => WriteDecision::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> EntityTag {
        EntityTag::strong(s).unwrap()
    }

    fn list(tags: &[&str]) -> TagMatch {
        TagMatch::Tags(tags.iter().map(|t| tag(t)).collect())
    }

    #[test]
    fn test_parse_wildcard_and_lists() {
        assert_eq!(TagMatch::parse(" * ").unwrap(), TagMatch::Any);
        assert_eq!(TagMatch::parse("\"a\"").unwrap(), list(&["a"]));
        assert_eq!(
            TagMatch::parse("\"a\", \"b,c\" ,W/\"d\"").unwrap(),
            TagMatch::Tags(vec![tag("a"), tag("b,c"), EntityTag::weak("d").unwrap()])
        );
        assert_eq!(TagMatch::parse("123, 456").unwrap(), list(&["123", "456"]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TagMatch::parse("").is_err());
        assert!(TagMatch::parse(" , ").is_err());
        assert!(TagMatch::parse("\"open").is_err());
        assert!(TagMatch::parse("\"a\" \"b\"").is_err());
        assert!(TagMatch::parse("W/bare").is_err());
    }

    #[test]
    fn test_list_items_parse_like_single_tags() {
        for item in ["\"a\"", "W/\"a\"", "abc", "\"b,c\""] {
            assert_eq!(
                TagMatch::parse(item).unwrap(),
                TagMatch::tag(EntityTag::parse(item).unwrap())
            );
        }
        assert_eq!(
            TagMatch::parse("\"a b\"").unwrap_err(),
            EntityTag::parse("\"a b\"").unwrap_err()
        );
    }

    #[test]
    fn test_from_headers() {
        let pre = Preconditions::from_headers(Some("\"x\""), None).unwrap();
        assert_eq!(pre.if_match, Some(list(&["x"])));
        assert_eq!(pre.if_none_match, None);
        assert!(Preconditions::from_headers(None, Some("\"x")).is_err());
    }

    #[test]
    fn test_read_decisions() {
        let current = tag("cur");
        assert_eq!(Preconditions::none().evaluate_read(&current), ReadDecision::Send);

        let hit = Preconditions::none().with_if_none_match(list(&["old", "cur"]));
        assert_eq!(hit.evaluate_read(&current), ReadDecision::NotModified);

        let miss = Preconditions::none().with_if_none_match(list(&["old"]));
        assert_eq!(miss.evaluate_read(&current), ReadDecision::Send);

        let any = Preconditions::none().with_if_none_match(TagMatch::Any);
        assert_eq!(any.evaluate_read(&current), ReadDecision::NotModified);

        let weak = Preconditions::none()
            .with_if_none_match(TagMatch::tag(EntityTag::weak("cur").unwrap()));
        assert_eq!(weak.evaluate_read(&current), ReadDecision::NotModified);

        // If-Match has no bearing on reads.
        let if_match = Preconditions::none().with_if_match(list(&["old"]));
        assert_eq!(if_match.evaluate_read(&current), ReadDecision::Send);
    }

    #[test]
    fn test_update_decisions_single_header() {
        let current = tag("cur");
        let none = Preconditions::none();
        assert_eq!(none.evaluate_update(&current), WriteDecision::Proceed);

        let stale = Preconditions::none().with_if_match(list(&["old"]));
        assert_eq!(stale.evaluate_update(&current), WriteDecision::PreconditionFailed);

        let fresh = Preconditions::none().with_if_match(list(&["cur"]));
        assert_eq!(fresh.evaluate_update(&current), WriteDecision::Proceed);

        let any = Preconditions::none().with_if_match(TagMatch::Any);
        assert_eq!(any.evaluate_update(&current), WriteDecision::Proceed);

        let weak = Preconditions::none()
            .with_if_match(TagMatch::tag(EntityTag::weak("cur").unwrap()));
        assert_eq!(weak.evaluate_update(&current), WriteDecision::PreconditionFailed);

        let changed = Preconditions::none().with_if_none_match(list(&["old"]));
        assert_eq!(changed.evaluate_update(&current), WriteDecision::Proceed);

        let unchanged = Preconditions::none().with_if_none_match(list(&["cur"]));
        assert_eq!(unchanged.evaluate_update(&current), WriteDecision::NotModified);
    }

    #[test]
    fn test_update_decisions_both_headers() {
        let current = tag("cur");
        let both = |m: &str, nm: &str| {
            Preconditions::none()
                .with_if_match(list(&[m]))
                .with_if_none_match(list(&[nm]))
                .evaluate_update(&current)
        };
        assert_eq!(both("cur", "cur"), WriteDecision::Proceed);
        assert_eq!(both("cur", "old"), WriteDecision::Proceed);
        assert_eq!(both("old", "old"), WriteDecision::PreconditionFailed);
        assert_eq!(both("old", "cur"), WriteDecision::PreconditionFailed);
    }

    #[test]
    fn test_delete_decisions() {
        let current = tag("cur");
        assert_eq!(Preconditions::none().evaluate_delete(&current), WriteDecision::Proceed);

        let stale = Preconditions::none().with_if_match(list(&["old"]));
        assert_eq!(stale.evaluate_delete(&current), WriteDecision::PreconditionFailed);

        let fresh = Preconditions::none().with_if_match(list(&["old", "cur"]));
        assert_eq!(fresh.evaluate_delete(&current), WriteDecision::Proceed);

        // If-None-Match has no bearing on deletes.
        let nm = Preconditions::none().with_if_none_match(list(&["cur"]));
        assert_eq!(nm.evaluate_delete(&current), WriteDecision::Proceed);
    }
}
