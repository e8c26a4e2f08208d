//! Request outcomes: what the handler hands back to the transport.

use contactd_core::{Contact, EntityTag};

/// The statuses the handler can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Created,
    NotModified,
    BadRequest,
    NotFound,
    Conflict,
    PreconditionFailed,
}

impl Status {
    /// The HTTP status code.
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NotModified => 304,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::PreconditionFailed => 412,
        }
    }
}

/// A response body.
#[derive(Debug, Clone)]
pub enum Body {
    Contact(Contact),
    Contacts(Vec<Contact>),
}

/// The result of handling one request.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: Status,
    /// Current tag of the addressed contact, sent as the `ETag` header.
    pub etag: Option<EntityTag>,
    /// Path of the created or updated contact, sent as `Location`.
    pub location: Option<String>,
    pub body: Option<Body>,
}

impl Outcome {
    /// A bare outcome: status only.
    pub fn status(status: Status) -> Self {
        Self {
            status,
            etag: None,
            location: None,
            body: None,
        }
    }

    pub fn with_etag(mut self, etag: EntityTag) -> Self {
        self.etag = Some(etag);
        self
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// The single contact in the body, if any.
    pub fn contact(&self) -> Option<&Contact> {
        match &self.body {
            Some(Body::Contact(contact)) => Some(contact),
            _ => None,
        }
    }

    /// The contact list in the body, if any.
    pub fn contacts(&self) -> Option<&[Contact]> {
        match &self.body {
            Some(Body::Contacts(contacts)) => Some(contacts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::Created.code(), 201);
        assert_eq!(Status::NotModified.code(), 304);
        assert_eq!(Status::BadRequest.code(), 400);
        assert_eq!(Status::NotFound.code(), 404);
        assert_eq!(Status::Conflict.code(), 409);
        assert_eq!(Status::PreconditionFailed.code(), 412);
    }

    #[test]
    fn test_body_accessors() {
        let contact = Contact::new("T", "", "", "").with_id(1);
        let single = Outcome::status(Status::Ok).with_body(Body::Contact(contact.clone()));
        assert_eq!(single.contact(), Some(&contact));
        assert!(single.contacts().is_none());

        let list = Outcome::status(Status::Ok).with_body(Body::Contacts(vec![contact]));
        assert_eq!(list.contacts().map(<[Contact]>::len), Some(1));
        assert!(list.contact().is_none());
    }
}
