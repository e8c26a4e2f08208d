//! Proptest generators for property-based testing.

use proptest::prelude::*;

use contactd_core::{Contact, ContactBody, ContactId};

/// Generate an assigned contact id.
pub fn contact_id() -> impl Strategy<Value = ContactId> {
    (1u64..=u64::MAX).prop_map(ContactId::new)
}

/// Generate a title that is never blank.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .&-]{0,23}".prop_map(String::from)
}

/// Generate a free-form field, including the empty string.
pub fn field() -> impl Strategy<Value = String> {
    "[ -~]{0,32}".prop_map(String::from)
}

/// Generate a blank string (empty or whitespace only).
pub fn blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}".prop_map(String::from)
}

/// Parameters for generating a contact.
#[derive(Debug, Clone)]
pub struct ContactParams {
    pub id: ContactId,
    pub title: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl ContactParams {
    pub fn to_contact(&self) -> Contact {
        Contact {
            id: self.id,
            title: self.title.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

impl Arbitrary for ContactParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (contact_id(), title(), field(), field(), field())
            .prop_map(|(id, title, name, email, phone_number)| ContactParams {
                id,
                title,
                name,
                email,
                phone_number,
            })
            .boxed()
    }
}

/// Generate a request body where any field may be omitted.
pub fn contact_body() -> impl Strategy<Value = ContactBody> {
    (
        proptest::option::of(contact_id()),
        proptest::option::of(title()),
        proptest::option::of(field()),
        proptest::option::of(field()),
        proptest::option::of(field()),
    )
        .prop_map(|(id, title, name, email, phone_number)| ContactBody {
            id,
            title,
            name,
            email,
            phone_number,
        })
}
