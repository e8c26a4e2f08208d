//! Property tests for the handler's tag and precondition behavior.

use contactd::{ContactBody, EntityTag, Preconditions, Status};
use contactd_testkit::fixtures::{if_match, if_none_match};
use contactd_testkit::generators::{blank, contact_body, title};
use contactd_testkit::{ContactParams, TestFixture};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_created_tag_matches_get(body in contact_body(), t in title()) {
        let fixture = TestFixture::new();
        let body = ContactBody { id: None, title: Some(t), ..body };

        let created = fixture.handler.create(body).unwrap();
        prop_assert_eq!(created.status, Status::Created);
        let id = created.location.as_deref().unwrap().rsplit('/').next().unwrap().parse().unwrap();

        let fetched = fixture.handler.get(id, &Preconditions::none()).unwrap();
        prop_assert_eq!(fetched.etag, created.etag);
    }

    #[test]
    fn test_blank_titles_are_never_stored(t in blank()) {
        let fixture = TestFixture::new();
        let body = ContactBody { title: Some(t), ..ContactBody::default() };

        prop_assert_eq!(fixture.handler.create(body).unwrap().status, Status::BadRequest);
        prop_assert_eq!(fixture.handler.list(None).unwrap().contacts().unwrap().len(), 0);
    }

    #[test]
    fn test_update_with_current_tag_always_applies(params: ContactParams, update in contact_body()) {
        let fixture = TestFixture::with_contacts([params.to_contact()]);
        let tag = fixture.tag(params.id);

        let outcome = fixture.handler.update(params.id, &if_match(&tag), update).unwrap();
        prop_assert_eq!(outcome.status, Status::Created);

        let stored = fixture.find(params.id).unwrap();
        prop_assert_eq!(outcome.etag, Some(EntityTag::of(&stored)));
    }

    #[test]
    fn test_not_modified_leaves_contact_untouched(params: ContactParams, update in contact_body()) {
        let fixture = TestFixture::with_contacts([params.to_contact()]);
        let tag = fixture.tag(params.id);

        let outcome = fixture.handler.update(params.id, &if_none_match(&tag), update).unwrap();
        prop_assert_eq!(outcome.status, Status::NotModified);
        prop_assert!(fixture.find(params.id).unwrap().same_fields(&params.to_contact()));
    }
}
