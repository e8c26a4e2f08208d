//! The request handler: conditional-request rules over a contact store.
//!
//! Each method corresponds to one route. Preconditions are evaluated inside
//! the store's guarded writes, so the tag a client is checked against is the
//! tag of the contact that is actually modified.

use std::sync::Arc;

use contactd_core::{ContactBody, ContactId, EntityTag, Preconditions, ReadDecision, WriteDecision};
use contactd_store::{ContactStore, Guarded, InsertResult, StoreError};
use tracing::{debug, warn};

use crate::error::Result;
use crate::outcome::{Body, Outcome, Status};

/// Configuration for the handler.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Collection path used to build `Location` headers.
    pub base_path: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            base_path: "/contacts".to_string(),
        }
    }
}

/// Handles contact requests against an injected store.
pub struct ContactHandler<S: ContactStore + ?Sized> {
    store: Arc<S>,
    config: HandlerConfig,
}

impl<S: ContactStore + ?Sized> Clone for ContactHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: ContactStore + ?Sized> ContactHandler<S> {
    pub fn new(store: Arc<S>, config: HandlerConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn location(&self, id: ContactId) -> String {
        format!("{}/{}", self.config.base_path.trim_end_matches('/'), id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// `GET /contacts[?title=query]`: always 200.
    pub fn list(&self, title: Option<&str>) -> Result<Outcome> {
        let contacts = match title {
            Some(query) => self.store.find_by_title(query)?,
            None => self.store.find_all()?,
        };
        Ok(Outcome::status(Status::Ok).with_body(Body::Contacts(contacts)))
    }

    /// `GET /contacts/{id}`.
    pub fn get(&self, id: ContactId, preconditions: &Preconditions) -> Result<Outcome> {
        let Some(contact) = self.store.find(id)? else {
            return Ok(Outcome::status(Status::NotFound));
        };

        let tag = EntityTag::of(&contact);
        match preconditions.evaluate_read(&tag) {
            ReadDecision::NotModified => Ok(Outcome::status(Status::NotModified).with_etag(tag)),
            ReadDecision::Send => Ok(Outcome::status(Status::Ok)
                .with_etag(tag)
                .with_body(Body::Contact(contact))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// `POST /contacts`.
    ///
    /// An omitted or zero id is assigned by the store. An explicit id that
    /// is already taken is a conflict.
    pub fn create(&self, body: ContactBody) -> Result<Outcome> {
        let mut contact = body.into_contact();

        match self.store.save(&mut contact) {
            Ok(InsertResult::Inserted(id)) => {
                debug!(%id, "contact created");
                Ok(Outcome::status(Status::Created)
                    .with_etag(EntityTag::of(&contact))
                    .with_location(self.location(id)))
            }
            Ok(InsertResult::Conflict { existing }) => {
                debug!(id = %existing, "create conflicts with existing contact");
                Ok(Outcome::status(Status::Conflict))
            }
            Err(e) => rejected(e),
        }
    }

    /// `PUT /contacts/{id}`.
    ///
    /// Fields missing from the body are cleared, except the title, which is
    /// kept when the body's title is missing or blank. This mirrors the
    /// established API contract; a future API version should consider
    /// leaving omitted fields untouched instead.
    pub fn update(
        &self,
        id: ContactId,
        preconditions: &Preconditions,
        body: ContactBody,
    ) -> Result<Outcome> {
        let mut update = body.into_contact();
        update.id = id;

        let mut verdict = None;
        let result = self.store.update_if(&update, &mut |current| {
            let tag = EntityTag::of(current);
            let decision = preconditions.evaluate_update(&tag);
            verdict = Some((decision, tag));
            decision == WriteDecision::Proceed
        });

        match result {
            Ok(Guarded::Missing) => Ok(Outcome::status(Status::NotFound)),
            Ok(Guarded::Refused) => Ok(refusal(verdict)),
            Ok(Guarded::Applied(updated)) => {
                debug!(%id, "contact updated");
                Ok(Outcome::status(Status::Created)
                    .with_etag(EntityTag::of(&updated))
                    .with_location(self.location(id)))
            }
            Err(e) => rejected(e),
        }
    }

    /// `DELETE /contacts/{id}`.
    pub fn delete(&self, id: ContactId, preconditions: &Preconditions) -> Result<Outcome> {
        let mut verdict = None;
        let result = self.store.delete_if(id, &mut |current| {
            let tag = EntityTag::of(current);
            let decision = preconditions.evaluate_delete(&tag);
            verdict = Some((decision, tag));
            decision == WriteDecision::Proceed
        })?;

        match result {
            Guarded::Missing => Ok(Outcome::status(Status::NotFound)),
            Guarded::Refused => Ok(refusal(verdict)),
            Guarded::Applied(_) => {
                debug!(%id, "contact deleted");
                Ok(Outcome::status(Status::Ok))
            }
        }
    }
}

/// Outcome for a write the guard refused.
fn refusal(verdict: Option<(WriteDecision, EntityTag)>) -> Outcome {
    match verdict {
        Some((WriteDecision::NotModified, tag)) => {
            Outcome::status(Status::NotModified).with_etag(tag)
        }
        _ => Outcome::status(Status::PreconditionFailed),
    }
}

/// Map a store rejection of the contact itself to 400; anything else is a
/// failure of the store.
fn rejected(error: StoreError) -> Result<Outcome> {
    match error {
        StoreError::Validation(_) | StoreError::IdSpaceExhausted => {
            warn!(%error, "store rejected contact");
            Ok(Outcome::status(Status::BadRequest))
        }
        other => Err(other.into()),
    }
}
