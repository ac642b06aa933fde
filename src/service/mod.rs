//! Admin operations, independent of the HTTP layer.
//!
//! [`AdminService`] owns the collaborators every operation needs (store,
//! cache, notifier, token signer) and is shared by the router through
//! `AppState`.

mod auth;
mod mentors;
mod reference;
mod students;
mod submissions;
mod tasks;
pub mod validation;

use std::sync::Arc;

pub use auth::provision_admin;
pub use mentors::{MentorInput, MentorResponse};
pub use students::StudentResponse;
pub use submissions::{STATUS_MESSAGE_CONTENT, SubmissionFilter};
pub use tasks::TaskInput;

use crate::auth::{PasswordHasher, TokenSigner};
use crate::cache::Cache;
use crate::notify::Notifier;
use crate::store::Store;

pub struct AdminService {
    store: Arc<dyn Store>,
    cache: Arc<dyn Cache>,
    notifier: Arc<dyn Notifier>,
    signer: Arc<dyn TokenSigner>,
    hasher: PasswordHasher,
}

impl AdminService {
    pub fn new(
        store: Arc<dyn Store>,
        cache: Arc<dyn Cache>,
        notifier: Arc<dyn Notifier>,
        signer: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            store,
            cache,
            notifier,
            signer,
            hasher: PasswordHasher::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }
}
