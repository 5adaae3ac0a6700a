use std::rc::Rc;

use crate::api::FeedbackApi;
use crate::config::VariantConfig;
use crate::host::{HostEnvironment, Timer};
use crate::identity::{AnonymousIdentity, LocalIdentityStore};
use crate::storage::KeyValueStore;

/// Everything a controller needs from the outside world, built once at startup
/// and handed to the controllers. Cloning shares the same underlying handles.
#[derive(Clone)]
pub struct ClientSession {
    config: Rc<VariantConfig>,
    identity_store: Rc<LocalIdentityStore>,
    identity: AnonymousIdentity,
    host: Rc<dyn HostEnvironment>,
    api: Rc<dyn FeedbackApi>,
    timer: Rc<dyn Timer>,
}

impl ClientSession {
    pub fn new(
        config: VariantConfig,
        storage: Rc<dyn KeyValueStore>,
        host: Rc<dyn HostEnvironment>,
        api: Rc<dyn FeedbackApi>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        let identity_store = Rc::new(LocalIdentityStore::new(
            config.storage_namespace.clone(),
            storage,
        ));
        let identity = identity_store.get_or_create_identity();
        Self {
            config: Rc::new(config),
            identity_store,
            identity,
            host,
            api,
            timer,
        }
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    pub fn identity(&self) -> &AnonymousIdentity {
        &self.identity
    }

    pub fn user_id(&self) -> &str {
        self.identity.as_str()
    }

    pub fn identity_store(&self) -> &LocalIdentityStore {
        &self.identity_store
    }

    pub fn host(&self) -> &dyn HostEnvironment {
        self.host.as_ref()
    }

    pub fn api(&self) -> &dyn FeedbackApi {
        self.api.as_ref()
    }

    pub fn timer(&self) -> &dyn Timer {
        self.timer.as_ref()
    }
}
