//! Feedback client core
//!
//! Platform-agnostic half of the feedback front-ends: the per-browser
//! identity store, the remote API contract, and the controllers that keep
//! view state in sync with the server. Browser specifics (storage, HTTP,
//! timers, the root theme attribute) come in through the traits in
//! [`storage`], [`host`] and [`api`].

pub mod api;
pub mod config;
pub mod controller;
pub mod copy;
pub mod display;
pub mod error;
pub mod host;
pub mod identity;
pub mod landing;
pub mod session;
pub mod storage;

pub use api::{AuthApi, FeedQuery, FeedbackApi};
pub use config::{StaleResponses, VariantConfig, VariantKind, VariantRegistry};
pub use controller::{DashboardState, FeedbackController, MutationKind, ReadTask};
pub use error::{ApiError, ConfigError, StorageError, SubmitError, ValidationError};
pub use host::{HostEnvironment, Theme, Timer};
pub use identity::{AnonymousIdentity, LocalIdentityStore, PreferenceKey};
pub use landing::{LandingController, LandingState, SignupOutcome};
pub use session::ClientSession;
pub use storage::KeyValueStore;
