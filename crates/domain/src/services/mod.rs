//! Application flows for TruFurrs.
//!
//! Each flow owns a `watch` channel with its published state so that the
//! HTTP layer and tests can observe transitions.

pub mod auth;
pub mod home;
pub mod navigation;
pub mod pairing;
pub mod splash;

pub use auth::{
    AuthFlow, AuthProvider, AuthProviderError, AuthState, AuthenticatedUser, MockAuthProvider,
};
pub use home::{HomeSummary, NavigationMenu};
pub use navigation::Destination;
pub use pairing::{PairedDevice, PairingError, PairingService};
pub use splash::{SplashAuthState, SplashFlow, DEFAULT_SPLASH_DURATION};
