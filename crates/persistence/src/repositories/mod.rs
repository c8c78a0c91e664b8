//! Repository implementations for database operations.

pub mod auth_account;
pub mod device;
pub mod document;
pub mod geofence;
pub mod pet;
pub mod user;

pub use auth_account::AuthAccountRepository;
pub use device::PgDeviceRepository;
pub use document::PgDocumentStore;
pub use geofence::PgGeofenceRepository;
pub use pet::PgPetRepository;
pub use user::PgUserRepository;
