//! PostgreSQL implementations of the store traits.

pub mod profile;
pub mod swap_request;
pub mod user;

pub use profile::ProfileRepository;
pub use swap_request::SwapRequestRepository;
pub use user::UserRepository;
