//! Public skill profiles.

pub mod model;

pub use model::{Availability, Profile, ProfileListing, UpsertProfile};
