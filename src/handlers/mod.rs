//! Handler system: URL-pattern capabilities and their resolver.
//!
//! A [`Handler`] declares the URL shapes it accepts plus a priority weight
//! and implements the acquisition procedure. The [`HandlerRegistry`] holds
//! every registered handler and picks exactly one per incoming URL: the
//! matching handler with the highest weight, first-registered winning ties.

mod instagram_single;
mod registry;
mod traits;

pub use instagram_single::InstagramSingle;
pub use registry::{HandlerRegistry, RegistryError};
pub use traits::{AcquisitionCause, AcquisitionError, Handler};

/// Names of the handlers this build ships with, in registration order.
/// Config `[handlers.<name>]` sections must reference one of these.
pub const BUILTIN_HANDLERS: &[&str] = &[instagram_single::NAME];
