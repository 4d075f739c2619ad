pub mod domain;
pub mod errors;
pub mod lyrics;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::CoreError;
