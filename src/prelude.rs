#![allow(unused_imports)]

pub use anyhow::{Context, Error, bail, ensure};
pub use tracing::{Level, debug, error, info, instrument, trace, warn};

pub use crate::error::RateError;

pub type Result<T = (), E = Error> = anyhow::Result<T, E>;
