//! Version 1 of the Denvr API

pub mod clusters;
pub mod servers;
pub mod vpcs;
