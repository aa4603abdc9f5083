//! Client library for the Denvr Dataworks cloud API.
//!
//! Each endpoint is declared once as data ([`endpoint::Endpoint`]). A call
//! resolves every parameter against the configured defaults
//! ([`Config::resolve`]), validates the result ([`validate::validate_kwargs`])
//! and hands it to a [`Transport`], normally a [`Session`].
//!
//! # Example
//!
//! ```no_run
//! use denvr::api::v1::vpcs::{Client, GetVpcs};
//! use denvr::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> denvr::Result<()> {
//!     let config = Config::default().with_cluster("Msc1").with_token("...");
//!     let session = Session::new(config)?;
//!     let vpcs = Client::new(&session).get_vpcs(&GetVpcs::default()).await?;
//!     println!("{}", vpcs);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod session;
pub mod validate;

pub use config::{Config, DefaultKey};
pub use endpoint::{Endpoint, HttpMethod, ParamSpec};
pub use error::{format_api_error, DenvrError, Result};
pub use session::{Session, Transport};
pub use validate::{validate_kwargs, ParamGroup, Parameters, ResolvedRequest};
