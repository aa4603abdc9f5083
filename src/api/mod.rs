//! Resource clients and the endpoint registry
//!
//! Every resource client method funnels into [`call`]: typed request →
//! keyword arguments → config defaults → validation → transport.
//!
//! # Module Structure
//!
//! - [`v1::vpcs`] - VPCs (namespaces)
//! - [`v1::servers::snapshots`] - Server snapshots
//! - [`v1::servers::virtual_servers`] - Virtual machines
//! - [`v1::servers::images`] - Operating system images
//! - [`v1::clusters`] - Clusters
//!
//! # Example
//!
//! ```no_run
//! use denvr::api::v1::servers::snapshots::{Client, GetSnapshot};
//! use denvr::{Config, Session};
//!
//! async fn example() -> denvr::Result<()> {
//!     let session = Session::new(Config::load(None)?)?;
//!     let snapshot = Client::new(&session)
//!         .get_snapshot(&GetSnapshot {
//!             id: Some("snap-1".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{}", snapshot);
//!     Ok(())
//! }
//! ```

pub mod v1;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::endpoint::{to_kwargs, Endpoint};
use crate::session::Transport;
use crate::Result;

/// Every declared endpoint
pub static ENDPOINTS: &[&Endpoint] = &[
    &v1::vpcs::GET_VPCS,
    &v1::vpcs::GET_VPC,
    &v1::vpcs::CREATE_VPC,
    &v1::vpcs::DELETE_VPC,
    &v1::servers::snapshots::GET_SNAPSHOTS,
    &v1::servers::snapshots::GET_SNAPSHOT,
    &v1::servers::snapshots::CREATE_SNAPSHOT,
    &v1::servers::snapshots::DELETE_SNAPSHOT,
    &v1::servers::virtual_servers::GET_SERVERS,
    &v1::servers::virtual_servers::GET_SERVER,
    &v1::servers::virtual_servers::CREATE_SERVER,
    &v1::servers::virtual_servers::START_SERVER,
    &v1::servers::virtual_servers::STOP_SERVER,
    &v1::servers::virtual_servers::DESTROY_SERVER,
    &v1::servers::virtual_servers::GET_CONFIGURATIONS,
    &v1::servers::images::GET_OPERATING_SYSTEM_IMAGES,
    &v1::clusters::GET_ALL,
];

/// Get an endpoint by operation name
pub fn find_endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().copied().find(|e| e.name == name)
}

/// Call an endpoint with a typed request
pub async fn call<T, R>(transport: &T, endpoint: &Endpoint, request: &R) -> Result<Value>
where
    T: Transport + ?Sized,
    R: Serialize + ?Sized,
{
    let kwargs = to_kwargs(request)?;
    call_with_kwargs(transport, endpoint, &kwargs).await
}

/// Call an endpoint with loose keyword arguments
pub async fn call_with_kwargs<T>(
    transport: &T,
    endpoint: &Endpoint,
    kwargs: &Map<String, Value>,
) -> Result<Value>
where
    T: Transport + ?Sized,
{
    let request = endpoint.prepare(transport.config(), kwargs)?;
    transport.request(endpoint.method, endpoint.path, &request).await
}
