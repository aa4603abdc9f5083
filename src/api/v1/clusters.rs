//! Clusters

use serde_json::Value;

use crate::api::call;
use crate::endpoint::{Endpoint, HttpMethod};
use crate::session::{Session, Transport};
use crate::Result;

pub static GET_ALL: Endpoint = Endpoint {
    name: "get_all",
    resource: "clusters",
    method: HttpMethod::Get,
    path: "/api/v1/clusters/GetAll",
    summary: "List the clusters available to the tenant",
    params: &[],
    required: &[],
};

/// Clusters client
pub struct Client<'a, T: Transport + ?Sized = Session> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Client<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List clusters. Returns an array of `{"name", "region", ...}`.
    pub async fn get_all(&self) -> Result<Value> {
        call(self.transport, &GET_ALL, &()).await
    }
}
