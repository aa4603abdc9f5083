//! VPCs
//!
//! A VPC is the namespace servers and snapshots live in.

use serde::Serialize;
use serde_json::Value;

use crate::api::call;
use crate::endpoint::{Endpoint, HttpMethod, ParamSpec};
use crate::session::{Session, Transport};
use crate::Result;

pub static GET_VPCS: Endpoint = Endpoint {
    name: "get_vpcs",
    resource: "vpcs",
    method: HttpMethod::Get,
    path: "/api/v1/vpcs/GetVpcs",
    summary: "Get a list of VPCs",
    params: &[ParamSpec::query("cluster", "cluster", "The cluster you're operating on")],
    required: &[],
};

pub static GET_VPC: Endpoint = Endpoint {
    name: "get_vpc",
    resource: "vpcs",
    method: HttpMethod::Get,
    path: "/api/v1/vpcs/GetVpc",
    summary: "Get detailed information about a specific VPC",
    params: &[
        ParamSpec::query("id", "Id", "The VPC id"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
    ],
    required: &["Id", "Cluster"],
};

pub static CREATE_VPC: Endpoint = Endpoint {
    name: "create_vpc",
    resource: "vpcs",
    method: HttpMethod::Post,
    path: "/api/v1/vpcs/CreateVpc",
    summary: "Create a new VPC",
    params: &[
        ParamSpec::body("name", "name", "Name of the new VPC"),
        ParamSpec::body("cluster", "cluster", "The cluster you're operating on"),
    ],
    required: &["name", "cluster"],
};

pub static DELETE_VPC: Endpoint = Endpoint {
    name: "delete_vpc",
    resource: "vpcs",
    method: HttpMethod::Delete,
    path: "/api/v1/vpcs/DeleteVpc",
    summary: "Delete a VPC",
    params: &[
        ParamSpec::query("id", "Id", "The VPC id"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
    ],
    required: &["Id", "Cluster"],
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetVpcs {
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetVpc {
    pub id: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpc {
    pub name: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteVpc {
    pub id: Option<String>,
    pub cluster: Option<String>,
}

/// VPCs client
pub struct Client<'a, T: Transport + ?Sized = Session> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Client<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Get a list of VPCs. Returns `{"items": [...]}`.
    pub async fn get_vpcs(&self, request: &GetVpcs) -> Result<Value> {
        call(self.transport, &GET_VPCS, request).await
    }

    pub async fn get_vpc(&self, request: &GetVpc) -> Result<Value> {
        call(self.transport, &GET_VPC, request).await
    }

    pub async fn create_vpc(&self, request: &CreateVpc) -> Result<Value> {
        call(self.transport, &CREATE_VPC, request).await
    }

    pub async fn delete_vpc(&self, request: &DeleteVpc) -> Result<Value> {
        call(self.transport, &DELETE_VPC, request).await
    }
}
