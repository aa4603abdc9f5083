//! Server snapshots
//!
//! Snapshots capture the disk of an existing virtual machine so new servers
//! can be created from it.

use serde::Serialize;
use serde_json::Value;

use crate::api::call;
use crate::endpoint::{Endpoint, HttpMethod, ParamSpec};
use crate::session::{Session, Transport};
use crate::Result;

pub static GET_SNAPSHOTS: Endpoint = Endpoint {
    name: "get_snapshots",
    resource: "servers/snapshots",
    method: HttpMethod::Get,
    path: "/api/v1/servers/snapshots/GetSnapshots",
    summary: "Get list of snapshots",
    params: &[ParamSpec::query("cluster", "Cluster", "The cluster you're operating on")],
    required: &[],
};

pub static GET_SNAPSHOT: Endpoint = Endpoint {
    name: "get_snapshot",
    resource: "servers/snapshots",
    method: HttpMethod::Get,
    path: "/api/v1/servers/snapshots/GetSnapshot",
    summary: "Get detailed information on specific snapshot",
    params: &[
        ParamSpec::query("id", "Id", "Name of snapshot"),
        ParamSpec::query("namespace", "Namespace", "The namespace/vpc"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
    ],
    required: &["Id", "Namespace", "Cluster"],
};

pub static CREATE_SNAPSHOT: Endpoint = Endpoint {
    name: "create_snapshot",
    resource: "servers/snapshots",
    method: HttpMethod::Post,
    path: "/api/v1/servers/snapshots/CreateSnapshot",
    summary: "Create a new snapshot from an existing virtual machine",
    params: &[
        ParamSpec::body("name", "name", "Name of the new snapshot"),
        ParamSpec::body("namespace", "namespace", "The namespace/vpc"),
        ParamSpec::body("cluster", "cluster", "The cluster you're operating on"),
        ParamSpec::body("source_v_m_name", "sourceVMName", "Virtual machine to snapshot"),
    ],
    required: &["cluster", "namespace"],
};

pub static DELETE_SNAPSHOT: Endpoint = Endpoint {
    name: "delete_snapshot",
    resource: "servers/snapshots",
    method: HttpMethod::Delete,
    path: "/api/v1/servers/snapshots/DeleteSnapshot",
    summary: "Delete snapshot",
    params: &[
        ParamSpec::query("id", "Id", "Name of snapshot"),
        ParamSpec::query("namespace", "Namespace", "The namespace/vpc"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
    ],
    required: &["Id", "Namespace", "Cluster"],
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSnapshots {
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSnapshot {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSnapshot {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
    pub source_v_m_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteSnapshot {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
}

/// Snapshots client
pub struct Client<'a, T: Transport + ?Sized = Session> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Client<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Get list of snapshots.
    ///
    /// Returns `{"items": [...]}`.
    pub async fn get_snapshots(&self, request: &GetSnapshots) -> Result<Value> {
        call(self.transport, &GET_SNAPSHOTS, request).await
    }

    /// Get detailed information on specific snapshot.
    ///
    /// Returns the snapshot: `id`, `namespace`, `source_name`, `os_image`,
    /// `root_disk_size`, `creation_date`, `ready_to_use`, ...
    pub async fn get_snapshot(&self, request: &GetSnapshot) -> Result<Value> {
        call(self.transport, &GET_SNAPSHOT, request).await
    }

    /// Create a new snapshot from an existing virtual machine.
    pub async fn create_snapshot(&self, request: &CreateSnapshot) -> Result<Value> {
        call(self.transport, &CREATE_SNAPSHOT, request).await
    }

    /// Delete snapshot.
    pub async fn delete_snapshot(&self, request: &DeleteSnapshot) -> Result<Value> {
        call(self.transport, &DELETE_SNAPSHOT, request).await
    }
}
