//! Virtual machines (`/api/v1/servers/virtual`)

use serde::Serialize;
use serde_json::Value;

use crate::api::call;
use crate::endpoint::{Endpoint, HttpMethod, ParamSpec};
use crate::session::{Session, Transport};
use crate::Result;

pub static GET_SERVERS: Endpoint = Endpoint {
    name: "get_servers",
    resource: "servers/virtual",
    method: HttpMethod::Get,
    path: "/api/v1/servers/virtual/GetServers",
    summary: "Get a list of virtual machines",
    params: &[ParamSpec::query("cluster", "Cluster", "The cluster you're operating on")],
    required: &[],
};

pub static GET_SERVER: Endpoint = Endpoint {
    name: "get_server",
    resource: "servers/virtual",
    method: HttpMethod::Get,
    path: "/api/v1/servers/virtual/GetServer",
    summary: "Get detailed information about a specific virtual machine",
    params: &[
        ParamSpec::query("id", "Id", "The virtual machine id"),
        ParamSpec::query("namespace", "Namespace", "The namespace/vpc"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
    ],
    required: &["Id", "Namespace", "Cluster"],
};

pub static CREATE_SERVER: Endpoint = Endpoint {
    name: "create_server",
    resource: "servers/virtual",
    method: HttpMethod::Post,
    path: "/api/v1/servers/virtual/CreateServer",
    summary: "Create a new virtual machine",
    params: &[
        ParamSpec::body("name", "name", "Name of the virtual machine"),
        ParamSpec::body("rpool", "rpool", "Resource pool (e.g. on-demand, reserved)"),
        ParamSpec::body("vpc", "vpc", "The namespace/vpc to create the machine in"),
        ParamSpec::body("configuration", "configuration", "Hardware configuration name"),
        ParamSpec::body("cluster", "cluster", "The cluster you're operating on"),
        ParamSpec::body("ssh_keys", "ssh_keys", "Public keys allowed to log in"),
        ParamSpec::body("snapshot_name", "snapshot_name", "Snapshot to create the disk from"),
        ParamSpec::body("os_image_name", "os_image_name", "Operating system image"),
        ParamSpec::body("root_disk_size", "root_disk_size", "Root disk size in GB"),
        ParamSpec::body(
            "personal_storage_mount_path",
            "personal_storage_mount_path",
            "Mount path of the personal storage",
        ),
        ParamSpec::body(
            "tenant_shared_additional_storage",
            "tenant_shared_additional_storage",
            "Mount path of the tenant shared storage",
        ),
        ParamSpec::body("persist_storage", "persist_storage", "Keep direct attached storage on stop"),
        ParamSpec::body(
            "direct_storage_mount_path",
            "direct_storage_mount_path",
            "Mount path of the direct attached storage",
        ),
    ],
    required: &["rpool", "vpc", "configuration", "cluster", "ssh_keys"],
};

pub static START_SERVER: Endpoint = Endpoint {
    name: "start_server",
    resource: "servers/virtual",
    method: HttpMethod::Post,
    path: "/api/v1/servers/virtual/StartServer",
    summary: "Start a virtual machine that has been previously stopped",
    params: &[
        ParamSpec::body("id", "id", "The virtual machine id"),
        ParamSpec::body("namespace", "namespace", "The namespace/vpc"),
        ParamSpec::body("cluster", "cluster", "The cluster you're operating on"),
    ],
    required: &["id", "namespace", "cluster"],
};

pub static STOP_SERVER: Endpoint = Endpoint {
    name: "stop_server",
    resource: "servers/virtual",
    method: HttpMethod::Post,
    path: "/api/v1/servers/virtual/StopServer",
    summary: "Stop a running virtual machine",
    params: &[
        ParamSpec::body("id", "id", "The virtual machine id"),
        ParamSpec::body("namespace", "namespace", "The namespace/vpc"),
        ParamSpec::body("cluster", "cluster", "The cluster you're operating on"),
    ],
    required: &["id", "namespace", "cluster"],
};

pub static DESTROY_SERVER: Endpoint = Endpoint {
    name: "destroy_server",
    resource: "servers/virtual",
    method: HttpMethod::Delete,
    path: "/api/v1/servers/virtual/DestroyServer",
    summary: "Permanently delete a virtual machine",
    params: &[
        ParamSpec::query("id", "Id", "The virtual machine id"),
        ParamSpec::query("namespace", "Namespace", "The namespace/vpc"),
        ParamSpec::query("cluster", "Cluster", "The cluster you're operating on"),
        ParamSpec::query("delete_snapshots", "DeleteSnapshots", "Also delete its snapshots"),
    ],
    required: &["Id", "Namespace", "Cluster"],
};

pub static GET_CONFIGURATIONS: Endpoint = Endpoint {
    name: "get_configurations",
    resource: "servers/virtual",
    method: HttpMethod::Get,
    path: "/api/v1/servers/virtual/GetConfigurations",
    summary: "Get a list of hardware configurations",
    params: &[ParamSpec::query("cluster", "Cluster", "The cluster you're operating on")],
    required: &[],
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetServers {
    pub cluster: Option<String>,
}

/// Identifies one virtual machine; shared by get/start/stop
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerRef {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServer {
    pub name: Option<String>,
    pub rpool: Option<String>,
    pub vpc: Option<String>,
    pub configuration: Option<String>,
    pub cluster: Option<String>,
    pub ssh_keys: Option<Vec<String>>,
    pub snapshot_name: Option<String>,
    pub os_image_name: Option<String>,
    pub root_disk_size: Option<u32>,
    pub personal_storage_mount_path: Option<String>,
    pub tenant_shared_additional_storage: Option<String>,
    pub persist_storage: Option<bool>,
    pub direct_storage_mount_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DestroyServer {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub cluster: Option<String>,
    pub delete_snapshots: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetConfigurations {
    pub cluster: Option<String>,
}

/// Virtual machines client
pub struct Client<'a, T: Transport + ?Sized = Session> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Client<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn get_servers(&self, request: &GetServers) -> Result<Value> {
        call(self.transport, &GET_SERVERS, request).await
    }

    pub async fn get_server(&self, request: &ServerRef) -> Result<Value> {
        call(self.transport, &GET_SERVER, request).await
    }

    /// Create a new virtual machine.
    ///
    /// `vpc` and `rpool` fall back to the configured namespace and resource pool.
    pub async fn create_server(&self, request: &CreateServer) -> Result<Value> {
        call(self.transport, &CREATE_SERVER, request).await
    }

    pub async fn start_server(&self, request: &ServerRef) -> Result<Value> {
        call(self.transport, &START_SERVER, request).await
    }

    pub async fn stop_server(&self, request: &ServerRef) -> Result<Value> {
        call(self.transport, &STOP_SERVER, request).await
    }

    pub async fn destroy_server(&self, request: &DestroyServer) -> Result<Value> {
        call(self.transport, &DESTROY_SERVER, request).await
    }

    pub async fn get_configurations(&self, request: &GetConfigurations) -> Result<Value> {
        call(self.transport, &GET_CONFIGURATIONS, request).await
    }
}
