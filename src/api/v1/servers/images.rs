//! Operating system images

use serde_json::Value;

use crate::api::call;
use crate::endpoint::{Endpoint, HttpMethod};
use crate::session::{Session, Transport};
use crate::Result;

pub static GET_OPERATING_SYSTEM_IMAGES: Endpoint = Endpoint {
    name: "get_operating_system_images",
    resource: "servers/images",
    method: HttpMethod::Get,
    path: "/api/v1/servers/images/GetOperatingSystemImages",
    summary: "Get a list of operating system images",
    params: &[],
    required: &[],
};

/// Images client
pub struct Client<'a, T: Transport + ?Sized = Session> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Client<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn get_operating_system_images(&self) -> Result<Value> {
        call(self.transport, &GET_OPERATING_SYSTEM_IMAGES, &()).await
    }
}
