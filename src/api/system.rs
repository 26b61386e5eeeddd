//
//  fortiztp
//  api/system.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! System status endpoint.

use std::sync::Arc;

use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::{EndpointRequest, Transport};

/// System endpoint group.
///
/// Obtained from [`FortiZtp::system`](crate::FortiZtp::system).
#[derive(Clone)]
pub struct SystemApi {
    transport: Arc<dyn Transport>,
}

impl SystemApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Retrieves the FortiZTP service status.
    ///
    /// `GET /v2/system`
    pub async fn get(&self) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get("/v2/system");

        Ok(self.transport.execute(request).await?.into_envelope())
    }
}
