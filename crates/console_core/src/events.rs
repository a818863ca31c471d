//! Completed backend requests sent back to the UI thread.

use shared::protocol::{Ack, ConnectionListResponse, ConnectionResponse};

use crate::service::ServiceResult;

#[derive(Debug)]
pub enum BackendEvent {
    ConnListLoaded(ServiceResult<ConnectionListResponse>),
    ConnectionLoaded {
        id: String,
        result: ServiceResult<ConnectionResponse>,
    },
    ConnectionTested(ServiceResult<Ack>),
    ConnectionSaved(ServiceResult<Ack>),
}
