/*!
 * Control Channel
 * Capacity and reader-cap operations bound to one endpoint
 */

use super::command::{ControlCommand, ControlReply};
use crate::buffer::SharedBuffer;
use crate::core::errors::DeviceError;
use crate::core::types::{DeviceResult, EndpointId, Size};
use std::sync::Arc;
use tracing::debug;

/// Administrative view of the shared buffer from one endpoint
///
/// Each operation is atomic on its own; nothing holds the lock across
/// calls, so a resize may land between a space query and a later write.
#[derive(Debug, Clone)]
pub struct ControlChannel {
    shared: Arc<SharedBuffer>,
    endpoint: EndpointId,
}

impl ControlChannel {
    /// Bind a channel to `endpoint`, which must exist
    pub fn new(shared: Arc<SharedBuffer>, endpoint: EndpointId) -> DeviceResult<Self> {
        shared.check_endpoint(endpoint)?;
        Ok(Self { shared, endpoint })
    }

    /// Bind to an endpoint a session was already admitted on
    pub(crate) fn from_admitted(shared: Arc<SharedBuffer>, endpoint: EndpointId) -> Self {
        Self { shared, endpoint }
    }

    #[inline]
    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    pub fn capacity(&self) -> Size {
        self.shared.capacity()
    }

    /// Resize the shared buffer, discarding its contents
    pub fn set_capacity(&self, new_capacity: i64) -> DeviceResult<()> {
        let new_capacity = Size::try_from(new_capacity).map_err(|_| {
            DeviceError::invalid_argument(format!("buffer capacity {} is negative", new_capacity))
        })?;
        self.shared.resize(new_capacity)
    }

    pub fn free_space(&self) -> Size {
        self.shared.free_space()
    }

    pub fn used_space(&self) -> Size {
        self.shared.used_space()
    }

    pub fn max_readers(&self) -> DeviceResult<i64> {
        self.shared.max_readers(self.endpoint)
    }

    pub fn set_max_readers(&self, max_readers: i64) -> DeviceResult<()> {
        self.shared.set_max_readers(self.endpoint, max_readers)
    }

    /// Execute one command
    pub fn dispatch(&self, command: ControlCommand) -> DeviceResult<ControlReply> {
        debug!(
            endpoint = self.endpoint,
            command = command.name(),
            "Control command"
        );

        let reply = match command {
            ControlCommand::GetBufferSize => ControlReply::Value(to_reply(self.capacity())),
            ControlCommand::SetBufferSize(size) => {
                self.set_capacity(size)?;
                ControlReply::Done
            }
            ControlCommand::GetFreeSpace => ControlReply::Value(to_reply(self.free_space())),
            ControlCommand::GetUsedSpace => ControlReply::Value(to_reply(self.used_space())),
            ControlCommand::GetMaxReaders => ControlReply::Value(self.max_readers()?),
            ControlCommand::SetMaxReaders(max) => {
                self.set_max_readers(max)?;
                ControlReply::Done
            }
        };
        Ok(reply)
    }

    /// Decode and execute a raw `(code, arg)` command
    pub fn dispatch_raw(&self, code: u32, arg: i64) -> DeviceResult<ControlReply> {
        self.dispatch(ControlCommand::decode(code, arg)?)
    }
}

#[inline]
fn to_reply(size: Size) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}
