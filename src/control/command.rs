/*!
 * Control Commands
 * The administrative command set and its numeric encoding
 */

use crate::core::errors::DeviceError;
use crate::core::types::DeviceResult;
use serde::{Deserialize, Serialize};

/// Control command codes
pub mod codes {
    pub const GET_BUFFER_SIZE: u32 = 0;
    pub const SET_BUFFER_SIZE: u32 = 1;
    pub const GET_FREE_SPACE: u32 = 2;
    pub const GET_USED_SPACE: u32 = 3;
    pub const GET_MAX_READERS: u32 = 4;
    pub const SET_MAX_READERS: u32 = 5;
}

/// A single control operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "arg")]
pub enum ControlCommand {
    GetBufferSize,
    SetBufferSize(i64),
    GetFreeSpace,
    GetUsedSpace,
    GetMaxReaders,
    SetMaxReaders(i64),
}

impl ControlCommand {
    /// Decode a raw `(code, arg)` pair; `arg` is ignored by query commands
    pub fn decode(code: u32, arg: i64) -> DeviceResult<Self> {
        match code {
            codes::GET_BUFFER_SIZE => Ok(Self::GetBufferSize),
            codes::SET_BUFFER_SIZE => Ok(Self::SetBufferSize(arg)),
            codes::GET_FREE_SPACE => Ok(Self::GetFreeSpace),
            codes::GET_USED_SPACE => Ok(Self::GetUsedSpace),
            codes::GET_MAX_READERS => Ok(Self::GetMaxReaders),
            codes::SET_MAX_READERS => Ok(Self::SetMaxReaders(arg)),
            code => Err(DeviceError::Unsupported { code }),
        }
    }

    pub const fn code(&self) -> u32 {
        match self {
            Self::GetBufferSize => codes::GET_BUFFER_SIZE,
            Self::SetBufferSize(_) => codes::SET_BUFFER_SIZE,
            Self::GetFreeSpace => codes::GET_FREE_SPACE,
            Self::GetUsedSpace => codes::GET_USED_SPACE,
            Self::GetMaxReaders => codes::GET_MAX_READERS,
            Self::SetMaxReaders(_) => codes::SET_MAX_READERS,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetBufferSize => "get_buffer_size",
            Self::SetBufferSize(_) => "set_buffer_size",
            Self::GetFreeSpace => "get_free_space",
            Self::GetUsedSpace => "get_used_space",
            Self::GetMaxReaders => "get_max_readers",
            Self::SetMaxReaders(_) => "set_max_readers",
        }
    }

    /// True for commands that change device state
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::SetBufferSize(_) | Self::SetMaxReaders(_))
    }
}

/// Result of a control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reply", content = "value")]
pub enum ControlReply {
    /// Query result
    Value(i64),
    /// Mutation applied
    Done,
}

impl ControlReply {
    pub const fn value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Done => None,
        }
    }
}
