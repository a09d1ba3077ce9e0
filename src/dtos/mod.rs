//! DTOs module - Data Transfer Objects
//!
//! This module contains all the DTOs used for client-server communication.
//! DTOs separate the external representation (API) from the internal one
//! (entities); they serialize in camelCase to match the documented wire
//! contract.

pub mod attachment;
pub mod message;

// Re-exports to simplify imports
pub use attachment::{AttachmentDetailDTO, AttachmentLightDTO, CreateAttachmentDTO};
pub use message::{CreateMessageDTO, MessageDetailDTO, MessageSummaryDTO, UpdateMessageDTO};
