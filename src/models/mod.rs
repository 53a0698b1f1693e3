//! Data models shared by views and services.

mod message;
mod thread;

pub use message::{Draft, MessageId, MessageRecord};
pub use thread::{thread_order, ThreadedRecord};
