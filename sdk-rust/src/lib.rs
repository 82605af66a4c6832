mod client_utils;
pub mod copy_sdk_test;
mod copy_model;
mod errors;
mod instruction;
pub mod openai;
pub mod opentelemetry;
mod types;

pub use copy_model::CopyModel;
pub use errors::*;
pub use instruction::SYSTEM_INSTRUCTION;
pub use types::*;
