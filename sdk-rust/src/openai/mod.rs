mod chat_api;
mod model;

pub use model::{OpenAICopyModel, OpenAICopyModelOptions};
