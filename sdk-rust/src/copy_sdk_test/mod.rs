mod model;

pub use model::{MockCopyModel, MockGenerateResult};
