// Tue Jan 20 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed type table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Type {from} references unknown type id {target}")]
    DanglingType { from: usize, target: usize },
    #[error("Finish event references unknown type id {0}")]
    UnknownFinish(usize),
    #[error("Main variant chain of type {0} is cyclic")]
    VariantCycle(usize),
}
