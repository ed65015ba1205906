use crate::instance::InstanceError;
use crate::min_flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

pub type Result<T> = std::result::Result<T, Error>;
