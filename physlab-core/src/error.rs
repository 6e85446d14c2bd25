use crate::engine::BodyId;
use thiserror::Error;

/// Rejections reported back to whoever is editing the sandbox.
///
/// Physics stepping itself never fails; these only come out of adding or
/// removing bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    #[error("maximum number of bodies ({max}) reached")]
    BodyLimitReached { max: usize },
    #[error("no body with id {0}")]
    UnknownBody(BodyId),
}
