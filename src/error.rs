#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree is empty")]
    Empty,
}
