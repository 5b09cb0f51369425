//! Repository addresses and structured clones.

pub mod address;
pub mod clone;

pub use address::RepoAddress;
pub use clone::{CloneArgs, clone_repository, prepare_target_dir, resolve_base_dir};
