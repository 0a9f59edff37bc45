/// Harbor domain layer: reference parsing, ID-or-name resolution, listing aggregation.
pub mod aggregate;
pub mod errors;
pub mod reference;
pub mod resolve;

pub use aggregate::{
    Lookup, find_project, find_repository_tag, logs_with_repository, repositories_with_size,
};
pub use errors::HarborError;
pub use resolve::{resolve_project, resolve_user};
