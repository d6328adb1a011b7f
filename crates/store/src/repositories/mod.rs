//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept a `&dyn TableStore` (or `&dyn BlobStore`) as the first argument.

pub mod media_repo;
pub mod profile_repo;
pub mod profile_tag_repo;
pub mod tag_repo;

pub use media_repo::MediaRepo;
pub use profile_repo::ProfileRepo;
pub use profile_tag_repo::ProfileTagRepo;
pub use tag_repo::TagRepo;
