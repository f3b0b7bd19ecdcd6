pub mod errors;
pub mod params;
pub mod reader;

pub use errors::QueryError;
pub use params::{MemoryQueryParams, QueryMap, QueryParams};
pub use reader::{read_index, read_list, read_scalar};
