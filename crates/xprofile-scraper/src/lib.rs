pub mod batch;
pub mod error;
pub mod fields;
pub mod page;
pub mod profile;
pub mod validate;

pub use batch::{partition, BatchProgress, BatchRunner, LogProgress};
pub use error::{LookupError, PageError};
pub use fields::{parse_username, FieldExtractor};
pub use page::{Element, HttpPageAccessor, PageAccessor, PageHandle, StaticPage};
pub use profile::ProfileExtractor;
pub use validate::{classify, normalize_reference, validate};
