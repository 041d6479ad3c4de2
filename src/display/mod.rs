pub mod pagination;
pub mod progress;
pub mod table;

pub use pagination::PaginationInfo;
pub use progress::{OperationStatus, ProgressSpinner, display_status};
pub use table::TableDisplay;
