pub mod file_logger;
pub mod graph_data;
pub mod multi_logger;

pub use file_logger::*;
pub use graph_data::*;
pub use multi_logger::*;
