pub mod nonogram_service;
pub mod segmentation;

pub use nonogram_service::{GenerateParams, GeneratedNonogram, NonogramService};
pub use segmentation::load_segmentation;
