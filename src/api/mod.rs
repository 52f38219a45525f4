pub mod generate;

pub use generate::__path_handle_generate_nonogram;
pub use generate::{handle_generate_nonogram, GenerateNonogramRequest, GenerateNonogramResponse};
