pub mod quiz;
pub mod util;
