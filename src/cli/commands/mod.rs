pub mod archive;
pub mod token;
pub mod util;
