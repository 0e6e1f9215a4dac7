mod layout;
mod paths;

pub use layout::{Platform, executable_path};
pub use paths::AppPaths;
