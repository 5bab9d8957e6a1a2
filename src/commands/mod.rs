pub mod clone;
pub mod context;
pub mod list;
pub mod pull;
pub mod status;
pub mod track;

pub use clone::*;
pub use context::*;
pub use list::*;
pub use pull::*;
pub use status::*;
pub use track::*;
