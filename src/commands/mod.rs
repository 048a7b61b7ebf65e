pub mod init;
pub mod status;
pub mod switch;
pub mod version;
pub mod zip;

pub use init::*;
pub use status::*;
pub use switch::*;
pub use version::*;
pub use zip::*;
