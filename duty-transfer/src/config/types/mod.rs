pub mod archive;
pub mod destinations;
pub mod roots;
pub mod transfer;

pub use archive::*;
pub use destinations::*;
pub use roots::*;
pub use transfer::*;
