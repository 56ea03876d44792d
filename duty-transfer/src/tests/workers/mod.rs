pub mod archive;
pub mod dispatch;
pub mod planning;
