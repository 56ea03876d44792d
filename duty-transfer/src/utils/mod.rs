pub mod logging;
pub mod startup_info;
