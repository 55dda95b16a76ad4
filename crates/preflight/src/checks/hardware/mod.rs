pub mod architecture;
pub mod gpu;
pub mod hardware_check;
pub mod memory;
pub mod storage;
pub use hardware_check::HardwareChecker;
