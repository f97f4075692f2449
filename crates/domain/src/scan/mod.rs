mod scan_mode;
mod scanner_state;

pub use scan_mode::ScanMode;
pub use scanner_state::ScannerState;
