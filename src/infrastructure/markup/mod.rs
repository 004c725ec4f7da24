pub mod profile;
pub mod scanner;

pub use profile::MarkerProfile;
pub use scanner::MarkerScanner;
