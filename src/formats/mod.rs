pub mod psv;

pub use psv::PsvFormatter;
