pub mod harness;
pub mod maths;

pub use maths::fastlibm;
