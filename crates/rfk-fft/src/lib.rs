//! Power-of-two FFT kernel: radix-2 complex engine, real transforms, and the
//! `real_fft` entry point.

pub mod batch;
pub mod bitrev;
pub mod context;
pub mod fft;
pub mod packing;
pub mod planned;
pub mod radix2;
pub mod real;

pub use context::{TransformContext, real_fft};
pub use fft::Fft;
