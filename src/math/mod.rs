pub mod interpolate;

#[cfg(test)]
mod tests;

pub use interpolate::*;
