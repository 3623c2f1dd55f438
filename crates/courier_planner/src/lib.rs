pub mod distance;
pub mod error;
pub mod json;
pub mod problem;
pub mod solver;
pub mod traffic;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
