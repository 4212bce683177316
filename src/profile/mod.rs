pub mod error;
pub mod joiner;
pub mod time_aligner;

#[cfg(test)]
pub(crate) mod testing;
