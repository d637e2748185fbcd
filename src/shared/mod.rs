pub mod multipart;
pub mod stats;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
