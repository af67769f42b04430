pub mod booking;
pub mod onboarding;
pub mod pricing;

#[cfg(test)]
pub(crate) mod fixtures;
