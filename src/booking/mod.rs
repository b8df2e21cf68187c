pub mod availability;
pub mod coordinator;
pub mod notice;
pub mod selection;
pub mod submitter;

#[cfg(test)]
mod tests;
