pub mod command_runner;
pub mod configurator;
pub mod discovery;
pub mod reset;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;
