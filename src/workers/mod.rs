pub mod command_runner;
