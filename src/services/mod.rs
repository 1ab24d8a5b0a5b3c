pub mod ai_providers;
pub mod comparison_orchestrator;
pub mod result_schema;
pub mod spec_reader;
