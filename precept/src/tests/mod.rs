




// Orchestrator tests
mod validate;
