pub mod chain_factory;
mod chain_parts;
pub mod combinatoric_chain;
pub mod flat_chain;
pub mod linear_chain;
pub mod sequential_branch_executor;
pub mod threaded_branch_executor;
