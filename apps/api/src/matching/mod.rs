// Resume ↔ job description matching engine.
// Pure, synchronous components: similarity scoring + rule-based requirement extraction.
// Handlers are the only part that touches HTTP or the blocking pool.

pub mod handlers;
pub mod report;
pub mod requirements;
pub mod similarity;
pub mod tokenizer;
