//! Metered generation workflows. Each one follows the same arc: validate,
//! debit the ledger, call the model, then best-effort side work (images,
//! history) that never fails the request.

pub mod assignment;
pub mod exam;
pub mod handlers;
pub mod presentation;
pub mod prompts;
pub mod quiz;
