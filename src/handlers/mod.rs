// handlers/mod.rs - HTTP endpoints, grouped by resource
//
// public     → `/`, `/health`
// children   → `/api/v1/children/*`, including the need/allergy link endpoints
// catalog    → `/api/v1/needs/*`, `/api/v1/allergies/*`
// directory  → `/api/v1/groups/*`, `/api/v1/caretakers/*`, `/api/v1/volunteers/*`
pub mod catalog;
pub mod children;
pub mod directory;
pub mod public;
