//! End-to-end tests for the warehouse assistant live under `tests/`.
//!
//! They drive the real router from `wh-api` over the in-memory sample
//! warehouse, with a `wiremock` server standing in for the chat-completions
//! endpoint.
