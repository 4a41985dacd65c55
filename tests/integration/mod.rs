//! Integration Tests Module
//!
//! End-to-end tests for the interview pipeline and the matching engine.
//! No network calls are made: the extractor runs against a scripted mock
//! provider and storage uses in-memory SQLite.

// Shared test support (mock LLM provider, fixtures)
mod support;

// Interview state machine end-to-end tests
mod interview_test;

// Matching and ranking tests, including the storage-fed flow
mod matching_test;
