//! Integration tests for the scene source, registry and change tracker

mod registry_integration;
