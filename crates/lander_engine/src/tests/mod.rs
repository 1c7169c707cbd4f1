//! Cross-module tests for the simulation core
