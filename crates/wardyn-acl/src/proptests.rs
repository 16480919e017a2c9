//! Property-based tests for the decision engine and policy normalization.
