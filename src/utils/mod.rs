//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Asset path to absolute URL resolution
pub mod assets;

/// Display masks for CPF, CNPJ and phone numbers
pub mod masks;

/// Text truncation and padding for table output
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
