/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and login
/// - `organizations`: Organization creation
/// - `tasks`: Task listing and lifecycle mutations
pub mod auth;
pub mod health;
pub mod organizations;
pub mod tasks;
