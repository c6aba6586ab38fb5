/*
 * Responsibility
 * - Public surface of the middleware stack
 */
pub mod auth;
pub mod cors;
pub mod http;
