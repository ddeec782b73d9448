/// Background publisher draining the relay queue.
pub mod dispatch_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// NIM game commands.
pub mod nim_service;
/// Whole-board and single-port switching.
pub mod relay_service;
/// Intent routing for inbound skill events.
pub mod skill_service;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
