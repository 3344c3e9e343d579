pub mod knowledge_request;
pub mod knowledge_route;
