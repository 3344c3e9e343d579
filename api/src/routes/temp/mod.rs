pub mod temp_response;
pub mod temp_route;
