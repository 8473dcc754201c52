pub mod dtos;
pub mod openapi;
pub mod routes;
