// Clients module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Client, CreateClientRequest};
pub use repositories::ClientRepository;
pub use services::ClientService;
