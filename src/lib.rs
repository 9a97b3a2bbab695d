pub mod chat;
pub mod constants;
pub mod itinerary;
pub mod languages;
pub mod session;
pub mod web_server;
