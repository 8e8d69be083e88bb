// Application layer: use cases sit between handlers and repositories

pub mod user;
