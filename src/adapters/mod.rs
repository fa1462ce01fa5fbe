// Adapters layer: concrete catalog sources (local products.json, in-memory).

pub mod catalog;
