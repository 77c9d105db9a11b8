mod generator;

pub use generator::ApiKeyGenerator;
