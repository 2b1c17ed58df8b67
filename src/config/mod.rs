mod types;

pub use types::ResolverConfig;
