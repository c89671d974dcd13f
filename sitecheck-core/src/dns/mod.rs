mod resolver;

pub use resolver::HostResolver;
