mod convertkit;

pub use convertkit::ConvertKitClient;
