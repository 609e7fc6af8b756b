pub mod policy;
pub mod security_headers;

pub use policy::PolicyGuard;
pub use security_headers::SecurityHeaders;
