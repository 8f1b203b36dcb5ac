//! cashport-client: GraphQL query registry, HTTP transport with bearer
//! auth, token acquisition and the pagination/merge fetch protocol.

pub mod auth;
pub mod paginator;
pub mod queries;
pub mod transport;

pub use auth::{Credentials, fetch_access_token};
pub use paginator::{fetch_all, unwrap_envelope};
pub use queries::{PageStyle, QuerySpec};
pub use transport::{HttpTransport, QueryTransport};
