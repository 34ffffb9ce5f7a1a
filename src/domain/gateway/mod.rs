//! Gateway vocabulary: the operations it exposes, the list envelope it
//! normalises to, and the errors every handler can produce.

mod errors;
mod operation;
mod resource_list;

pub use errors::GatewayError;
pub use operation::Operation;
pub use resource_list::ResourceList;
