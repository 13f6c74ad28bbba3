mod client;
pub use client::{AuthError, Client, DownloadError, FetchError, History};

mod session;
pub use session::{Session, AUTH_HEADER};

mod model;
pub use model::*;
