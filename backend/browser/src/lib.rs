pub mod http;
pub mod loader;
pub mod static_loader;
pub mod viewport;

pub use http::{HttpPageLoader, DEFAULT_TIMEOUT};
pub use loader::{LoadedPage, PageLoader, PAGE_UNREACHABLE};
pub use static_loader::StaticPageLoader;
pub use viewport::ViewportSettings;
